//! HTML dashboard assembly.
//!
//! Builds one self-contained HTML page per run: for each author an info
//! table, a citations-per-year chart, the publication-title tag cloud, and
//! the publication list table. Charts are plotly.js traces assembled as JSON
//! and embedded next to their target divs; tables are plain HTML.

use crate::semanticscholar::AuthorData;
use crate::wordcloud::LayoutCell;
use serde_json::{json, Value};

/// Text color of the tag cloud glyphs
const CLOUD_TEXT_COLOR: &str = "rgb(20, 10, 50)";

/// Marker color of the citations-per-year chart
const CITES_MARKER_COLOR: &str = "rgb(100, 115, 250)";

/// Plotly.js CDN script tag
const PLOTLY_CDN: &str =
    r#"<script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>"#;

/// Escape text for HTML element and attribute contexts.
fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serialize a trace for embedding inside a `<script>` block.
///
/// `<` is escaped so a literal `</script>` inside a title can't terminate
/// the block early.
fn embed_json(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

/// Summary rows for the info table: metric name and value.
pub fn summary_rows(author: &AuthorData) -> Vec<(&'static str, String)> {
    vec![
        ("citedby", author.citedby.to_string()),
        ("hindex", author.hindex.to_string()),
        ("i10index", author.i10index.to_string()),
        ("#pubs", author.pubs.len().to_string()),
    ]
}

/// Render a publication link as an anchor, or an empty string when absent.
pub fn pub_link(link: &str) -> String {
    if link.is_empty() {
        String::new()
    } else {
        format!("<a href=\"{}\">link</a>", html_escape(link))
    }
}

/// Build the tag-cloud scatter trace from layout cells.
///
/// Glyph font size is the cell weight plus one, so zero-weight sentinels stay
/// invisible while still widening the plot's horizontal range. Hover text
/// shows the term with its percentage at one decimal.
pub fn wordcloud_trace(cells: &[LayoutCell]) -> Value {
    let x: Vec<f64> = cells.iter().map(|c| c.column).collect();
    let y: Vec<f64> = cells.iter().map(|c| f64::from(c.row)).collect();
    let text: Vec<&str> = cells.iter().map(|c| c.term.as_str()).collect();
    let sizes: Vec<f64> = cells.iter().map(|c| c.weight + 1.0).collect();
    let colors: Vec<&str> = cells.iter().map(|_| CLOUD_TEXT_COLOR).collect();
    let hover: Vec<String> = cells
        .iter()
        .map(|c| format!("{} {:.1}%", c.term, c.weight))
        .collect();

    json!({
        "x": x,
        "y": y,
        "mode": "text",
        "text": text,
        "textfont": { "size": sizes, "color": colors },
        "hoverinfo": "text",
        "hovertext": hover,
        "showlegend": false
    })
}

/// Build the citations-per-year scatter trace.
pub fn cites_trace(author: &AuthorData) -> Value {
    let x: Vec<i32> = author.cites_per_year.iter().map(|(year, _)| *year).collect();
    let y: Vec<u64> = author.cites_per_year.iter().map(|(_, count)| *count).collect();

    json!({
        "x": x,
        "y": y,
        "marker": { "size": 1, "color": CITES_MARKER_COLOR },
        "showlegend": false
    })
}

/// Render the info table: name/affiliation header plus summary metric rows.
fn info_table(author: &AuthorData) -> String {
    let mut table = String::from("<table class=\"info\">\n");
    table.push_str(&format!(
        "<tr><th>name<br>aff</th><th>{}<br>{}</th></tr>\n",
        html_escape(&author.name),
        html_escape(&author.affiliation)
    ));
    for (label, value) in summary_rows(author) {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            label,
            html_escape(&value)
        ));
    }
    table.push_str("</table>\n");
    table
}

/// Render the publication list table.
fn pubs_table(author: &AuthorData) -> String {
    let mut table = String::from(
        "<table class=\"pubs\">\n<tr><th>citedby</th><th>title</th><th>year</th><th>link</th></tr>\n",
    );
    for publication in &author.pubs {
        // -1 marks a missing year, as the summary data always did.
        let year = publication.year.unwrap_or(-1);
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            publication.citedby,
            html_escape(&publication.title),
            year,
            pub_link(&publication.link)
        ));
    }
    table.push_str("</table>\n");
    table
}

/// Render one author's panel set.
fn author_section(author: &AuthorData, cells: &[LayoutCell], index: usize) -> String {
    let cloud_id = format!("cloud-{}", index);
    let cites_id = format!("cites-{}", index);

    let mut section = format!(
        "<section class=\"author\">\n<h2>{}</h2>\n",
        html_escape(&author.name)
    );

    section.push_str("<h3>Info</h3>\n");
    section.push_str(&info_table(author));

    section.push_str("<h3>Citations Per Year</h3>\n");
    section.push_str(&format!("<div id=\"{}\" class=\"chart\"></div>\n", cites_id));

    section.push_str("<h3>Tag cloud</h3>\n");
    section.push_str(&format!("<div id=\"{}\" class=\"chart\"></div>\n", cloud_id));

    section.push_str("<h3>Paper List</h3>\n");
    section.push_str(&pubs_table(author));

    section.push_str(&format!(
        "<script>\nPlotly.newPlot(\"{}\", [{}], {{\"height\": 300}});\nPlotly.newPlot(\"{}\", [{}], {{\"height\": 400, \"xaxis\": {{\"visible\": false}}, \"yaxis\": {{\"visible\": false}}}});\n</script>\n",
        cites_id,
        embed_json(&cites_trace(author)),
        cloud_id,
        embed_json(&wordcloud_trace(cells)),
    ));

    section.push_str("</section>\n");
    section
}

/// Render the complete dashboard page.
///
/// # Arguments
///
/// * `entries` - Author data with the precomputed tag-cloud layout per author
/// * `generated_at` - Timestamp string for the page footer
pub fn render_dashboard(entries: &[(AuthorData, Vec<LayoutCell>)], generated_at: &str) -> String {
    let mut page = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>Scholar Dashboard</title>\n",
    );
    page.push_str(PLOTLY_CDN);
    page.push('\n');
    page.push_str(
        "<style>\nbody { font-family: sans-serif; margin: 2em; }\ntable { border-collapse: collapse; margin-bottom: 1em; }\ntd, th { border: 1px solid rgb(200, 215, 220); padding: 4px 8px; font-size: 10pt; text-align: left; }\nth { background: rgb(220, 235, 240); }\nsection.author { margin-bottom: 3em; }\n</style>\n",
    );
    page.push_str("</head>\n<body>\n");

    for (index, (author, cells)) in entries.iter().enumerate() {
        page.push_str(&author_section(author, cells, index));
    }

    page.push_str(&format!(
        "<footer>generated {}</footer>\n",
        html_escape(generated_at)
    ));
    page.push_str("</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semanticscholar::Publication;
    use crate::stopwords::StopwordSet;
    use crate::wordcloud::{compute_layout, LayoutOptions};

    fn sample_author() -> AuthorData {
        AuthorData {
            query: "jane doe".to_string(),
            name: "Jane <Doe>".to_string(),
            affiliation: "Example & University".to_string(),
            citedby: 1234,
            hindex: 21,
            i10index: 30,
            cites_per_year: vec![(2019, 3), (2021, 12)],
            pubs: vec![
                Publication {
                    title: "fast caching layer".to_string(),
                    year: Some(2020),
                    citedby: 42,
                    link: "https://example.org/p1".to_string(),
                },
                Publication {
                    title: "caching for speed".to_string(),
                    year: None,
                    citedby: 7,
                    link: String::new(),
                },
            ],
        }
    }

    fn sample_layout(author: &AuthorData) -> Vec<crate::wordcloud::LayoutCell> {
        let options = LayoutOptions {
            threshold: 50.0,
            ..Default::default()
        };
        let stopwords = StopwordSet::new(Vec::<String>::new(), Vec::<String>::new());
        compute_layout(&author.pubs, &stopwords, &options).expect("layout")
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a & <b>"), "a &amp; &lt;b&gt;");
        assert_eq!(html_escape("plain"), "plain");
        assert_eq!(html_escape("\"q\" 'x'"), "&quot;q&quot; &#39;x&#39;");
    }

    #[test]
    fn test_pub_link() {
        assert_eq!(pub_link(""), "");
        let anchor = pub_link("https://example.org/p?a=1&b=2");
        assert!(anchor.starts_with("<a href=\"https://example.org/p?a=1&amp;b=2\""));
        assert!(anchor.ends_with(">link</a>"));
    }

    #[test]
    fn test_summary_rows() {
        let rows = summary_rows(&sample_author());
        assert_eq!(rows[0], ("citedby", "1234".to_string()));
        assert_eq!(rows[3], ("#pubs", "2".to_string()));
    }

    #[test]
    fn test_wordcloud_trace_sizes_and_hover() {
        let author = sample_author();
        let cells = sample_layout(&author);
        let trace = wordcloud_trace(&cells);

        let sizes = trace["textfont"]["size"].as_array().expect("sizes");
        // caching is at 100%, sized 101; sentinels are sized 1.
        assert_eq!(sizes[0].as_f64(), Some(101.0));
        assert_eq!(sizes[sizes.len() - 1].as_f64(), Some(1.0));

        assert_eq!(trace["hovertext"][0].as_str(), Some("caching 100.0%"));
        assert_eq!(trace["mode"].as_str(), Some("text"));
        assert_eq!(trace["showlegend"].as_bool(), Some(false));

        // Sentinels carry empty text at the padded columns.
        let x = trace["x"].as_array().expect("x");
        assert_eq!(x[x.len() - 2].as_f64(), Some(-0.5));
        assert_eq!(x[x.len() - 1].as_f64(), Some(2.5));
        assert_eq!(trace["text"][x.len() - 1].as_str(), Some(""));
    }

    #[test]
    fn test_cites_trace() {
        let trace = cites_trace(&sample_author());
        assert_eq!(trace["x"][0].as_i64(), Some(2019));
        assert_eq!(trace["x"][1].as_i64(), Some(2021));
        assert_eq!(trace["y"][1].as_u64(), Some(12));
    }

    #[test]
    fn test_render_dashboard() {
        let author = sample_author();
        let cells = sample_layout(&author);
        let page = render_dashboard(&[(author, cells)], "2026-08-05 12:00:00");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("cdn.plot.ly"));
        // Names and affiliations are escaped.
        assert!(page.contains("Jane &lt;Doe&gt;"));
        assert!(page.contains("Example &amp; University"));
        // Publication rows: missing year renders as -1, empty link as nothing.
        assert!(page.contains("<td>7</td><td>caching for speed</td><td>-1</td><td></td>"));
        assert!(page.contains(">link</a>"));
        // One pair of chart divs for the single author.
        assert!(page.contains("id=\"cloud-0\""));
        assert!(page.contains("id=\"cites-0\""));
        assert!(page.contains("generated 2026-08-05 12:00:00"));
    }

    #[test]
    fn test_embed_json_escapes_script_close() {
        let value = json!({"text": "</script>"});
        assert!(!embed_json(&value).contains("</script>"));
    }
}
