//! Tag-cloud term-frequency and layout engine.
//!
//! Converts a corpus of publication titles into a ranked, positioned set of
//! terms for a 2-D scatter-style word cloud. Pure computation: no I/O, no
//! shared state, deterministic for a given input order.

use crate::error::{Result, ScholarDashError};
use crate::semanticscholar::Publication;
use crate::stopwords::StopwordSet;
use regex::Regex;
use tracing::debug;

/// Leading/trailing non-alphanumeric runs, for the punctuation-stripping option.
const PUNCT_EDGES: &str = r"^[^\p{L}\p{N}]+|[^\p{L}\p{N}]+$";

/// One ranked term: occurrences across the corpus and the share of
/// publications it appears in (100 * count / number of publications).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TermStat {
    pub term: String,
    pub count: usize,
    pub percentage: f64,
}

/// One positioned, sized term (or sentinel) in the word-cloud grid.
///
/// Non-sentinel cells sit on integer grid coordinates; the two sentinel cells
/// carry an empty term, zero weight, and half-step columns (-0.5 and
/// `n_columns` - 0.5) that pad the rendered plot's horizontal extent.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LayoutCell {
    pub term: String,
    pub weight: f64,
    pub column: f64,
    pub row: u32,
}

impl LayoutCell {
    /// True for the zero-weight padding cells appended after the ranked terms.
    pub fn is_sentinel(&self) -> bool {
        self.term.is_empty() && self.weight == 0.0
    }
}

/// Options for [`compute_layout`].
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Minimum percentage (0-100) a term must reach to be kept.
    pub threshold: f64,
    /// Number of grid columns.
    pub n_columns: usize,
    /// Strip leading/trailing punctuation from tokens before counting.
    ///
    /// Off by default: the historical behavior counts "networks," and
    /// "networks" as distinct terms.
    pub strip_punctuation: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            threshold: 3.0,
            n_columns: 3,
            strip_punctuation: false,
        }
    }
}

/// Count term occurrences across all titles in the corpus.
///
/// Titles are lower-cased and split on whitespace; tokens found in `stopwords`
/// are dropped. Publications without a title contribute no tokens but still
/// count toward the percentage denominator. The result is sorted by descending
/// count; terms with equal counts keep their first-encountered order.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty corpus (the percentage denominator
/// would be zero).
pub fn term_frequencies(
    corpus: &[Publication],
    stopwords: &StopwordSet,
    strip_punctuation: bool,
) -> Result<Vec<TermStat>> {
    if corpus.is_empty() {
        return Err(ScholarDashError::InvalidInput(
            "empty corpus: no publications to rank terms from".to_string(),
        ));
    }

    let punct_re = if strip_punctuation {
        Some(Regex::new(PUNCT_EDGES).map_err(|e| {
            ScholarDashError::Parse(format!("Failed to compile tokenizer regex: {}", e))
        })?)
    } else {
        None
    };

    // First-encountered order is the tie-break for equal counts, so terms are
    // collected in a vec and the index map only deduplicates.
    let mut terms: Vec<TermStat> = Vec::new();
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for publication in corpus {
        for raw in publication.title.to_lowercase().split_whitespace() {
            let token = match &punct_re {
                Some(re) => re.replace_all(raw, "").to_string(),
                None => raw.to_string(),
            };
            if token.is_empty() || stopwords.contains(&token) {
                continue;
            }
            match index.get(&token) {
                Some(&i) => terms[i].count += 1,
                None => {
                    index.insert(token.clone(), terms.len());
                    terms.push(TermStat {
                        term: token,
                        count: 1,
                        percentage: 0.0,
                    });
                }
            }
        }
    }

    // Stable sort: descending count, insertion order preserved within ties.
    terms.sort_by(|a, b| b.count.cmp(&a.count));

    let denominator = corpus.len() as f64;
    for stat in &mut terms {
        stat.percentage = 100.0 * stat.count as f64 / denominator;
    }

    Ok(terms)
}

/// Compute the word-cloud layout for a corpus of publications.
///
/// Ranks terms by [`term_frequencies`], keeps those whose percentage reaches
/// `options.threshold`, and assigns them column-major grid positions: the k-th
/// kept term (0-indexed, descending-count order) lands at
/// `(k % n_columns, k / n_columns)`. Two zero-weight sentinel cells with empty
/// term text are appended at `(-0.5, 0)` and `(n_columns - 0.5, 0)`.
///
/// # Arguments
///
/// * `corpus` - Non-empty publication list; titles are the term source
/// * `stopwords` - Terms excluded from ranking
/// * `options` - Threshold, column count, and tokenizer options
///
/// # Errors
///
/// Returns `InvalidInput` for an empty corpus, `n_columns == 0`, or a
/// negative/non-finite threshold. A threshold above 100 is valid and yields
/// only the two sentinels.
pub fn compute_layout(
    corpus: &[Publication],
    stopwords: &StopwordSet,
    options: &LayoutOptions,
) -> Result<Vec<LayoutCell>> {
    if options.n_columns == 0 {
        return Err(ScholarDashError::InvalidInput(
            "n_columns must be positive".to_string(),
        ));
    }
    if !options.threshold.is_finite() || options.threshold < 0.0 {
        return Err(ScholarDashError::InvalidInput(format!(
            "threshold must be a non-negative percentage, got {}",
            options.threshold
        )));
    }

    let ranked = term_frequencies(corpus, stopwords, options.strip_punctuation)?;

    let n_columns = options.n_columns;
    let mut cells: Vec<LayoutCell> = ranked
        .into_iter()
        .filter(|stat| stat.percentage >= options.threshold)
        .enumerate()
        .map(|(k, stat)| LayoutCell {
            term: stat.term,
            weight: stat.percentage,
            column: (k % n_columns) as f64,
            row: (k / n_columns) as u32,
        })
        .collect();

    debug!(
        pubs = corpus.len(),
        kept = cells.len(),
        threshold = options.threshold,
        "Computed tag cloud layout"
    );

    cells.push(LayoutCell {
        term: String::new(),
        weight: 0.0,
        column: -0.5,
        row: 0,
    });
    cells.push(LayoutCell {
        term: String::new(),
        weight: 0.0,
        column: n_columns as f64 - 0.5,
        row: 0,
    });

    Ok(cells)
}
