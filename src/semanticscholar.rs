//! Semantic Scholar API Client
//!
//! Fetches an author's profile and publication list, and looks up citation
//! counts for individual publication titles.
//!
//! API Details:
//! - Author search: GET /graph/v1/author/search
//! - Author papers: GET /graph/v1/author/{id}/papers (max 1000 per request)
//! - Paper search: GET /graph/v1/paper/search
//! - Higher rate limits with an API key (x-api-key header)

use crate::error::{OptionExt, Result, ScholarDashError};
use futures::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Semantic Scholar API base URL
const SS_API_BASE: &str = "https://api.semanticscholar.org/graph/v1";

/// Maximum papers fetched per author (API limit per request)
const MAX_PAPERS: usize = 1000;

/// Concurrent workers for batched title lookups
const LOOKUP_WORKERS: usize = 3;

/// One publication of an author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    /// Publication year; absent for some records
    pub year: Option<i32>,
    pub citedby: u64,
    /// Landing page URL, empty when the API has none
    pub link: String,
}

/// An author's fetched profile and publication corpus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorData {
    /// Name as queried on the command line
    pub query: String,
    pub name: String,
    pub affiliation: String,
    /// Total citations across all publications
    pub citedby: u64,
    pub hindex: u32,
    pub i10index: u32,
    /// Citation counts summed by publication year, ascending
    pub cites_per_year: Vec<(i32, u64)>,
    pub pubs: Vec<Publication>,
}

/// Semantic Scholar client for author and paper lookups.
pub struct AuthorClient {
    client: Client,
    semaphore: Arc<Semaphore>,
    api_key: Option<String>,
}

impl AuthorClient {
    /// Create a new AuthorClient.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Optional API key for higher rate limits
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScholarDashError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(LOOKUP_WORKERS)),
            api_key,
        })
    }

    /// Fetch an author's profile and publications by name.
    ///
    /// Searches for the name and takes the first match, then fetches that
    /// author's papers and derives the summary metrics the dashboard shows.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the search has no hits, `Api` on non-success
    /// status codes, `Network`/`Parse` on transport or decoding failures.
    pub async fn read_author_data(&self, author_name: &str) -> Result<AuthorData> {
        info!(author = author_name, "Reading author data");

        let author = self.search_author(author_name).await?;
        let author_id = author.author_id.ok_or_parse("Author record without an id")?;

        let pubs = self.fetch_papers(&author_id).await?;

        let data = AuthorData {
            query: author_name.to_string(),
            name: author.name.unwrap_or_default(),
            affiliation: author.affiliations.unwrap_or_default().join(", "),
            citedby: author.citation_count.unwrap_or(0),
            hindex: author.h_index.unwrap_or(0),
            i10index: i10_index(&pubs),
            cites_per_year: cites_per_year(&pubs),
            pubs,
        };

        info!(
            author = %data.name,
            pubs = data.pubs.len(),
            citedby = data.citedby,
            "Author data complete"
        );

        Ok(data)
    }

    /// Look up the citation count for a publication title.
    ///
    /// Returns None when the title has no match or the request fails; lookup
    /// failures are logged, never propagated.
    pub async fn lookup_citations(&self, title: &str) -> Option<u64> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let _permit = self.semaphore.acquire().await.ok()?;

        let url = format!("{}/paper/search", SS_API_BASE);
        let request = self
            .apply_key(self.client.get(&url))
            .query(&[("query", title), ("fields", "citationCount"), ("limit", "1")]);

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<SSPaperSearchResponse>().await {
                    Ok(data) => data
                        .data
                        .into_iter()
                        .next()
                        .map(|p| p.citation_count.unwrap_or(0)),
                    Err(e) => {
                        warn!(title = %title, error = %e, "Failed to parse paper search");
                        None
                    }
                }
            }
            Ok(response) => {
                warn!(
                    title = %title,
                    status = response.status().as_u16(),
                    "Paper search failed"
                );
                None
            }
            Err(e) => {
                warn!(title = %title, error = %e, "Paper search failed");
                None
            }
        }
    }

    /// Look up citation counts for multiple titles concurrently.
    ///
    /// Returns a vector with the same length and order as the input, with
    /// None for titles that had no match.
    pub async fn lookup_citations_batch(&self, titles: &[String]) -> Vec<Option<u64>> {
        info!(count = titles.len(), "Starting batch citation lookup");

        let futures: Vec<_> = titles
            .iter()
            .map(|title| self.lookup_citations(title))
            .collect();

        let results = join_all(futures).await;

        let matched = results.iter().filter(|r| r.is_some()).count();
        info!(
            total = titles.len(),
            matched = matched,
            "Batch lookup complete"
        );

        results
    }

    /// Search for an author by name, first hit wins.
    async fn search_author(&self, author_name: &str) -> Result<SSAuthor> {
        let url = format!("{}/author/search", SS_API_BASE);

        debug!(url = %url, query = author_name, "Searching author");

        let response = self
            .apply_key(self.client.get(&url))
            .query(&[
                ("query", author_name),
                ("fields", "name,affiliations,citationCount,hIndex"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), error = %error_text, "Author search error");
            return Err(ScholarDashError::Api {
                code: status.as_u16() as i32,
                message: format!("Author search failed: {} - {}", status, error_text),
            });
        }

        let data: SSAuthorSearchResponse = response.json().await.map_err(|e| {
            ScholarDashError::Parse(format!("Failed to parse author search response: {}", e))
        })?;

        data.data
            .into_iter()
            .next()
            .ok_or_else(|| ScholarDashError::NotFound(author_name.to_string()))
    }

    /// Fetch an author's papers.
    async fn fetch_papers(&self, author_id: &str) -> Result<Vec<Publication>> {
        let url = format!("{}/author/{}/papers", SS_API_BASE, author_id);

        debug!(url = %url, "Fetching author papers");

        let limit = MAX_PAPERS.to_string();
        let response = self
            .apply_key(self.client.get(&url))
            .query(&[
                ("fields", "title,year,citationCount,url"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), error = %error_text, "Papers request error");
            return Err(ScholarDashError::Api {
                code: status.as_u16() as i32,
                message: format!("Papers request failed: {} - {}", status, error_text),
            });
        }

        let data: SSPapersResponse = response.json().await.map_err(|e| {
            ScholarDashError::Parse(format!("Failed to parse papers response: {}", e))
        })?;

        Ok(data.data.into_iter().map(publication_from_paper).collect())
    }

    /// Attach the API key header when one is configured.
    fn apply_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("x-api-key", key),
            None => request,
        }
    }
}

// === Semantic Scholar API Response Types ===

#[derive(Debug, Deserialize)]
struct SSAuthorSearchResponse {
    #[serde(default)]
    data: Vec<SSAuthor>,
}

#[derive(Debug, Deserialize)]
struct SSAuthor {
    #[serde(rename = "authorId")]
    author_id: Option<String>,
    name: Option<String>,
    affiliations: Option<Vec<String>>,
    #[serde(rename = "citationCount")]
    citation_count: Option<u64>,
    #[serde(rename = "hIndex")]
    h_index: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SSPapersResponse {
    #[serde(default)]
    data: Vec<SSPaper>,
}

#[derive(Debug, Deserialize)]
struct SSPaper {
    title: Option<String>,
    year: Option<i32>,
    #[serde(rename = "citationCount")]
    citation_count: Option<u64>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SSPaperSearchResponse {
    #[serde(default)]
    data: Vec<SSPaperHit>,
}

#[derive(Debug, Deserialize)]
struct SSPaperHit {
    #[serde(rename = "citationCount")]
    citation_count: Option<u64>,
}

/// Convert an API paper record into our publication struct.
///
/// A paper without a title keeps an empty title: it still counts toward the
/// corpus size in downstream percentage calculations.
fn publication_from_paper(paper: SSPaper) -> Publication {
    Publication {
        title: paper.title.unwrap_or_default(),
        year: paper.year,
        citedby: paper.citation_count.unwrap_or(0),
        link: paper.url.unwrap_or_default(),
    }
}

/// Number of publications with at least 10 citations.
pub fn i10_index(pubs: &[Publication]) -> u32 {
    pubs.iter().filter(|p| p.citedby >= 10).count() as u32
}

/// Citation counts summed by publication year, ascending by year.
///
/// Papers without a year are left out of the series.
pub fn cites_per_year(pubs: &[Publication]) -> Vec<(i32, u64)> {
    let mut by_year: std::collections::BTreeMap<i32, u64> = std::collections::BTreeMap::new();
    for publication in pubs {
        if let Some(year) = publication.year {
            *by_year.entry(year).or_insert(0) += publication.citedby;
        }
    }
    by_year.into_iter().collect()
}
