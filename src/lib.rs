//! # scholardash
//!
//! Scholar Author Metadata Analysis & HTML Dashboard - Rust CLI
//!
//! ## Modules
//!
//! - [`semanticscholar`] - Semantic Scholar API client for author data
//! - [`wordcloud`] - Term-frequency ranking and tag-cloud layout
//! - [`stopwords`] - Excluded-term configuration
//! - [`dashboard`] - HTML dashboard rendering
//! - [`cache`] - Local author-data cache
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scholardash::{semanticscholar::AuthorClient, stopwords::StopwordSet, wordcloud};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AuthorClient::new(None)?;
//!     let author = client.read_author_data("Jane Doe").await?;
//!     let stopwords = StopwordSet::english();
//!     let cells = wordcloud::compute_layout(
//!         &author.pubs,
//!         &stopwords,
//!         &wordcloud::LayoutOptions::default(),
//!     )?;
//!     println!("Tag cloud has {} cells", cells.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod dashboard;
pub mod error;
pub mod semanticscholar;
pub mod stopwords;
pub mod wordcloud;

pub use error::{Result, ScholarDashError};
