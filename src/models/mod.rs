use serde::{Deserialize, Serialize};

/// One catalog row: a movie the similarity matrix knows about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// TMDB identifier used for poster lookups
    pub id: u64,
    /// Display title; lookups match it exactly, first occurrence wins
    pub title: String,
}

/// Ordered catalog, indexed identically to the similarity matrix
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Row index of the first entry whose title exactly equals `title`
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.title == title)
    }

    /// Titles in row order, for the selection control
    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.title.clone()).collect()
    }
}

/// Precomputed pairwise similarity scores, one row per catalog entry
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Scores between row `index` and every catalog row
    ///
    /// `index` must come from a catalog lookup; the store validates at load
    /// time that every catalog row has a matrix row of matching width.
    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// A ranked recommendation before poster enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub id: u64,
    pub title: String,
    pub score: f64,
}

/// One rendered gallery cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryEntry {
    pub title: String,
    pub poster_url: String,
}

/// Response body for the recommendations endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// The title the user picked
    pub query: String,
    /// Up to five entries, best match first
    pub results: Vec<GalleryEntry>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of TMDB's movie details response used for poster resolution
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}
