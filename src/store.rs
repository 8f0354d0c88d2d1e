use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::models::{Catalog, SimilarityMatrix};

/// Errors raised while loading the precomputed artifacts
///
/// All of these are fatal: the service cannot run without a complete,
/// well-formed catalog/matrix pair.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("missing artifact '{}'", .path.display())]
    MissingArtifact { path: PathBuf },

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{}': {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("similarity matrix has {rows} rows but the catalog has {entries} entries")]
    RowCountMismatch { rows: usize, entries: usize },

    #[error("similarity matrix row {row} has {got} columns, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        got: usize,
        expected: usize,
    },
}

/// Immutable catalog + similarity matrix pair
///
/// Loaded once at startup and never mutated afterwards, so handlers can
/// share it behind a plain `Arc` with no locking.
#[derive(Debug)]
pub struct SimilarityStore {
    catalog: Catalog,
    matrix: SimilarityMatrix,
}

impl SimilarityStore {
    /// Loads and validates the catalog and similarity matrix artifacts
    pub fn load(
        catalog_path: impl AsRef<Path>,
        matrix_path: impl AsRef<Path>,
    ) -> Result<Self, StoreError> {
        let catalog: Catalog = read_artifact(catalog_path.as_ref())?;
        let matrix: SimilarityMatrix = read_artifact(matrix_path.as_ref())?;
        Self::from_parts(catalog, matrix)
    }

    /// Builds a store from already-deserialized parts, enforcing that the
    /// matrix is square and sized to the catalog
    pub fn from_parts(catalog: Catalog, matrix: SimilarityMatrix) -> Result<Self, StoreError> {
        if matrix.row_count() != catalog.len() {
            return Err(StoreError::RowCountMismatch {
                rows: matrix.row_count(),
                entries: catalog.len(),
            });
        }

        for (row, scores) in matrix.rows().enumerate() {
            if scores.len() != catalog.len() {
                return Err(StoreError::RowLengthMismatch {
                    row,
                    got: scores.len(),
                    expected: catalog.len(),
                });
            }
        }

        let store = Self { catalog, matrix };
        store.audit_diagonal();
        Ok(store)
    }

    /// Number of catalog entries (= matrix dimension)
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Similarity scores between row `index` and every catalog row
    pub fn similarities(&self, index: usize) -> &[f64] {
        self.matrix.row(index)
    }

    /// Resolves a title to its catalog row, first match wins
    pub fn resolve_index(&self, title: &str) -> AppResult<usize> {
        self.catalog
            .position_of(title)
            .ok_or_else(|| AppError::UnknownTitle(title.to_string()))
    }

    /// Warns if any row's self-similarity is not the row maximum
    ///
    /// The precomputation is expected to make the diagonal maximal. The
    /// engine excludes the query row by index and does not depend on it,
    /// so a violation is reported rather than fatal.
    fn audit_diagonal(&self) {
        let suspect_rows = (0..self.len())
            .filter(|&i| {
                let row = self.matrix.row(i);
                row.iter().any(|&score| score > row[i])
            })
            .count();

        if suspect_rows > 0 {
            tracing::warn!(
                rows = suspect_rows,
                "Similarity diagonal is not the row maximum for some rows"
            );
        }
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    if !path.exists() {
        return Err(StoreError::MissingArtifact {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
