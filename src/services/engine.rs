use crate::error::AppResult;
use crate::models::Recommendation;
use crate::store::SimilarityStore;

/// Number of recommendations returned per request
pub const RESULT_COUNT: usize = 5;

/// Ranks every other catalog row by similarity to `title` and returns the top `k`
///
/// The query row is excluded by index rather than by assuming its
/// self-similarity sorts first. The sort is stable and descending, so equal
/// scores keep ascending row order. Catalogs with fewer than `k + 1`
/// entries yield fewer results instead of failing.
pub fn recommend(
    store: &SimilarityStore,
    title: &str,
    k: usize,
) -> AppResult<Vec<Recommendation>> {
    let query_index = store.resolve_index(title)?;

    let mut ranked: Vec<(usize, f64)> = store
        .similarities(query_index)
        .iter()
        .copied()
        .enumerate()
        .filter(|&(index, _)| index != query_index)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    if ranked.len() < k {
        tracing::debug!(
            query = %title,
            available = ranked.len(),
            requested = k,
            "Catalog smaller than requested result count, truncating"
        );
    }

    let recommendations = ranked
        .into_iter()
        .take(k)
        .filter_map(|(index, score)| {
            store.catalog().get(index).map(|entry| Recommendation {
                id: entry.id,
                title: entry.title.clone(),
                score,
            })
        })
        .collect();

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Catalog, CatalogEntry, SimilarityMatrix};

    fn entry(id: u64, title: &str) -> CatalogEntry {
        CatalogEntry {
            id,
            title: title.to_string(),
        }
    }

    /// Six-movie store whose "A" row ranks B, D, E, C, F in that order
    fn six_movie_store() -> SimilarityStore {
        let catalog = Catalog::new(vec![
            entry(0, "A"),
            entry(1, "B"),
            entry(2, "C"),
            entry(3, "D"),
            entry(4, "E"),
            entry(5, "F"),
        ]);
        let matrix = SimilarityMatrix::new(vec![
            vec![1.0, 0.9, 0.2, 0.8, 0.5, 0.1],
            vec![0.9, 1.0, 0.3, 0.7, 0.4, 0.2],
            vec![0.2, 0.3, 1.0, 0.6, 0.5, 0.4],
            vec![0.8, 0.7, 0.6, 1.0, 0.3, 0.2],
            vec![0.5, 0.4, 0.5, 0.3, 1.0, 0.6],
            vec![0.1, 0.2, 0.4, 0.2, 0.6, 1.0],
        ]);
        SimilarityStore::from_parts(catalog, matrix).unwrap()
    }

    fn titles(recommendations: &[Recommendation]) -> Vec<&str> {
        recommendations.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_recommend_ranks_by_descending_similarity() {
        let store = six_movie_store();
        let result = recommend(&store, "A", RESULT_COUNT).unwrap();
        assert_eq!(titles(&result), vec!["B", "D", "E", "C", "F"]);
    }

    #[test]
    fn test_recommend_never_includes_the_query_row() {
        let store = six_movie_store();
        for title in ["A", "B", "C", "D", "E", "F"] {
            let result = recommend(&store, title, RESULT_COUNT).unwrap();
            assert!(
                result.iter().all(|r| r.title != title),
                "query {title} appeared in its own results"
            );
        }
    }

    #[test]
    fn test_recommend_scores_are_non_increasing() {
        let store = six_movie_store();
        let result = recommend(&store, "C", RESULT_COUNT).unwrap();
        for pair in result.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_equal_scores_keep_ascending_row_order() {
        let catalog = Catalog::new(vec![
            entry(10, "Query"),
            entry(11, "First"),
            entry(12, "Second"),
            entry(13, "Third"),
        ]);
        let matrix = SimilarityMatrix::new(vec![
            vec![1.0, 0.5, 0.5, 0.5],
            vec![0.5, 1.0, 0.0, 0.0],
            vec![0.5, 0.0, 1.0, 0.0],
            vec![0.5, 0.0, 0.0, 1.0],
        ]);
        let store = SimilarityStore::from_parts(catalog, matrix).unwrap();

        let result = recommend(&store, "Query", RESULT_COUNT).unwrap();
        assert_eq!(titles(&result), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_small_catalog_truncates_instead_of_failing() {
        let catalog = Catalog::new(vec![entry(1, "A"), entry(2, "B"), entry(3, "C")]);
        let matrix = SimilarityMatrix::new(vec![
            vec![1.0, 0.2, 0.8],
            vec![0.2, 1.0, 0.5],
            vec![0.8, 0.5, 1.0],
        ]);
        let store = SimilarityStore::from_parts(catalog, matrix).unwrap();

        let result = recommend(&store, "A", RESULT_COUNT).unwrap();
        assert_eq!(titles(&result), vec!["C", "B"]);
    }

    #[test]
    fn test_unknown_title_is_a_typed_error() {
        let store = six_movie_store();
        let err = recommend(&store, "Not In Catalog", RESULT_COUNT).unwrap_err();
        assert!(matches!(err, AppError::UnknownTitle(title) if title == "Not In Catalog"));
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first_row() {
        let catalog = Catalog::new(vec![
            entry(1, "Twin"),
            entry(2, "Other"),
            entry(3, "Twin"),
        ]);
        let matrix = SimilarityMatrix::new(vec![
            vec![1.0, 0.9, 0.1],
            vec![0.9, 1.0, 0.2],
            vec![0.1, 0.2, 1.0],
        ]);
        let store = SimilarityStore::from_parts(catalog, matrix).unwrap();

        // Row 0 wins the lookup; row 2 (same title) is an ordinary candidate.
        let result = recommend(&store, "Twin", RESULT_COUNT).unwrap();
        assert_eq!(titles(&result), vec!["Other", "Twin"]);
        assert_eq!(result[1].id, 3);
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let store = six_movie_store();
        let first = recommend(&store, "E", RESULT_COUNT).unwrap();
        let second = recommend(&store, "E", RESULT_COUNT).unwrap();
        assert_eq!(first, second);
    }
}
