use super::storage::{ItemCatalog, RatingStore};
use crate::error::{ItemId, RecommendError, Result};
use std::collections::HashSet;

/// Widest rating gap on the 0-5 scale, less a small margin.
pub const MAX_RATING_SPAN: f64 = 4.5;

/// Computes item similarities on demand and memoizes them in the catalog.
#[derive(Clone, Debug, Default)]
pub struct SimilarityEngine {
    computations: usize,
}

impl SimilarityEngine {
    /// Similarity of `a` and `b`, served from `a`'s cache when present.
    ///
    /// A fresh value is written into the caches of both items before it is
    /// returned, so each unordered pair is computed once per run.
    pub fn similarity(
        &mut self,
        catalog: &mut ItemCatalog,
        ratings: &RatingStore,
        a: ItemId,
        b: ItemId,
    ) -> Result<f64> {
        if let Some(cached) = catalog.cached_similarity(a, b) {
            return Ok(cached);
        }
        let (item_a, item_b) = match (catalog.item(a), catalog.item(b)) {
            (Some(item_a), Some(item_b)) => (item_a, item_b),
            (_, None) => return Err(RecommendError::UnknownItem(b)),
            (None, _) => return Err(RecommendError::UnknownItem(a)),
        };

        let raters_b = item_b.raters.iter().copied().collect::<HashSet<_>>();
        let diffs = item_a
            .raters
            .iter()
            .filter(|user| raters_b.contains(*user))
            .filter_map(|&user| {
                let diff = ratings.rating(user, a)? - ratings.rating(user, b)?;
                Some(diff.abs())
            })
            .collect::<Vec<_>>();
        let co_raters = diffs.len();
        let similarity = mean_diff_similarity(&diffs);
        debug!(
            "similarity: {} ~ {}, co-raters: {}, similarity: {}",
            a, b, co_raters, similarity
        );

        catalog.store_similarity(a, b, similarity);
        self.computations += 1;
        Ok(similarity)
    }

    /// Number of pairs actually computed, cache hits excluded.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

fn mean_diff_similarity(diffs: &[f64]) -> f64 {
    if diffs.is_empty() {
        return 0.0;
    }
    let mean = diffs.iter().sum::<f64>() / diffs.len() as f64;
    1.0 - mean / MAX_RATING_SPAN
}
