use super::accuracy::{self, Report};
use super::similarity::SimilarityEngine;
use super::storage::{ItemCatalog, RatingStore};
use crate::error::{ItemId, RecommendError, Result, UserId};
use crate::record_file::{items::load_items, ratings::load_ratings, ItemRecord, RatingRecord};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Prediction returned when the user's ratings carry no similarity weight.
pub const FALLBACK_RATING: f64 = 2.5;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub user: UserId,
    pub title: String,
    pub predicted: f64,
    pub actual: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Recommender {
    ratings: RatingStore,
    catalog: ItemCatalog,
    similarity: SimilarityEngine,
}

impl Recommender {
    /// Builds both stores. Items go in first since every rating must
    /// reference a catalogued item; any bad record fails the whole load.
    pub fn new(items: Vec<ItemRecord>, ratings: Vec<RatingRecord>) -> Result<Self> {
        let mut recommender = Self::default();
        for item in items {
            recommender.catalog.add_item(item.id, item.title);
        }
        for record in ratings {
            recommender.catalog.add_rater(record.item, record.user)?;
            recommender.ratings.insert(record.user, record.item, record.rating);
        }
        info!(
            "recommender init, items: {}, users: {}, ratings: {}",
            recommender.catalog.len(),
            recommender.ratings.user_count(),
            recommender.ratings.rating_count()
        );
        Ok(recommender)
    }

    pub fn from_files(items_path: &Path, ratings_path: &Path) -> Result<Self> {
        let start = Instant::now();
        let items = load_items(items_path)?;
        let ratings = load_ratings(ratings_path)?;
        let recommender = Self::new(items, ratings)?;
        let elapsed = start.elapsed().as_secs_f64();
        info!(
            "load {} and {} spends {}s",
            items_path.display(),
            ratings_path.display(),
            elapsed
        );
        Ok(recommender)
    }

    pub fn similarity(&mut self, a: ItemId, b: ItemId) -> Result<f64> {
        self.similarity.similarity(&mut self.catalog, &self.ratings, a, b)
    }

    /// Predicted rating of `item` by `user`.
    ///
    /// An existing rating is returned as is. Otherwise the user's ratings are
    /// averaged, weighted by each rated item's similarity to `item`. Rated
    /// items are visited in id order, so the sums are reproducible.
    pub fn predict(&mut self, user: UserId, item: ItemId) -> Result<f64> {
        if !self.ratings.contains_user(user) || !self.catalog.contains(item) {
            return Err(RecommendError::BadInput { user, item });
        }
        if let Some(rating) = self.ratings.rating(user, item) {
            return Ok(rating);
        }

        let rated = self
            .ratings
            .ratings_of(user)
            .into_iter()
            .flatten()
            .map(|(&seen, &rating)| (seen, rating))
            .collect::<Vec<_>>();

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (seen, rating) in rated {
            let weight = self.similarity(item, seen)?;
            numerator += rating * weight;
            denominator += weight;
        }

        if denominator == 0.0 {
            debug!(
                "predict: user {} item {} has no weight, fallback",
                user, item
            );
            return Ok(FALLBACK_RATING);
        }
        Ok(numerator / denominator)
    }

    /// Predicts every query in order. The first failing query aborts the batch.
    pub fn predict_batch(&mut self, records: &[RatingRecord]) -> Result<Vec<Prediction>> {
        let start = Instant::now();
        let mut predictions = Vec::with_capacity(records.len());
        for (n, record) in records.iter().enumerate() {
            let predicted = self.predict(record.user, record.item).map_err(|e| {
                warn!("predict query record {} failed: {}", n + 1, e);
                e
            })?;
            let title = self
                .catalog
                .title(record.item)
                .ok_or(RecommendError::BadInput {
                    user: record.user,
                    item: record.item,
                })?
                .to_string();
            predictions.push(Prediction {
                user: record.user,
                title,
                predicted,
                actual: record.rating,
            });
        }
        let elapsed = start.elapsed().as_secs_f64();
        info!(
            "predict {} queries spends {}s, similarities computed: {}",
            predictions.len(),
            elapsed,
            self.similarity.computations()
        );
        Ok(predictions)
    }

    pub fn predict_file(&mut self, path: &Path) -> Result<Vec<Prediction>> {
        let records = load_ratings(path)?;
        self.predict_batch(&records)
    }

    pub fn correlation(&self, predicted: &[f64], actual: &[f64]) -> Result<f64> {
        accuracy::correlation(predicted, actual)
    }

    /// Summarizes a batch; an undefined correlation is logged and left out.
    pub fn report(&self, predictions: Vec<Prediction>) -> Report {
        let predicted = predictions.iter().map(|p| p.predicted).collect::<Vec<_>>();
        let actual = predictions.iter().map(|p| p.actual).collect::<Vec<_>>();
        let correlation = match self.correlation(&predicted, &actual) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("no correlation for this batch: {}", e);
                None
            }
        };
        Report::new(predictions, correlation)
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn computations(&self) -> usize {
        self.similarity.computations()
    }
}
