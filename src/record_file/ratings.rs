use super::{open, read_records};
use crate::error::{ItemId, Result, UserId};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// `userId,movieId,rating,...` row, shared by the training and query files.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct RatingRecord {
    pub user: UserId,
    pub item: ItemId,
    pub rating: f64,
}

pub fn load_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    let file = open(path)?;
    parse_ratings(file, &path.display().to_string())
}

pub fn parse_ratings<R: Read>(reader: R, source: &str) -> Result<Vec<RatingRecord>> {
    read_records(reader, source, 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_column_is_ignored() {
        let data = "userId,movieId,rating,timestamp\n1,31,2.5,1260759144\n1,1029,3.0,1260759179\n";
        let ratings = parse_ratings(data.as_bytes(), "ratings").unwrap();
        assert_eq!(
            ratings,
            vec![
                RatingRecord {
                    user: 1,
                    item: 31,
                    rating: 2.5,
                },
                RatingRecord {
                    user: 1,
                    item: 1029,
                    rating: 3.0,
                },
            ]
        );
    }

    #[test]
    fn malformed_rating_is_fatal() {
        let data = "userId,movieId,rating\n1,31,2.5\n1,32,good\n";
        assert!(parse_ratings(data.as_bytes(), "ratings").is_err());
    }
}
