use super::{open, read_records};
use crate::error::{ItemId, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// `movieId,title,...` row of the items file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub title: String,
}

pub fn load_items(path: &Path) -> Result<Vec<ItemRecord>> {
    let file = open(path)?;
    parse_items(file, &path.display().to_string())
}

pub fn parse_items<R: Read>(reader: R, source: &str) -> Result<Vec<ItemRecord>> {
    read_records(reader, source, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_items_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "movieId,title,genres\n10,Alien (1979),Horror|Sci-Fi\n11,Big (1988),Comedy\n"
        )
        .unwrap();

        let items = load_items(file.path()).unwrap();
        assert_eq!(
            items,
            vec![
                ItemRecord {
                    id: 10,
                    title: "Alien (1979)".to_string(),
                },
                ItemRecord {
                    id: 11,
                    title: "Big (1988)".to_string(),
                },
            ]
        );
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let data = "movieId,title\nten,Alien\n";
        assert!(parse_items(data.as_bytes(), "movies").is_err());
    }

    #[test]
    fn missing_file_is_rejected() {
        assert!(load_items(Path::new("./no/such/movies.csv")).is_err());
    }
}
