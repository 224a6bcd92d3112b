pub mod items;
pub mod ratings;

use crate::error::{RecommendError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub use self::{items::ItemRecord, ratings::RatingRecord};

// every input file is comma separated, `"` quoted and starts with a header line.
// records are read by position, so header names and trailing columns
// (genres, timestamp) don't matter.
fn read_records<T, R>(reader: R, source: &str, columns: usize) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line());
            invalid(source, line, e)
        })?;
        let line = record.position().map(|p| p.line());
        if record.len() < columns {
            return Err(invalid(
                source,
                line,
                format!("expected {} fields, found {}", columns, record.len()),
            ));
        }
        let used = record.iter().take(columns).collect::<StringRecord>();
        let parsed = used.deserialize(None).map_err(|e| invalid(source, line, e))?;
        records.push(parsed);
    }
    debug!("read {} records from {}", records.len(), source);

    Ok(records)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        RecommendError::InvalidInput(format!("failed to open {}: {}", path.display(), e))
    })
}

fn invalid(source: &str, line: Option<u64>, e: impl std::fmt::Display) -> RecommendError {
    match line {
        Some(line) => RecommendError::InvalidInput(format!("{} line {}: {}", source, line, e)),
        None => RecommendError::InvalidInput(format!("{}: {}", source, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_skipped_and_quotes_are_honored() {
        let data = "movieId,title,genres\n1,\"Heat, The (1995)\",Action\n2,Up,Animation\n";
        let items: Vec<ItemRecord> = read_records(data.as_bytes(), "movies", 2).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].title, "Heat, The (1995)");
        assert_eq!(items[1].title, "Up");
    }

    #[test]
    fn short_record_names_its_line() {
        let data = "userId,movieId,rating\n1,2,3.5\n1,3\n";
        let err =
            read_records::<RatingRecord, _>(data.as_bytes(), "ratings", 3).unwrap_err();
        match err {
            RecommendError::InvalidInput(msg) => assert!(msg.contains("line 3"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_body_reads_nothing() {
        let data = "movieId,title\n";
        let items: Vec<ItemRecord> = read_records(data.as_bytes(), "movies", 2).unwrap();
        assert!(items.is_empty());
    }
}
