//! Dataset loading.
//!
//! A dataset is a sequence of `(identifier, raw text)` pairs. It is read
//! either from a directory holding one file per document, where the file
//! name is the identifier, or from a CSV file with `identifier` and `text`
//! columns. Directory entries are read in file-name order so that repeated
//! runs see the same input order.
//!
//! The class label of a document is the part of its identifier before the
//! first label delimiter: `sci.space_60804` has label `sci.space`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};


/// One document as read from disk.
#[derive(Deserialize)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    pub identifier: String,
    pub text: String,
}


impl RawDocument {
    pub fn new<I: Into<String>, T: Into<String>>(identifier: I, text: T) -> RawDocument {
        RawDocument {
            identifier: identifier.into(),
            text: text.into(),
        }
    }
}


/// Label encoded in a document identifier.
pub fn label_from_identifier(identifier: &str, delimiter: char) -> &str {
    identifier.split(delimiter).next().unwrap_or(identifier)
}


fn read_directory(path: &Path) -> Result<Vec<RawDocument>> {

    let mut entries = fs::read_dir(path)?
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|entry| entry.path().is_file())
        .collect::<Vec<_>>();

    entries.sort_by_key(|entry| entry.file_name());

    entries
        .into_iter()
        .map(|entry| -> Result<RawDocument> {
            let bytes = fs::read(entry.path())?;
            Ok(RawDocument {
                identifier: entry.file_name().to_string_lossy().into_owned(),
                text: String::from_utf8_lossy(&bytes).into_owned(),
            })
        })
        .collect()
}


fn read_csv(path: &Path) -> Result<Vec<RawDocument>> {
    let mut reader = csv::Reader::from_path(path)?;

    reader
        .deserialize()
        .map(|record| record.map_err(Error::from))
        .collect()
}


/// Read every document of a dataset.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<RawDocument>> {

    let path = path.as_ref();

    let documents = if path.is_dir() {
        read_directory(path)?
    } else {
        read_csv(path)?
    };

    info!(path = %path.display(), documents = documents.len(), "read dataset");

    Ok(documents)
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn label_is_identifier_prefix() {
        assert_eq!(label_from_identifier("sci.space_60804", '_'), "sci.space");
        assert_eq!(label_from_identifier("a_b_c", '_'), "a");
        assert_eq!(label_from_identifier("plain", '_'), "plain");
    }

    #[test]
    fn reads_directory_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_2"), "second text").unwrap();
        fs::write(dir.path().join("a_1"), "first text").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let documents = read_dataset(dir.path()).unwrap();

        assert_eq!(documents, vec![RawDocument::new("a_1", "first text"),
                                   RawDocument::new("b_2", "second text")]);
    }

    #[test]
    fn reads_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "identifier,text").unwrap();
        writeln!(file, "sport_1,\"goal, match\"").unwrap();
        writeln!(file, "space_1,orbit").unwrap();

        let documents = read_dataset(file.path()).unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].text, "goal, match");
    }

    #[test]
    fn missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();

        assert!(read_dataset(dir.path().join("absent.csv")).is_err());
    }
}
