//! CSV export of result tables.
//!
//! Every family is written to `<directory>/<prefix><suffix>.csv`, where the
//! suffix is empty for the overall table. The feature-selection and
//! bigram-extraction files are the inputs of the plotting step.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::evaluation::results::{Family, ResultRecord, ResultTable};


const HEADER: [&str; 8] = ["method", "classifier", "accuracy", "features", "train_size", "test_size", "details",
                            "condition"];


#[derive(Serialize)]
struct Row<'a> {
    method: &'a str,
    classifier: &'a str,
    accuracy: f32,
    features: usize,
    train_size: usize,
    test_size: usize,
    details: String,
    condition: String,
}


impl<'a> From<&'a ResultRecord> for Row<'a> {
    fn from(record: &'a ResultRecord) -> Row<'a> {
        Row {
            method: &record.method,
            classifier: &record.classifier,
            accuracy: record.accuracy,
            features: record.features,
            train_size: record.train_size,
            test_size: record.test_size,
            details: record.details_string(),
            condition: record.condition.to_string(),
        }
    }
}


pub fn output_path(directory: &Path, prefix: &str, family: Family) -> PathBuf {
    directory.join(format!("{}{}.csv", prefix, family.suffix()))
}


/// Write one table to `path`. The header is written even for an empty table.
pub fn write_csv<P: AsRef<Path>>(table: &ResultTable, path: P) -> Result<()> {

    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;

    writer.write_record(&HEADER)?;

    for record in &table.records {
        writer.serialize(Row::from(record))?;
    }

    writer.flush()?;

    info!(path = %path.as_ref().display(), rows = table.len(), "wrote results");

    Ok(())
}


/// Write every table into `directory`, creating it when missing.
pub fn write_tables(tables: &[ResultTable], directory: &Path, prefix: &str) -> Result<Vec<PathBuf>> {

    fs::create_dir_all(directory)?;

    tables
        .iter()
        .map(|table| {
            let path = output_path(directory, prefix, table.family);
            write_csv(table, &path)?;
            Ok(path)
        })
        .collect()
}
