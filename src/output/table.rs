//! Console table of result records, sortable by any column.

use std::cmp::Ordering;

use clap::ValueEnum;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::{Deserialize, Serialize};

use crate::evaluation::results::{ResultRecord, ResultTable};


#[derive(Serialize, Deserialize, ValueEnum)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Method,
    Classifier,
    Accuracy,
    Features,
    TrainSize,
    TestSize,
}


fn compare(a: &ResultRecord, b: &ResultRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Method => a.method.cmp(&b.method),
        SortColumn::Classifier => a.classifier.cmp(&b.classifier),
        SortColumn::Accuracy => a.accuracy.partial_cmp(&b.accuracy).unwrap_or(Ordering::Equal),
        SortColumn::Features => a.features.cmp(&b.features),
        SortColumn::TrainSize => a.train_size.cmp(&b.train_size),
        SortColumn::TestSize => a.test_size.cmp(&b.test_size),
    }
}


/// Stable sort; equal rows keep their order in either direction.
pub fn sort_records(records: &mut [ResultRecord], column: SortColumn, descending: bool) {
    records.sort_by(|a, b| {
        let ordering = compare(a, b, column);
        if descending { ordering.reverse() } else { ordering }
    });
}


pub fn render(table: &ResultTable, sort_by: SortColumn, descending: bool) -> Table {

    let mut records = table.records.clone();
    sort_records(&mut records, sort_by, descending);

    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Method", "Classifier", "Accuracy", "Features", "Train", "Test", "Details", "Condition"]);

    for record in &records {
        out.add_row(vec![
            Cell::new(&record.method),
            Cell::new(&record.classifier),
            Cell::new(format!("{:.4}", record.accuracy)).set_alignment(CellAlignment::Right),
            Cell::new(record.features).set_alignment(CellAlignment::Right),
            Cell::new(record.train_size).set_alignment(CellAlignment::Right),
            Cell::new(record.test_size).set_alignment(CellAlignment::Right),
            Cell::new(record.details_string()),
            Cell::new(record.condition.to_string()),
        ]);
    }

    out
}
