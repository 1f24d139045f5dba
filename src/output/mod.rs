//! Output collaborators: CSV files and the console table.

pub mod csv;
pub mod table;

pub use self::csv::{output_path, write_csv, write_tables};
pub use self::table::{render, sort_records, SortColumn};
