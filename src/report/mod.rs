pub mod csv;
pub mod table;

pub use self::csv::{report_path, CsvReport};
pub use table::{ReportRow, ReportTable, TableBuilder};
