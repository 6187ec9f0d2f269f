pub mod analyzer;
pub mod merge;
pub mod model;
pub mod title;

pub use analyzer::LabAnalyzer;
pub use merge::merge;
pub use model::{DatePair, LabEnd, LabHistory, LabRecord, Status};
pub use title::TitleClass;
