mod multi_progress;
mod progress_style;

pub use multi_progress::{MultiProgressNew, ProgressWriter};
pub use progress_style::ProgressStyleTemplate;
