use indicatif::ProgressStyle;

const SPINNER_TEMPLATE: &str = "{spinner} {wide_msg}";
const REPOSITORIES_TEMPLATE: &str = "{spinner} {msg:30} {wide_bar} {pos:>3}/{len:3}";

pub struct ProgressStyleTemplate;

impl ProgressStyleTemplate {
    pub fn spinner() -> ProgressStyle {
        ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn repositories() -> ProgressStyle {
        ProgressStyle::with_template(REPOSITORIES_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
    }
}
