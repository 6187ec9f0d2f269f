use crate::analyze::Status;
use regex::Regex;
use std::sync::LazyLock;

static STRICT_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(ACCEPT|CLOSED|WIP|READY|BADPR)\] \w+ lab([1-7])$").unwrap()
});

static LENIENT_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(ACCEPT|CLOSED|WIP|READY|BADPR|BAD_PR)\](?:.*\D)?([1-7])$").unwrap()
});

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TitleClass {
    /// `[STATUS] <word> lab<N>`
    Strict { status: Status, lab: u8 },
    /// `[STATUS] ... <N>`, usable but worth a warning.
    Lenient { status: Status, lab: u8 },
    Rejected,
}

impl TitleClass {
    pub fn classify(title: &str) -> Self {
        let title = title.trim();
        if let Some((status, lab)) = capture(&STRICT_TITLE, title) {
            return TitleClass::Strict { status, lab };
        }
        if let Some((status, lab)) = capture(&LENIENT_TITLE, title) {
            return TitleClass::Lenient { status, lab };
        }
        TitleClass::Rejected
    }
}

fn capture(regex: &Regex, title: &str) -> Option<(Status, u8)> {
    let captures = regex.captures(title)?;
    let status = captures.get(1)?.as_str().parse().ok()?;
    let lab = captures.get(2)?.as_str().parse().ok()?;
    Some((status, lab))
}
