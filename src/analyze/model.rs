use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%d.%m";
pub const OPEN_SENTINEL: &str = "X";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Status {
    Accept,
    Closed,
    Wip,
    Ready,
    BadPr,
    /// `BAD_PR`, only tolerated by the lenient title form.
    BadPrMalformed,
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCEPT" => Ok(Status::Accept),
            "CLOSED" => Ok(Status::Closed),
            "WIP" => Ok(Status::Wip),
            "READY" => Ok(Status::Ready),
            "BADPR" => Ok(Status::BadPr),
            "BAD_PR" => Ok(Status::BadPrMalformed),
            other => Err(format!("Unknown status tag: {}", other)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Status::Accept => "ACCEPT",
            Status::Closed => "CLOSED",
            Status::Wip => "WIP",
            Status::Ready => "READY",
            Status::BadPr => "BADPR",
            Status::BadPrMalformed => "BAD_PR",
        };
        f.write_str(tag)
    }
}

/// End of a submission. `Open` sorts after every date, so taking a maximum
/// keeps an unresolved submission unresolved.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum LabEnd {
    Closed(NaiveDate),
    Open,
}

impl fmt::Display for LabEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabEnd::Closed(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            LabEnd::Open => f.write_str(OPEN_SENTINEL),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct DatePair {
    pub start: NaiveDate,
    pub end: LabEnd,
}

impl DatePair {
    pub fn new(start: NaiveDate, end: LabEnd) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for DatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.start.format(DATE_FORMAT), self.end)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LabRecord {
    pub number: u64,
    pub author: String,
    pub title: String,
    pub lab: u8,
    pub status: Status,
    pub dates: DatePair,
}

impl LabRecord {
    pub fn new(
        number: u64,
        author: impl ToString,
        title: impl ToString,
        lab: u8,
        status: Status,
        dates: DatePair,
    ) -> Self {
        Self {
            number,
            author: author.to_string(),
            title: title.to_string(),
            lab,
            status,
            dates,
        }
    }
}

pub type LabDates = BTreeMap<u8, Vec<DatePair>>;

/// Date observations grouped by student identity, then by lab number.
/// Built once from a record list and only read afterwards.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LabHistory {
    students: BTreeMap<String, LabDates>,
}

impl FromIterator<LabRecord> for LabHistory {
    fn from_iter<I: IntoIterator<Item = LabRecord>>(records: I) -> Self {
        let students = records
            .into_iter()
            .fold(BTreeMap::<String, LabDates>::new(), |mut acc, record| {
                acc.entry(record.author)
                    .or_default()
                    .entry(record.lab)
                    .or_default()
                    .push(record.dates);
                acc
            });
        Self { students }
    }
}

impl LabHistory {
    pub fn labs(&self, identity: &str) -> Option<&LabDates> {
        self.students.get(identity)
    }

    pub fn students(&self) -> impl Iterator<Item = &str> {
        self.students.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, month, day).unwrap()
    }

    fn record(author: &str, lab: u8, dates: DatePair) -> LabRecord {
        LabRecord::new(1, author, "title", lab, Status::Accept, dates)
    }

    #[test]
    fn open_end_sorts_after_any_date() {
        assert!(LabEnd::Open > LabEnd::Closed(date(12, 31)));
        assert!(LabEnd::Closed(date(3, 1)) < LabEnd::Closed(date(3, 2)));
    }

    #[test]
    fn date_pair_renders_day_and_month() {
        let closed = DatePair::new(date(3, 1), LabEnd::Closed(date(3, 5)));
        assert_eq!(closed.to_string(), "01.03 -- 05.03");
        let open = DatePair::new(date(3, 10), LabEnd::Open);
        assert_eq!(open.to_string(), "10.03 -- X");
    }

    #[test]
    fn status_round_trips_through_tag() {
        for tag in ["ACCEPT", "CLOSED", "WIP", "READY", "BADPR", "BAD_PR"] {
            assert_eq!(tag.parse::<Status>().unwrap().to_string(), tag);
        }
        assert!("DONE".parse::<Status>().is_err());
    }

    #[test]
    fn history_groups_by_student_then_lab() {
        let first = DatePair::new(date(3, 1), LabEnd::Closed(date(3, 5)));
        let second = DatePair::new(date(3, 10), LabEnd::Open);
        let history = vec![
            record("ivanov", 2, first),
            record("petrov", 1, first),
            record("ivanov", 2, second),
        ]
        .into_iter()
        .collect::<LabHistory>();

        assert_eq!(history.students().collect::<Vec<_>>(), vec!["ivanov", "petrov"]);
        let ivanov = history.labs("ivanov").unwrap();
        assert_eq!(ivanov.get(&2), Some(&vec![first, second]));
        assert!(ivanov.get(&1).is_none());
        assert!(history.labs("sidorov").is_none());
    }
}
