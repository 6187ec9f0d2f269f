use crate::analyze::{DatePair, LabEnd, LabHistory, LabRecord, TitleClass};
use crate::github::{PullRequest, PullRequestState};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<LabRecord>,
    /// Accepted through the lenient title form only.
    pub weak: usize,
    /// Numbers of pull requests whose titles carry no lab metadata.
    pub rejected: Vec<u64>,
}

pub trait LabAnalyzer {
    fn extract_records(&self) -> Extraction;

    fn analyze_labs(&self) -> LabHistory {
        self.extract_records().records.into_iter().collect()
    }
}

impl LabAnalyzer for [PullRequest] {
    fn extract_records(&self) -> Extraction {
        let extraction = self.iter().fold(Extraction::default(), |mut acc, pull_request| {
            match TitleClass::classify(&pull_request.title) {
                TitleClass::Strict { status, lab } => {
                    acc.records.push(LabRecord::new(
                        pull_request.number,
                        &pull_request.user.login,
                        &pull_request.title,
                        lab,
                        status,
                        pull_request.dates(),
                    ));
                }
                TitleClass::Lenient { status, lab } => {
                    warn!(
                        number = pull_request.number,
                        author = %pull_request.user.login,
                        title = %pull_request.title,
                        "Weak pull request title"
                    );
                    acc.weak += 1;
                    acc.records.push(LabRecord::new(
                        pull_request.number,
                        &pull_request.user.login,
                        &pull_request.title,
                        lab,
                        status,
                        pull_request.dates(),
                    ));
                }
                TitleClass::Rejected => {
                    error!(
                        number = pull_request.number,
                        author = %pull_request.user.login,
                        title = %pull_request.title,
                        "Bad pull request title, skipped"
                    );
                    acc.rejected.push(pull_request.number);
                }
            }
            acc
        });

        for record in &extraction.records {
            debug!(
                status = %record.status,
                lab = record.lab,
                "{}\t{}\t{}\t{}",
                record.number, record.author, record.title, record.dates
            );
        }
        info!(
            accepted = extraction.records.len(),
            weak = extraction.weak,
            rejected = extraction.rejected.len(),
            "Pull requests analyzed"
        );
        extraction
    }
}

impl PullRequest {
    /// Creation date and, for closed pull requests, closing date.
    pub fn dates(&self) -> DatePair {
        let end = match (self.state, self.closed_at) {
            (PullRequestState::Closed, Some(closed_at)) => LabEnd::Closed(closed_at.date_naive()),
            _ => LabEnd::Open,
        };
        DatePair::new(self.created_at.date_naive(), end)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analyze::Status;
    use crate::github::Author;
    use chrono::{NaiveDate, TimeZone, Utc};

    pub(crate) fn pull_request(
        number: u64,
        login: &str,
        title: &str,
        created: (u32, u32),
        closed: Option<(u32, u32)>,
    ) -> PullRequest {
        let at = |(month, day): (u32, u32)| Utc.with_ymd_and_hms(2020, month, day, 12, 0, 0).unwrap();
        PullRequest {
            number,
            title: title.to_string(),
            user: Author {
                login: login.to_string(),
            },
            created_at: at(created),
            closed_at: closed.map(at),
            state: if closed.is_some() {
                PullRequestState::Closed
            } else {
                PullRequestState::Open
            },
        }
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, month, day).unwrap()
    }

    #[test]
    fn dates_of_closed_and_open_pull_requests() {
        let closed = pull_request(1, "ivanov", "t", (3, 1), Some((3, 5)));
        assert_eq!(
            closed.dates(),
            DatePair::new(date(3, 1), LabEnd::Closed(date(3, 5)))
        );
        let open = pull_request(2, "ivanov", "t", (3, 10), None);
        assert_eq!(open.dates(), DatePair::new(date(3, 10), LabEnd::Open));
    }

    #[test]
    fn closed_state_without_date_stays_open() {
        let mut pr = pull_request(1, "ivanov", "t", (3, 1), None);
        pr.state = PullRequestState::Closed;
        assert_eq!(pr.dates().end, LabEnd::Open);
    }

    #[test]
    fn extraction_keeps_valid_and_weak_titles() {
        let pull_requests = vec![
            pull_request(1, "ivanov", "[ACCEPT] ivanov lab3", (3, 1), Some((3, 5))),
            pull_request(2, "petrov", "[WIP] petrov_lab2", (3, 2), None),
            pull_request(3, "sidorov", "some random text", (3, 3), None),
        ];
        let extraction = pull_requests.extract_records();

        assert_eq!(extraction.weak, 1);
        assert_eq!(extraction.rejected, vec![3]);
        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.records[0].status, Status::Accept);
        assert_eq!(extraction.records[0].lab, 3);
        assert_eq!(extraction.records[1].author, "petrov");
        assert_eq!(extraction.records[1].lab, 2);
    }

    #[test]
    fn rejected_pull_requests_leave_no_trace_in_history() {
        let pull_requests = vec![pull_request(1, "sidorov", "fix typo", (3, 3), None)];
        assert!(pull_requests.analyze_labs().is_empty());
    }
}
