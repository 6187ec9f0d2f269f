use crate::analyze::{merge, DatePair, LabHistory};
use crate::model::Repository;
use itertools::Itertools;
use tracing::warn;

pub const FULL_NAME_COLUMN: &str = "Full Name";
pub const IDENTITY_COLUMN: &str = "Identity";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReportRow {
    pub full_name: String,
    pub identity: String,
    /// One entry per lab, lab 1 first.
    pub labs: Vec<Option<DatePair>>,
}

impl ReportRow {
    pub fn cells(&self) -> Vec<String> {
        let labs = self
            .labs
            .iter()
            .map(|lab| lab.map(|dates| dates.to_string()).unwrap_or_default());
        [self.full_name.clone(), self.identity.clone()]
            .into_iter()
            .chain(labs)
            .collect()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReportTable {
    pub header: Vec<String>,
    pub rows: Vec<ReportRow>,
}

pub trait TableBuilder {
    fn build_table(&self, repository: &Repository) -> ReportTable;
}

impl TableBuilder for LabHistory {
    /// One row per roster student, in roster order. Authors missing from the
    /// roster are reported and left out.
    fn build_table(&self, repository: &Repository) -> ReportTable {
        let labs_count = repository.labs_count;

        let unknown = self
            .students()
            .filter(|identity| repository.full_name(identity).is_none())
            .collect::<Vec<_>>();
        for identity in &unknown {
            warn!(
                repo = %repository.name,
                identity = %identity,
                "Pull request author is not in the roster, skipped"
            );
        }

        for (identity, lab) in out_of_range_labs(self, repository) {
            warn!(
                repo = %repository.name,
                identity = %identity,
                lab = lab,
                labs_count = labs_count,
                "Lab number out of the course range, not reported"
            );
        }

        let header = [FULL_NAME_COLUMN.to_string(), IDENTITY_COLUMN.to_string()]
            .into_iter()
            .chain((1..=labs_count).map(|lab| format!("lab{lab}")))
            .collect::<Vec<_>>();

        let rows = repository
            .students
            .iter()
            .map(|(identity, full_name)| {
                let labs = (1..=labs_count)
                    .map(|lab| {
                        self.labs(identity)
                            .and_then(|labs| labs.get(&lab))
                            .and_then(|dates| merge(dates))
                    })
                    .collect();
                ReportRow {
                    full_name: full_name.clone(),
                    identity: identity.clone(),
                    labs,
                }
            })
            .collect();

        ReportTable { header, rows }
    }
}

/// Labs above the course's count, for roster students only.
fn out_of_range_labs<'a>(history: &'a LabHistory, repository: &Repository) -> Vec<(&'a str, u8)> {
    let mut out_of_range = vec![];
    for identity in history.students() {
        if repository.full_name(identity).is_none() {
            continue;
        }
        let Some(labs) = history.labs(identity) else {
            continue;
        };
        out_of_range.extend(
            labs.keys()
                .filter(|lab| **lab > repository.labs_count)
                .map(|lab| (identity, *lab)),
        );
    }
    out_of_range
}

impl ReportTable {
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        std::iter::once(self.header.clone()).chain(self.rows.iter().map(ReportRow::cells))
    }

    pub fn submitted_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.labs.iter())
            .filter(|lab| lab.is_some())
            .count()
    }

    pub fn students_without_submissions(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.labs.iter().all(Option::is_none))
            .map(|row| row.identity.as_str())
            .sorted()
            .collect()
    }
}
