use crate::model::Result;
use crate::report::ReportTable;
use csv::Writer;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn report_path(dir: impl AsRef<Path>, repo_name: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.csv", repo_name))
}

pub trait CsvReport {
    fn write_csv(&self, path: &Path) -> Result<()>;
    fn write_to<W: io::Write>(&self, wtr: W) -> Result<()>;
}

impl CsvReport for ReportTable {
    fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.write_to(fs::File::create(path)?)
    }

    fn write_to<W: io::Write>(&self, wtr: W) -> Result<()> {
        let mut wtr = Writer::from_writer(wtr);
        for record in self.records() {
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{DatePair, LabEnd};
    use crate::report::ReportRow;
    use chrono::NaiveDate;

    fn table() -> ReportTable {
        let date = |month, day| NaiveDate::from_ymd_opt(2020, month, day).unwrap();
        ReportTable {
            header: vec![
                "Full Name".to_string(),
                "Identity".to_string(),
                "lab1".to_string(),
                "lab2".to_string(),
            ],
            rows: vec![
                ReportRow {
                    full_name: "Ivan Ivanov".to_string(),
                    identity: "ivanov".to_string(),
                    labs: vec![
                        Some(DatePair::new(date(3, 1), LabEnd::Closed(date(3, 5)))),
                        Some(DatePair::new(date(3, 10), LabEnd::Open)),
                    ],
                },
                ReportRow {
                    full_name: "Sidorov, Sidor".to_string(),
                    identity: "sidorov".to_string(),
                    labs: vec![None, None],
                },
            ],
        }
    }

    #[test]
    fn csv_layout() {
        let mut buffer = vec![];
        table().write_to(&mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Full Name,Identity,lab1,lab2\n\
             Ivan Ivanov,ivanov,01.03 -- 05.03,10.03 -- X\n\
             \"Sidorov, Sidor\",sidorov,,\n"
        );
    }

    #[test]
    fn csv_file_named_after_repository() {
        let dir = tempfile::tempdir().unwrap();
        let path = report_path(dir.path().join("reports"), "U_C_2020_G1");
        table().write_csv(&path).unwrap();
        assert!(path.ends_with("reports/U_C_2020_G1.csv"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Full Name,Identity,lab1,lab2\n"));
        assert_eq!(written.lines().count(), 3);
    }
}
