use crate::model::{Repository, Result, Roster};
use serde_json::Value;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Group {
    pub id: String,
    pub students: Roster,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Course {
    pub university: String,
    pub title: String,
    pub year: u32,
    pub labs_count: u8,
    pub groups: Vec<Group>,
}

// New
impl Course {
    pub fn new(
        university: impl ToString,
        title: impl ToString,
        year: u32,
        labs_count: u8,
        groups: Vec<Group>,
    ) -> Self {
        Self {
            university: university.to_string(),
            title: title.to_string(),
            year,
            labs_count,
            groups,
        }
    }
}

// Planner
impl Course {
    pub fn repository_name(&self, group: &Group) -> String {
        format!(
            "{}_{}_{}_{}",
            self.university, self.title, self.year, group.id
        )
    }

    pub fn repositories(&self) -> Vec<Repository> {
        self.groups
            .iter()
            .map(|group| {
                Repository::new(
                    self.repository_name(group),
                    self.labs_count,
                    group.students.clone(),
                )
            })
            .collect()
    }
}

pub fn plan_repositories(courses: &[Course]) -> Vec<Repository> {
    courses.iter().flat_map(Course::repositories).collect()
}

// Parser
impl Course {
    pub(crate) fn parse(details: &Value) -> Result<Self> {
        let Some(university) = details["university"].as_str() else {
            return Err("Not found 'university' field".into());
        };
        let Some(title) = details["title"].as_str() else {
            return Err("Not found 'title' field".into());
        };
        let Some(year) = details["year"].as_u64() else {
            return Err("Not found 'year' field".into());
        };
        let Ok(year) = u32::try_from(year) else {
            return Err(format!("Not a valid year: {}", year).into());
        };
        let Some(labs_count) = details["labs_count"].as_u64() else {
            return Err("Not found 'labs_count' field".into());
        };
        let Ok(labs_count) = u8::try_from(labs_count) else {
            return Err(format!("Not a valid labs count: {}", labs_count).into());
        };
        let groups = match details["groups"].as_array() {
            Some(groups) => groups.iter().map(Group::parse).collect::<Result<Vec<_>>>()?,
            None => return Err("Not found 'groups' field".into()),
        };
        Ok(Self::new(university, title, year, labs_count, groups))
    }
}

impl Group {
    fn parse(details: &Value) -> Result<Self> {
        let id = match &details["id"] {
            Value::String(id) => id.clone(),
            Value::Number(id) => id.to_string(),
            _ => return Err("Not found 'id' field".into()),
        };
        let Some(students) = details["students"].as_object() else {
            return Err(format!("Not found 'students' field in group {}", id).into());
        };
        let mut roster = Roster::new();
        for (identity, full_name) in students {
            let Some(full_name) = full_name.as_str() else {
                return Err(format!("Not a valid full name for student '{}'", identity).into());
            };
            roster.insert(identity.clone(), full_name.to_string());
        }
        Ok(Self { id, students: roster })
    }
}
