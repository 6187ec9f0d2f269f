use indexmap::IndexMap;

/// Student identity (GitHub login) mapped to the student's full name.
pub type Roster = IndexMap<String, String>;

/// One group of a course, hosted in its own repository.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Repository {
    pub name: String,
    pub labs_count: u8,
    pub students: Roster,
}

// New
impl Repository {
    pub fn new(name: impl ToString, labs_count: u8, students: Roster) -> Self {
        Self {
            name: name.to_string(),
            labs_count,
            students,
        }
    }

    pub fn full_name(&self, identity: &str) -> Option<&str> {
        self.students.get(identity).map(String::as_str)
    }
}
