// One student entry. Immutable once built; the store only moves whole records.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: i32,
    name: String,
    age: i32,
    course: String,
}

impl Record {
    pub fn new(id: i32, name: impl Into<String>, age: i32, course: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            course: course.into(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    /// Labeled lines in fixed order: ID, Name, Age, Course.
    pub fn render(&self) -> String {
        format!(
            "ID     : {}\nName   : {}\nAge    : {}\nCourse : {}",
            self.id, self.name, self.age, self.course
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
