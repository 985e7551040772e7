use crate::validate::{self, ValidationError};
use chrono::Local;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's local date in the format stored as `enrollment_date`.
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// One enrolled student, as stored in the backing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub name: String,
    pub age: u32,
    pub grade: String,
    pub email: String,
    pub phone: String,
    // Older files may lack it; those records are treated as enrolled today.
    #[serde(default = "today")]
    pub enrollment_date: String,
}

impl StudentRecord {
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        grade: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            age,
            grade: grade.into(),
            email: email.into(),
            phone: phone.into(),
            enrollment_date: today(),
        }
    }

    /// True if `needle` (already lowercased) occurs in the id, name or email.
    pub fn matches(&self, needle: &str) -> bool {
        self.student_id.to_lowercase().contains(needle)
            || self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

/// Raw field values for a new student, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInput {
    pub student_id: String,
    pub name: String,
    pub age: String,
    pub grade: String,
    pub email: String,
    pub phone: String,
}

impl StudentInput {
    /// Validates every field in prompt order and builds the record.
    pub fn validate(&self) -> Result<StudentRecord, ValidationError> {
        validate::check_id(&self.student_id)?;
        let age = validate::check_age(&self.age)?;
        validate::check_grade(&self.grade)?;
        validate::check_email(&self.email)?;
        validate::check_phone(&self.phone)?;

        Ok(StudentRecord::new(
            self.student_id.trim(),
            self.name.trim(),
            age,
            self.grade.trim(),
            self.email.trim(),
            self.phone.trim(),
        ))
    }
}

/// Fields to overlay on an existing record. `None` or a blank value keeps the
/// current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub age: Option<String>,
    pub grade: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.age, &self.grade, &self.email, &self.phone]
            .iter()
            .all(|v| supplied(v).is_none())
    }

    /// Builds the replacement record. The id and enrollment date always come
    /// from `current`.
    pub fn apply(&self, current: &StudentRecord) -> Result<StudentRecord, ValidationError> {
        let mut next = current.clone();

        if let Some(name) = supplied(&self.name) {
            next.name = name.to_string();
        }
        if let Some(age) = supplied(&self.age) {
            next.age = validate::check_age(age)?;
        }
        if let Some(grade) = supplied(&self.grade) {
            validate::check_grade(grade)?;
            next.grade = grade.to_string();
        }
        if let Some(email) = supplied(&self.email) {
            validate::check_email(email)?;
            next.email = email.to_string();
        }
        if let Some(phone) = supplied(&self.phone) {
            validate::check_phone(phone)?;
            next.phone = phone.to_string();
        }

        Ok(next)
    }
}
