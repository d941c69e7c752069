use serde::{Deserialize, Serialize};

/// Roster entry
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct StudentRecord {
    pub full_name: String,
    pub username: String,
}

impl StudentRecord {
    pub fn new(full_name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            username: username.into(),
        }
    }
}

/// Account generated by the batch creation call
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CreatedStudent {
    pub full_name: String,
    pub username: String,
    pub password: String,
}

/// Body of create / remove / add-to-another-class calls
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct StudentBatchRequest {
    pub class_code: String,
    pub students: Vec<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct CreatedStudents {
    #[serde(default)]
    pub students: Vec<CreatedStudent>,
    #[serde(default)]
    pub count: usize,
}

/// Raw create-students reply. Unlike the other endpoints it carries
/// `class_name` and `file_url` next to `data`.
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct CreateStudentsReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: CreatedStudents,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

/// What the "students created" screen shows once, then forgets
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct StudentCreationResult {
    pub class_title: Option<String>,
    pub students: Vec<CreatedStudent>,
    pub file_url: Option<String>,
}

impl StudentCreationResult {
    pub fn students_count(&self) -> usize {
        self.students.len()
    }
}

impl From<CreateStudentsReply> for StudentCreationResult {
    fn from(reply: CreateStudentsReply) -> Self {
        Self {
            class_title: reply.class_name,
            students: reply.data.students,
            file_url: reply.file_url,
        }
    }
}

/// One editable row of the create-student form
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub struct DraftStudentRow {
    pub name: String,
}

impl DraftStudentRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn creation_reply_keeps_file_and_class_name() {
        let reply: CreateStudentsReply = serde_json::from_value(json!({
            "success": true,
            "message": "Students added successfully",
            "data": {
                "students": [
                    { "full_name": "Bob", "username": "bob42", "password": "x1y2" }
                ],
                "count": 1
            },
            "class_name": "Grade 3",
            "file_url": "/media/created_students_t1.csv"
        }))
        .unwrap();

        let result = StudentCreationResult::from(reply);
        assert_eq!(result.class_title.as_deref(), Some("Grade 3"));
        assert_eq!(result.students_count(), 1);
        assert_eq!(result.students[0].username, "bob42");
        assert_eq!(result.file_url.as_deref(), Some("/media/created_students_t1.csv"));
    }
}
