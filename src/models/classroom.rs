use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct CreateClassRequest {
    pub title: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ClassCodeRequest {
    pub class_code: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UpdateClassRequest {
    pub class_code: String,
    pub title: String,
}

/// `data` of the create-classroom reply
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct CreatedClass {
    pub title: String,
    pub class_code: String,
    #[serde(default)]
    pub teacher: String,
}

/// One entry of the teacher's classroom list
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ClassSummary {
    #[serde(rename = "classroom_code")]
    pub code: String,
    #[serde(rename = "classroom_title")]
    pub title: String,
    #[serde(default)]
    pub student_count: u32,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ClassDetail {
    #[serde(rename = "class_code", default)]
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub student_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_names_map_to_fields() {
        let list: Vec<ClassSummary> = serde_json::from_value(json!([
            { "classroom_code": "ABC123", "classroom_title": "Mathematics", "student_count": 25 },
            { "classroom_code": "XYZ999", "classroom_title": "Science" }
        ]))
        .unwrap();
        assert_eq!(list[0].code, "ABC123");
        assert_eq!(list[0].student_count, 25);
        assert_eq!(list[1].student_count, 0);

        let detail: ClassDetail = serde_json::from_value(json!({
            "title": "Mathematics", "class_code": "ABC123", "student_count": 25
        }))
        .unwrap();
        assert_eq!(detail.code, "ABC123");
        assert_eq!(detail.title, "Mathematics");
    }
}
