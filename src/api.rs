use serde::{Deserialize, Deserializer, Serialize};

/// One page of the catalog listing.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub objects: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub num_results: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub faculty: String,
    pub subject: String,
    pub as_string: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubjectGroup {
    pub subject: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FacultyGroup {
    pub faculty: String,
    #[serde(default)]
    pub subjects: Vec<SubjectGroup>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub course_description: String,
}

/// A flattened accordion row, written out by `--csv`.
#[derive(Serialize)]
pub struct CatalogRow<'a> {
    pub faculty: &'a str,
    pub subject: &'a str,
    pub course: &'a str,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
