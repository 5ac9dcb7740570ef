use crate::api::Page;
use crate::error::{CatalogError, Result};
use regex::Regex;
use serde_json::json;
use std::cmp::Ordering;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

pub fn build_query(institution: &str, term: &str) -> Result<String> {
    let filter = json!({
        "filters": [
            {"name": "institution", "op": "equals", "val": institution},
            {"name": "term", "op": "equals", "val": term},
        ]
    });
    serde_json::to_string(&filter).map_err(CatalogError::Query)
}

pub fn build_url(base_url: &str, path: &str, query: &str, page: u32) -> String {
    format!(
        "{}{}?q={}&page={}",
        base_url,
        path,
        urlencoding::encode(query),
        page
    )
}

pub fn build_detail_url(base_url: &str, path: &str, id: &str) -> String {
    format!("{}{}/{}", base_url, path, urlencoding::encode(id))
}

/// Pages still to fetch once the first page is in.
pub fn remaining_pages<T>(first: &Page<T>) -> RangeInclusive<u32> {
    2..=first.total_pages
}

fn digit_run(course: &str) -> Option<&str> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new("[0-9]+").expect("static pattern"));
    re.find(course).map(|m| m.as_str())
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Orders display strings by the number in their course code, e.g.
/// "CMPUT 2" before "CMPUT 10". Strings without digits come first.
pub fn compare_course_codes(a: &str, b: &str) -> Ordering {
    let by_number = match (digit_run(a), digit_run(b)) {
        (Some(x), Some(y)) => compare_digits(x, y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_number.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod test {
    use crate::api::{Course, Page};
    use crate::utils::{build_query, build_url, compare_course_codes, remaining_pages};

    fn page(total_pages: u32) -> Page<Course> {
        Page {
            objects: Vec::new(),
            total_pages,
            num_results: None,
        }
    }

    #[test]
    pub fn test_remaining_pages_many() {
        let pages: Vec<u32> = remaining_pages(&page(4)).collect();
        assert_eq!(vec![2, 3, 4], pages);
    }

    #[test]
    pub fn test_remaining_pages_single() {
        assert_eq!(0, remaining_pages(&page(1)).count());
        assert_eq!(0, remaining_pages(&page(0)).count());
    }

    #[test]
    pub fn test_query_shape() {
        let query = build_query("ualberta", "1490").unwrap();
        let value: serde_json::Value = serde_json::from_str(&query).unwrap();
        assert_eq!("institution", value["filters"][0]["name"]);
        assert_eq!("ualberta", value["filters"][0]["val"]);
        assert_eq!("term", value["filters"][1]["name"]);
        assert_eq!("equals", value["filters"][1]["op"]);
        assert_eq!("1490", value["filters"][1]["val"]);
    }

    #[test]
    pub fn test_url_is_encoded() {
        let url = build_url("http://catalog.test", "/api/courses-min-structured", r#"{"a":1}"#, 3);
        assert_eq!(
            "http://catalog.test/api/courses-min-structured?q=%7B%22a%22%3A1%7D&page=3",
            url
        );
    }

    #[test]
    pub fn test_course_codes_numeric_order() {
        let mut courses = vec!["CMPUT 10", "CMPUT 2"];
        courses.sort_by(|a, b| compare_course_codes(a, b));
        assert_eq!(vec!["CMPUT 2", "CMPUT 10"], courses);
    }

    #[test]
    pub fn test_course_codes_without_digits_first() {
        let mut courses = vec!["MATH 100", "MATH Seminar", "MATH 0099"];
        courses.sort_by(|a, b| compare_course_codes(a, b));
        assert_eq!(vec!["MATH Seminar", "MATH 0099", "MATH 100"], courses);
    }
}
