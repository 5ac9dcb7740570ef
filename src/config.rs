use crate::args::Args;
use std::time::Duration;

pub const DEFAULT_PAGE_PATH: &str = "/api/courses-min-structured";
pub const DEFAULT_DETAIL_PATH: &str = "/api/courses";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub institution: String,
    pub term: String,
    pub page_path: String,
    pub detail_path: String,
    pub debounce: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>, institution: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            institution: institution.into(),
            term: term.into(),
            page_path: DEFAULT_PAGE_PATH.to_string(),
            detail_path: DEFAULT_DETAIL_PATH.to_string(),
            debounce: Duration::from_millis(500),
        }
    }
}

impl From<&Args> for CatalogConfig {
    fn from(args: &Args) -> Self {
        let mut config = CatalogConfig::new(&args.base_url, &args.institution, &args.term);
        config.page_path = args.page_path.clone();
        config.detail_path = args.detail_path.clone();
        config.debounce = Duration::from_millis(args.debounce_ms);
        config
    }
}
