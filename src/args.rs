use crate::config::{DEFAULT_DETAIL_PATH, DEFAULT_PAGE_PATH};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
/// Browse a course catalog grouped by faculty and subject
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Catalog API root
    #[arg(long, env = "CATALOG_API_URL", default_value = "http://localhost:5000")]
    pub base_url: String,

    /// Institution to query
    #[arg(long, env = "CATALOG_INSTITUTION", default_value = "ualberta")]
    pub institution: String,

    /// Term to query
    #[arg(long, env = "CATALOG_TERM")]
    pub term: String,

    /// Paginated listing endpoint
    #[arg(long, default_value = DEFAULT_PAGE_PATH)]
    pub page_path: String,

    /// Course detail endpoint
    #[arg(long, default_value = DEFAULT_DETAIL_PATH)]
    pub detail_path: String,

    /// Filter quiet window in milliseconds
    #[arg(long, default_value_t = 500)]
    pub debounce_ms: u64,

    /// Output directory
    #[arg(long, default_value = ".")]
    pub output_dir: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the catalog as faculty / subject / course
    Catalog {
        /// Only show courses containing this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Use the structured faculty groups instead of flat course records
        #[arg(long)]
        nested: bool,

        /// Order courses by course number
        #[arg(short, long)]
        sort: bool,

        /// Write CSV
        #[arg(short('c'), long("csv"))]
        csv: bool,
    },
    /// Print course descriptions
    Describe {
        /// Course ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Add courses to a schedule
    Plan {
        /// Course ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Filter the catalog interactively from stdin
    Watch,
}
