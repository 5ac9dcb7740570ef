pub mod aggregate;
pub mod api;
pub mod args;
pub mod config;
pub mod debounce;
pub mod description;
pub mod error;
pub mod fetcher;
pub mod schedule;
pub mod utils;

use crate::aggregate::{CatalogLoader, GroupedCatalog, Grouping, NestedCatalog};
use crate::args::{Args, Command};
use crate::config::CatalogConfig;
use crate::debounce::{DebounceState, Debouncer, Normalize};
use crate::description::DescriptionLoader;
use crate::fetcher::CatalogClient;
use crate::schedule::ScheduleList;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

pub async fn run(args: Arc<Args>) -> Result<()> {
    let config = CatalogConfig::from(&*args);
    let client = CatalogClient::new(config)?;

    match &args.command {
        Command::Catalog {
            filter,
            nested,
            sort,
            csv,
        } => {
            let filter = filter.as_deref().unwrap_or_default();
            let output_dir = csv.then_some(args.output_dir.as_str());
            if *nested {
                show_catalog::<NestedCatalog>(client, filter, *sort, output_dir).await
            } else {
                show_catalog::<GroupedCatalog>(client, filter, *sort, output_dir).await
            }
        }
        Command::Describe { ids } => describe(client, ids).await,
        Command::Plan { ids } => plan(client, ids).await,
        Command::Watch => watch(client).await,
    }
}

fn progress_bar() -> Result<ProgressBar> {
    let pb = ProgressBar::new(1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} pages")?
            .progress_chars("=> "),
    );
    Ok(pb)
}

async fn load_catalog<G: Grouping>(client: CatalogClient) -> Result<G> {
    let loader = CatalogLoader::new(client).with_progress(progress_bar()?);
    let report = match loader.load::<G>().await {
        Ok(report) => report,
        Err(e) => {
            let notice = e.notice();
            return Err(anyhow::Error::new(e).context(notice));
        }
    };
    for failure in &report.failures {
        eprintln!("Page {}: {}", failure.page, failure.error.notice());
    }
    Ok(report.catalog)
}

async fn show_catalog<G: Grouping>(
    client: CatalogClient,
    filter: &str,
    sort: bool,
    output_dir: Option<&str>,
) -> Result<()> {
    let config = client.config().clone();
    let mut catalog = load_catalog::<G>(client).await?.filtered(filter);
    if sort {
        catalog.sort_courses();
    }
    print!("{}", catalog);

    if let Some(dir) = output_dir {
        let path = Path::new(dir).join(format!(
            "catalog-{}-{}.csv",
            config.institution, config.term
        ));
        let mut writer = csv::Writer::from_path(&path)?;
        for row in catalog.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        info!("Wrote {} courses to {}", catalog.course_count(), path.display());
    }
    Ok(())
}

async fn describe(client: CatalogClient, ids: &[String]) -> Result<()> {
    let mut loader = DescriptionLoader::new(client);
    for id in ids {
        match loader.load(id).await {
            Ok(()) => println!("{}: {}", id, loader.get(id).unwrap_or_default()),
            Err(e) => eprintln!("{}", e.notice()),
        }
    }
    Ok(())
}

async fn plan(client: CatalogClient, ids: &[String]) -> Result<()> {
    let catalog = load_catalog::<NestedCatalog>(client).await?;
    let mut schedule = ScheduleList::default();
    for id in ids {
        match catalog.find_course(id) {
            Some(course) => {
                if !schedule.add(course.clone()) {
                    println!("{} is already in the schedule", course.as_string);
                }
            }
            None => eprintln!("No course with id {}", id),
        }
    }
    for course in schedule.courses() {
        println!("{} ({}, {})", course.as_string, course.subject, course.faculty);
    }
    println!("{} course(s) in cart", schedule.cart_count());
    Ok(())
}

async fn watch(client: CatalogClient) -> Result<()> {
    let delay = client.config().debounce;
    let mut catalog = load_catalog::<GroupedCatalog>(client).await?;
    catalog.sort_courses();

    let debouncer = Debouncer::new(delay).with_normalize(Normalize::Lowercase);
    let mut active = debouncer.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("{}", catalog);

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => debouncer.input(line.trim()),
                None => break,
            },
            changed = active.changed() => {
                changed?;
                render_filtered(&catalog, &active.borrow_and_update());
            }
        }
    }

    if debouncer.state() == DebounceState::Pending {
        active.changed().await?;
        render_filtered(&catalog, &active.borrow_and_update());
    }
    Ok(())
}

fn render_filtered(catalog: &GroupedCatalog, filter: &str) {
    println!("--- filter: {:?}", filter);
    print!("{}", catalog.filtered(filter));
}
