//! portal-host: stand-in Presentation Layer for the learning portal.
//!
//! Performs one page load (hydrate + count a visit of `--page`), runs
//! at most one intent or query, and prints the structured result as
//! JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use portal_kernel::domain::{CourseCategory, CourseId, ResourceFilter, ResourceId, ResourceType};
use portal_runtime::config::{Backend, PortalConfig};
use portal_runtime::session::Portal;

#[derive(Parser)]
#[command(name = "portal-host")]
#[command(about = "Drive the learning portal session state from the command line")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "portal.toml")]
    config: PathBuf,

    /// Data directory; implies the file backend
    #[arg(short, long, env = "PORTAL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Page identifier counted for this load
    #[arg(short, long, default_value = "index.html")]
    page: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List courses, optionally by category (technical, academic, skill, all)
    Courses {
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// List resources by type (notes, video, assignment, paper, all) and title text
    Resources {
        #[arg(long = "type", default_value = "all")]
        kind: String,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one course with its details, enrollment and rating
    Course { id: u32 },
    /// Enroll in a course
    Enroll { id: u32 },
    /// Toggle a resource bookmark
    Bookmark { id: u32 },
    /// Rate a course; an empty value is ignored
    Rate { id: u32, value: String },
    /// Simulate a resource download
    Download { id: u32 },
    /// Dashboard aggregate
    Stats,
    /// Enrolled, bookmarked and rated items resolved against the catalog
    Learning,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portal_runtime=info".parse()?)
                .add_directive("portal_host=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = PortalConfig::load_or_default(&cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.storage.backend = Backend::File;
        config.storage.data_dir = dir;
    }
    info!(backend = ?config.storage.backend, "opening store");

    let store = config
        .storage
        .open_store()
        .context("failed to open durable store")?;
    let mut portal = Portal::start(store, config.keys.clone(), &cli.page);

    let output = match cli.command.unwrap_or(Command::Stats) {
        Command::Courses { category } => {
            let filter = parse_filter::<CourseCategory>(&category)?;
            json!(portal.list_courses(filter))
        }
        Command::Resources { kind, search } => {
            let filter = ResourceFilter {
                kind: parse_filter::<ResourceType>(&kind)?,
                search_text: search,
            };
            json!(portal.list_resources(&filter))
        }
        Command::Course { id } => {
            let id = CourseId(id);
            match portal.get_course(id) {
                Ok(course) => json!({
                    "course": course,
                    "duration": course.duration(),
                    "enrolled": portal.is_enrolled(id),
                    "rating": portal.rating_of(id).map(|r| r.value()),
                }),
                Err(e) => json!({ "error": e.to_string() }),
            }
        }
        Command::Enroll { id } => {
            let applied = portal.enroll(CourseId(id));
            json!({ "notice": applied.notice(), "persisted": applied.persisted })
        }
        Command::Bookmark { id } => {
            let applied = portal.toggle_bookmark(ResourceId(id));
            json!({
                "notice": applied.notice(),
                "bookmarked": portal.is_bookmarked(ResourceId(id)),
                "persisted": applied.persisted,
            })
        }
        Command::Rate { id, value } => {
            let applied = portal.rate_selection(CourseId(id), &value);
            json!({
                "notice": applied.notice(),
                "rating": portal.rating_of(CourseId(id)).map(|r| r.value()),
                "persisted": applied.persisted,
            })
        }
        Command::Download { id } => match portal.download(ResourceId(id)) {
            Ok(notice) => json!({ "resource": notice.resource, "notice": notice.message }),
            Err(e) => json!({ "error": e.to_string() }),
        },
        Command::Stats => json!(portal.dashboard_stats()),
        Command::Learning => json!(portal.learning_summary()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// "all" means no filter.
fn parse_filter<T>(raw: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    if raw == "all" {
        return Ok(None);
    }
    raw.parse::<T>().map(Some).map_err(anyhow::Error::msg)
}
