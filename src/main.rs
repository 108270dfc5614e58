// Calendar Widget preview tool
// Prints the view models the calendar surface would receive for a value file

use anyhow::{Context, Result};
use calendar_widget::models::event::parse_records;
use calendar_widget::models::reference::parse_references;
use calendar_widget::models::settings::{SurfaceOptions, WidgetOptions};
use calendar_widget::services::transform::EventTransformer;
use clap::Parser;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "calendar-widget")]
#[command(about = "Print the events and options a calendar surface would receive")]
struct Cli {
    /// Canonical event list (JSON)
    value: PathBuf,

    /// Proposal reference list (JSON)
    #[arg(long)]
    proposals: Option<PathBuf>,

    /// Instrument reference list (JSON)
    #[arg(long)]
    instruments: Option<PathBuf>,

    /// Widget options file (TOML)
    #[arg(long, env = "CALENDAR_WIDGET_OPTIONS")]
    options: Option<PathBuf>,

    /// Render as a read-only widget
    #[arg(long)]
    readonly: bool,
}

fn read_optional(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|p| {
        std::fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display()))
    })
    .transpose()
}

/// Options from the given file, else from the user config directory.
fn load_options(path: Option<&Path>) -> Result<WidgetOptions> {
    if let Some(path) = path {
        return WidgetOptions::load(path);
    }

    let default_path = ProjectDirs::from("", "", "calendar-widget")
        .map(|dirs| dirs.config_dir().join("options.toml"));
    match default_path {
        Some(path) if path.exists() => {
            log::info!("Using options from {}", path.display());
            WidgetOptions::load(&path)
        }
        _ => Ok(WidgetOptions::default()),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Cli::parse();
    let value = std::fs::read_to_string(&args.value)
        .with_context(|| format!("Failed to read {}", args.value.display()))?;
    let records = parse_records(&value).context("Failed to parse event list")?;
    let proposals = parse_references("proposals", read_optional(args.proposals.as_deref())?.as_deref())?;
    let instruments =
        parse_references("instruments", read_optional(args.instruments.as_deref())?.as_deref())?;
    let options = load_options(args.options.as_deref())?;

    log::info!(
        "Transforming {} events against {} proposals and {} instruments",
        records.len(),
        proposals.len(),
        instruments.len()
    );

    let events = EventTransformer::new(&proposals, &instruments).to_view_models(&records);
    let surface = SurfaceOptions::from_options(&options, args.readonly, None);

    let output = serde_json::json!({
        "options": surface,
        "permissions": {
            "canEdit": options.permissions(args.readonly).can_edit,
            "canDelete": options.permissions(args.readonly).can_delete,
        },
        "resources": instruments,
        "events": events,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
