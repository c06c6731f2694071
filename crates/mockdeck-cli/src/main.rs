//! Mockdeck CLI - edit scenario-scoped HTTP mocks from the command line
//!
//! # Usage
//!
//! ```bash
//! # Show the draft derived from a captured request
//! mockdeck --store scenarios.json show --request capture.json
//!
//! # Mock the request with a JSON body and headers, in a chosen scenario
//! mockdeck --store scenarios.json edit --request capture.json \
//!     --scenario checkout --status 503 --preset json --body '{"error":"down"}'
//!
//! # Edit or delete an existing mock
//! mockdeck --store scenarios.json edit --request capture.json --mock <id> --delay 1500
//! mockdeck --store scenarios.json delete --request capture.json --mock <id>
//! ```

mod commands;
mod settings;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mockdeck_editor::{HeaderPreset, SavePolicy};
use settings::Settings;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Mockdeck - scenario-scoped HTTP mock editor
#[derive(Parser, Debug)]
#[command(name = "mockdeck")]
#[command(author, version, about = "Edit scenario-scoped HTTP mocks")]
struct Cli {
    /// Scenario file acting as the mock store
    #[arg(
        short,
        long,
        global = true,
        default_value = "scenarios.json",
        env = "MOCKDECK_STORE"
    )]
    store: PathBuf,

    /// Optional YAML settings file
    #[arg(short, long, global = true, env = "MOCKDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter (overrides the settings file)
    #[arg(long, global = true, env = "MOCKDECK_LOG")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// What saving into a different scenario does (overrides the settings file)
    #[arg(long, global = true, value_enum)]
    save_policy: Option<PolicyArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the draft derived from a request and its optional mock
    Show(TargetArgs),
    /// Apply edits to the draft and save it
    Edit(EditArgs),
    /// Delete an existing mock
    Delete(DeleteArgs),
    /// List the available header presets
    Presets,
}

/// Request capture and optional existing mock
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// JSON file holding the intercepted request
    #[arg(short, long)]
    pub request: PathBuf,

    /// Id of the mock already saved for this request
    #[arg(short, long)]
    pub mock: Option<String>,
}

/// Edits, applied in the order the options are listed here
#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Scenario the mock should live in after saving
    #[arg(long)]
    pub scenario: Option<String>,

    /// Response URL
    #[arg(long)]
    pub url: Option<String>,

    /// Response status code
    #[arg(long)]
    pub status: Option<u16>,

    /// Response delay in milliseconds
    #[arg(long)]
    pub delay: Option<u64>,

    /// Response body
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the response body from a file
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Replace all headers with a content-type preset (html, xml, json, text)
    #[arg(long)]
    pub preset: Option<HeaderPreset>,

    /// Rename a header (old=new)
    #[arg(long = "rename-header", value_parser = parse_pair)]
    pub rename_headers: Vec<(String, String)>,

    /// Set a header value, adding the header if missing (name=value)
    #[arg(long = "header", value_parser = parse_pair)]
    pub headers: Vec<(String, String)>,

    /// Remove a header
    #[arg(long = "remove-header")]
    pub remove_headers: Vec<String>,

    /// Add an empty header row
    #[arg(long)]
    pub add_header: bool,
}

impl Default for TargetArgs {
    fn default() -> Self {
        Self {
            request: PathBuf::from("request.json"),
            mock: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// JSON file holding the intercepted request
    #[arg(short, long)]
    pub request: PathBuf,

    /// Id of the mock to delete
    #[arg(short, long)]
    pub mock: String,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PolicyArg {
    /// Create a new mock and leave the original in place
    Recreate,
    /// Move the original mock
    Move,
}

impl From<PolicyArg> for SavePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Recreate => SavePolicy::Recreate,
            PolicyArg::Move => SavePolicy::Move,
        }
    }
}

/// Parse `name=value`. The value may be empty or contain further `=`.
fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    Ok((name.trim().to_string(), value.to_string()))
}

fn init_logging(filter: &str, json: bool) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    let filter = cli
        .log_level
        .clone()
        .or_else(|| settings.log_level.clone())
        .unwrap_or_else(|| "info".to_string());
    init_logging(&filter, cli.log_json);

    let policy = cli
        .save_policy
        .map(SavePolicy::from)
        .unwrap_or(settings.save_policy);

    if let Command::Presets = cli.command {
        for preset in HeaderPreset::ALL {
            println!("{:<5} content-type: {}", preset, preset.content_type());
        }
        return Ok(());
    }

    let workspace = commands::Workspace::open(&cli.store, &settings, policy)?;

    match cli.command {
        Command::Show(target) => {
            println!("{}", workspace.show(&target)?);
        }
        Command::Edit(args) => {
            let call = workspace.edit(&args)?;
            println!("{}", commands::describe(&call));
        }
        Command::Delete(args) => {
            workspace.delete(&args)?;
            println!("Deleted mock {}", args.mock);
        }
        Command::Presets => unreachable!("handled before the store is opened"),
    }

    Ok(())
}
