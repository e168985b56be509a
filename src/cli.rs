// Command-line flags, tracing setup and the top-level run.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use life_design_notion::config::{self, Overrides};
use life_design_notion::template::{build_document, DEFAULT_TITLE};
use life_design_notion::ui::{write_dry_run, write_report, CliProgress};
use life_design_notion::{BulkUploader, NotionClient};

/// Build the Life Design Dashboard in a Notion workspace.
#[derive(Parser)]
#[command(name = "life-design-notion", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Notion Internal Integration Secret.
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Page (id or URL) under which the dashboard is created.
    #[arg(long, env = "NOTION_PARENT_PAGE_ID")]
    pub parent_page_id: Option<String>,

    /// Notion API base URL.
    #[arg(long, env = "NOTION_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Title of the created page.
    #[arg(long)]
    pub title: Option<String>,

    /// Print the create/append calls as JSON instead of sending them.
    #[arg(long)]
    pub dry_run: bool,

    /// Never prompt; fail if a value is missing.
    #[arg(long)]
    pub no_input: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Logs go to stderr so stdout stays clean for the report and dry-run JSON.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "life_design_notion=warn",
        1 => "life_design_notion=info",
        2 => "life_design_notion=debug",
        _ => "life_design_notion=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .init();
        }
    }
}

pub(crate) fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let overrides = Overrides {
        api_key: cli.api_key,
        parent_page_id: cli.parent_page_id,
        base_url: cli.base_url,
        title: cli.title,
    };

    if cli.dry_run {
        let title = overrides
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TITLE);
        let document = build_document(title);
        write_dry_run(&mut io::stdout().lock(), &document).context("Failed to write dry-run plan")?;
        return Ok(ExitCode::SUCCESS);
    }

    let key_file = config::key_file_path();
    let settings = if cli.no_input {
        config::resolve(overrides, &key_file)
    } else {
        config::resolve_interactive(overrides, &key_file)
    }
    .context("Failed to resolve Notion settings")?;
    info!(?settings, "settings resolved");

    let client = NotionClient::new(&settings.api_key, &settings.parent_page_id, &settings.base_url)
        .context("Failed to build Notion client")?;
    let document = build_document(settings.title.as_str());

    let progress = CliProgress::new(document.items.len());
    let report = match BulkUploader::new(&client).upload_document(&document, &progress) {
        Ok(report) => report,
        Err(err) => {
            progress.clear();
            return Err(err).context("Failed to create template");
        }
    };

    write_report(&mut io::stdout().lock(), &report).context("Failed to write report")?;
    Ok(if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
