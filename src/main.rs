use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use guestbook::{
    Acknowledgment, ConfigError, ErrorCode, FetchError, GuestbookConfig, GuestbookPage, HttpEndpoint, MessageStore,
    PageView, SubmitError, ValidationError, ViewState, WriteMode, config::check_min_rows, format_table, report,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load messages: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("reconciliation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Fetch(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Submit(e) => e.error_code(),
            Self::Join(_) => "E_TASK_JOIN",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Config(e) => e.retryable(),
            Self::Fetch(e) => e.retryable(),
            Self::Validation(e) => e.retryable(),
            Self::Submit(e) => e.retryable(),
            Self::Join(_) => false,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "guestbook", about = "Read and sign a spreadsheet-backed guestbook")]
struct Cli {
    #[arg(long, env = "GUESTBOOK_ENDPOINT")]
    endpoint: Option<String>,

    #[arg(long, help = "Minimum number of rows to display")]
    min_rows: Option<usize>,

    #[arg(long, help = "fire_and_forget or acknowledged")]
    write_mode: Option<WriteMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current list.
    List,
    /// Sign the guestbook, then print the reconciled list.
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        message: String,
    },
}

/// Writes rows to stdout and placeholders to stderr.
struct TerminalView;

impl PageView for TerminalView {
    fn show(&self, state: ViewState) {
        match state {
            ViewState::Loading => eprintln!("loading messages..."),
            ViewState::Rows(rows) => print!("{}", format_table(&rows)),
            ViewState::Error(reason) => eprintln!("error loading messages: {reason}"),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.error_code(), retryable = e.retryable(), "command failed");
            eprintln!("{}", report(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let endpoint = HttpEndpoint::from_config(&config)?;
    tracing::debug!(url = endpoint.url(), mode = ?config.write_mode, "endpoint configured");

    let store = Arc::new(MessageStore::new(Arc::new(endpoint)));
    let page = Arc::new(GuestbookPage::from_config(store, Arc::new(TerminalView), &config));

    match cli.command {
        Command::List => run_list(&page).await,
        Command::Send { name, message } => run_send(&page, &name, &message).await,
    }
}

fn load_config(cli: &Cli) -> Result<GuestbookConfig, ConfigError> {
    let mut config = match &cli.endpoint {
        Some(endpoint) => GuestbookConfig::new(endpoint.trim()).with_env_overrides()?,
        None => GuestbookConfig::from_env()?,
    };
    if let Some(min_rows) = cli.min_rows {
        config.min_rows = check_min_rows(min_rows)?;
    }
    if let Some(write_mode) = cli.write_mode {
        config.write_mode = write_mode;
    }
    Ok(config)
}

async fn run_list(page: &Arc<GuestbookPage>) -> Result<(), CliError> {
    page.load().await?;
    Ok(())
}

async fn run_send(page: &Arc<GuestbookPage>, name: &str, message: &str) -> Result<(), CliError> {
    let submission = page.submit_entry(name, message).await?;
    match &submission.outcome {
        Ok(Acknowledgment::Sent) => eprintln!("message sent"),
        Ok(Acknowledgment::SentDespiteTransportError(_)) => eprintln!("message sent (response unavailable)"),
        Err(e) => eprintln!("message not accepted: {e}"),
    }

    let reconciled = submission.reconciliation.await?;
    submission.outcome?;
    reconciled?;
    Ok(())
}
