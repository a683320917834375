//! Terminal front-end for PercentMan.
//!
//! Sends one-off requests and manages saved templates and history from the
//! command line. Logging goes to stderr and is controlled with `RUST_LOG`
//! (or `--verbose` for `info`).

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use percentman::config::{load_config, PercentmanConfig};
use percentman::formatter::{display_body, format_elapsed, format_headers, status_text, summarize, StatusClass};
use percentman::models::{HeaderEntry, RequestSpec, ResponseResult, SUPPORTED_METHODS};
use percentman::{Dispatch, RequestExecutor, RequestStore, Session};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "percentman", version)]
#[command(about = "Compose, send and inspect HTTP requests")]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use a custom data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a request
    Send {
        #[command(flatten)]
        request: RequestArgs,

        /// Don't record the request in history
        #[arg(long)]
        no_history: bool,
    },

    /// Saved templates
    #[command(subcommand)]
    Templates(TemplateCommands),

    /// Request history
    #[command(subcommand)]
    History(HistoryCommands),
}

#[derive(Args)]
struct RequestArgs {
    /// HTTP method
    method: String,

    /// URL (http:// is assumed when no scheme is given)
    url: String,

    /// Header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<HeaderEntry>,

    /// Request body
    #[arg(short = 'd', long = "data")]
    body: Option<String>,
}

impl RequestArgs {
    fn into_spec(self) -> RequestSpec {
        let method = self.method.to_uppercase();
        if !SUPPORTED_METHODS.contains(&method.as_str()) {
            log::warn!("{} is not a standard method; sending it anyway", method);
        }
        RequestSpec {
            method,
            url: self.url,
            headers: self.headers,
            body: self.body.unwrap_or_default(),
        }
    }
}

#[derive(Subcommand)]
enum TemplateCommands {
    /// List saved templates
    List,

    /// Save a request as a template, replacing one with the same name
    Save {
        /// Template name
        name: String,

        #[command(flatten)]
        request: RequestArgs,
    },

    /// Delete a template
    Delete {
        /// Template ID
        id: String,
    },

    /// Send a saved template
    Run {
        /// Template ID or name
        template: String,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List past requests, newest first
    List,

    /// Show a past request and its response
    Show {
        /// History entry ID
        id: String,
    },

    /// Delete all history
    Clear,

    /// Send a past request again
    Replay {
        /// History entry ID
        id: String,
    },
}

fn parse_header(line: &str) -> Result<HeaderEntry, String> {
    HeaderEntry::parse_line(line).ok_or_else(|| format!("expected \"Name: value\", got {:?}", line))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
    log::debug!("percentman {}", percentman::VERSION);

    let mut config = match &cli.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
        None => PercentmanConfig::default(),
    };
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }

    let executor = RequestExecutor::new((&config).into()).context("creating HTTP client")?;
    let client = executor.config();
    log::info!(
        "timeout {:?}, follow redirects: {} (max {}), validate TLS: {}",
        client.timeout,
        client.follow_redirects,
        client.max_redirects,
        client.validate_ssl
    );
    let store = Arc::new(RequestStore::open((&config).into()).context("opening data directory")?);
    let mut session = Session::new(executor, store);

    match cli.command {
        Commands::Send { request, no_history } => {
            session.replace(request.into_spec());
            if no_history {
                let response = session.executor().execute(session.current());
                print_response(&response)
            } else {
                print_dispatch(session.send())
            }
        }
        Commands::Templates(command) => run_templates(&mut session, command),
        Commands::History(command) => run_history(&mut session, command),
    }
}

fn run_templates(session: &mut Session, command: TemplateCommands) -> Result<()> {
    let store = Arc::clone(session.store());
    match command {
        TemplateCommands::List => {
            for template in store.list_templates() {
                println!("{}  {}  {}", template.id, template.name, template.request.summary());
            }
        }
        TemplateCommands::Save { name, request } => {
            let existed = store.template_exists(&name);
            session.replace(request.into_spec());
            let template = session.save_as_template(&name)?;
            let verb = if existed { "Updated" } else { "Saved" };
            println!("{} template {} ({})", verb, template.name, template.id);
        }
        TemplateCommands::Delete { id } => {
            let Some(template) = store.get_template(&id) else {
                bail!("no template with id {}", id);
            };
            store.delete_template(&id)?;
            println!("Deleted template {}", template.name);
        }
        TemplateCommands::Run { template } => {
            let found = store
                .get_template(&template)
                .or_else(|| store.find_template_by_name(&template));
            let Some(found) = found else {
                bail!("no template with id or name {}", template);
            };
            session.load_template(&found.id);
            print_dispatch(session.send())?;
        }
    }
    Ok(())
}

fn run_history(session: &mut Session, command: HistoryCommands) -> Result<()> {
    let store = Arc::clone(session.store());
    match command {
        HistoryCommands::List => {
            for entry in store.list_history() {
                println!(
                    "{}  {}  {}  {}",
                    entry.id,
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    entry.request.summary(),
                    summarize(&entry.response)
                );
            }
        }
        HistoryCommands::Show { id } => {
            let Some(entry) = store.get_history_entry(&id) else {
                bail!("no history entry with id {}", id);
            };
            println!("{}", entry.request.summary());
            for header in &entry.request.headers {
                let marker = if header.enabled { "" } else { "# " };
                println!("{}{}: {}", marker, header.key, header.value);
            }
            if entry.request.has_body() {
                println!("\n{}", entry.request.body);
            }
            println!();
            print_response(&entry.response)?;
        }
        HistoryCommands::Clear => {
            store.clear_history()?;
            println!("History cleared");
        }
        HistoryCommands::Replay { id } => {
            if !session.load_history_entry(&id) {
                bail!("no history entry with id {}", id);
            }
            print_dispatch(session.send())?;
        }
    }
    Ok(())
}

fn print_dispatch(dispatch: Dispatch) -> Result<()> {
    if let Some(e) = &dispatch.record_error {
        eprintln!("warning: not saved to history: {}", e);
    }
    print_response(&dispatch.response)
}

fn print_response(response: &ResponseResult) -> Result<()> {
    if let Some(error) = response.error_message() {
        if response.status_code == 0 {
            bail!("{}", error);
        }
        // Headers arrived but the body didn't.
        println!("{}", status_text(response));
        print!("{}", format_headers(&response.headers));
        bail!("{}", error);
    }

    let class = StatusClass::of(response.status_code);
    if class.is_failure() {
        println!("{} ({}) [{}]", status_text(response), format_elapsed(response.elapsed), class);
    } else {
        println!("{} ({})", status_text(response), format_elapsed(response.elapsed));
    }
    print!("{}", format_headers(&response.headers));
    println!();
    println!("{}", display_body(&response.body));
    Ok(())
}
