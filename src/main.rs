//! userdir CLI
//!
//! Command-line interface for the user directory.
//! Provides the interactive browser and scriptable list/show commands.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use userdir::{filter, model, AppConfig, DataSource, User};

/// userdir - browse a remote user directory
///
/// Fetches the user list once, filters it by name as you type and shows the
/// details of the selected user.
#[derive(Parser)]
#[command(name = "userdir")]
#[command(author = "userdir Contributors")]
#[command(version)]
#[command(about = "Browse a remote user directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Users resource to fetch
    #[arg(long, global = true, env = "USERDIR_ENDPOINT", default_value = userdir::DEFAULT_ENDPOINT)]
    endpoint: Url,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    /// Log file (default: userdir.log next to the executable)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "userdir=trace" (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive browser (default)
    Browse,

    /// Print users whose name contains QUERY
    List {
        /// Case-insensitive name filter
        #[arg(default_value = "")]
        query: String,

        /// Print matching records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the details of one user
    Show {
        /// User id
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    userdir::logging::init(cli.log_file.as_deref(), &cli.log_level);
    tracing::info!(version = userdir::VERSION, endpoint = %cli.endpoint, "userdir starting up");

    let config = AppConfig {
        endpoint: cli.endpoint,
        timeout: Duration::from_secs(cli.timeout),
        ..Default::default()
    };

    let result = match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => userdir::tui::run(&config).await,
        Commands::List { query, json } => cmd_list(&config, &query, json).await,
        Commands::Show { id } => cmd_show(&config, id).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Fetch the collection with a spinner on stderr
async fn fetch_with_spinner(config: &AppConfig) -> userdir::Result<Vec<User>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Loading users...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = match config.http_source() {
        Ok(source) => source.fetch_users().await,
        Err(e) => Err(e),
    };
    spinner.finish_and_clear();

    match result {
        Ok(users) => {
            tracing::info!(count = users.len(), "Loaded users");
            Ok(users)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error fetching users");
            eprintln!("{}", style("Error fetching users").red().bold());
            Err(e.into())
        }
    }
}

/// List command implementation
async fn cmd_list(config: &AppConfig, query: &str, json: bool) -> userdir::Result<()> {
    let users = fetch_with_spinner(config).await?;
    let matches = filter::filter(&users, query);

    if json {
        println!("{}", model::to_json(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("{}", style("No users found").dim());
        return Ok(());
    }

    println!(
        "{} {} of {} users",
        style("→").cyan().bold(),
        style(matches.len()).green(),
        users.len()
    );
    println!();
    for user in matches {
        println!(
            "  {}  {}  {}",
            style(format!("{:>4}", user.id)).dim(),
            user.name,
            style(format!("@{}", user.username)).dim()
        );
    }

    Ok(())
}

/// Show command implementation
async fn cmd_show(config: &AppConfig, id: i64) -> userdir::Result<()> {
    let users = fetch_with_spinner(config).await?;
    let user = userdir::find_user(&users, id)?;

    println!("{}", style("User Details").bold().underlined());
    println!();
    for (label, value) in user.detail_rows() {
        let label = format!("{:<10}", format!("{}:", label));
        println!("  {} {}", style(label).bold(), value);
    }

    Ok(())
}
