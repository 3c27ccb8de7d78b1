use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use alertdesk::auth::{CredentialsAuthenticator, Session};
use alertdesk::config::Config;
use alertdesk::controller::{AlertListController, AlertListView, SearchOutcome};
use alertdesk::models::{Credentials, DashboardModel};
use alertdesk::pagination::PageTarget;
use alertdesk::services::{DashboardClient, SearchKind};

/// Alert dashboard command-line client
#[derive(Parser)]
#[command(name = "alertdesk")]
#[command(author = "Alertdesk Team")]
#[command(version = "0.1.0")]
#[command(about = "Browse and search dashboard alerts from the terminal")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dashboard model snapshot (JSON with alerts, subscriberGroups, applications)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Sort mode: "Edited:first", "Edited:last", "A to Z" or "Z to A"
    #[arg(short, long)]
    sort: Option<String>,

    /// Page to show ("next", "previous" or a page number)
    #[arg(short, long, default_value = "1")]
    page: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List every alert of the model
    List,

    /// Search alerts through the backend autocomplete
    Search {
        /// What to search by
        #[arg(long, value_enum, default_value = "function")]
        by: SearchBy,

        /// Search term
        term: String,
    },

    /// List application names available as filters
    Applications,

    /// List subscriber group names available as filters
    Groups,
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchBy {
    Function,
    Application,
    Dataset,
}

impl From<SearchBy> for SearchKind {
    fn from(by: SearchBy) -> Self {
        match by {
            SearchBy::Function => SearchKind::FunctionName,
            SearchBy::Application => SearchKind::ApplicationName,
            SearchBy::Dataset => SearchKind::DatasetName,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();

    let config = Config::from_env().context("Configuration error")?;
    log::info!("Using dashboard at {}", config.dashboard_url);

    let model = match &cli.model {
        Some(path) => load_model(path)?,
        None => DashboardModel::default(),
    };

    let client = Arc::new(DashboardClient::new(&config)?);
    let mut session = Session::new(CredentialsAuthenticator::new(
        client.clone(),
        config.session.cookie_expiration,
    ));

    if let (Some(username), Some(password)) =
        (&config.session.username, &config.session.password)
    {
        session
            .authenticate(&Credentials::new(username.as_str(), password.as_str()))
            .await
            .context("Login failed")?;
    } else {
        session.restore().await?;
        log::warn!("DASHBOARD_USERNAME/DASHBOARD_PASSWORD not set, continuing without login");
    }

    let controller = AlertListController::new(client, model, &config.list);
    let result = run(&cli, &controller).await;

    if session.is_authenticated() {
        if let Err(e) = session.invalidate().await {
            log::error!("Logout failed: {}", e);
        }
    }

    result
}

async fn run(cli: &Cli, controller: &AlertListController<DashboardClient>) -> anyhow::Result<()> {
    if let Some(sort) = &cli.sort {
        controller.on_sort_mode_change(sort).await;
    }

    match &cli.command {
        Commands::Applications => {
            for name in controller.application_names() {
                println!("{}", name);
            }
            return Ok(());
        }
        Commands::Groups => {
            for name in controller.subscriber_group_names() {
                println!("{}", name);
            }
            return Ok(());
        }
        Commands::List => {}
        Commands::Search { by, term } => {
            match controller.search((*by).into(), term).await? {
                SearchOutcome::Applied { count } => log::info!("{} alerts found", count),
                other => log::warn!("Search did not apply: {:?}", other),
            }
        }
    }

    let target: PageTarget = cli.page.parse()?;
    controller.on_pagination_click(target).await;

    print_view(&controller.view().await);
    Ok(())
}

fn load_model(path: &Path) -> anyhow::Result<DashboardModel> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse model file {}", path.display()))
}

fn print_view(view: &AlertListView) {
    for alert in &view.alerts {
        println!(
            "{:>8}  {:<40}  {:<20}  {}",
            alert.id.map(|id| id.to_string()).unwrap_or_default(),
            alert.function_name.as_deref().unwrap_or("-"),
            alert.application.as_deref().unwrap_or("-"),
            alert.group.as_deref().unwrap_or("-"),
        );
    }

    let pages: Vec<String> = view
        .view_pages
        .iter()
        .map(|page| {
            if *page == view.current_page {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();

    println!();
    println!(
        "Page {} of {} ({} alerts)  {}",
        view.current_page,
        view.pages_num,
        view.total_count,
        pages.join(" ")
    );
}
