use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, LeaderboardScreen, LeaderboardService, QuizFlow};
use storage::SqliteInitError;
use storage::repository::Storage;
use trials_core::QuizVariant;
use tracing_subscriber::EnvFilter;
use ui::vm::map_leaderboard;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite:clinical_trials.db";

#[derive(Debug)]
enum CliError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for CliError {}

#[derive(Debug, Parser)]
#[command(name = "clinical-trials", version, about = "Clinical Trials Adventure quiz")]
struct Cli {
    /// `SQLite` database URL or path.
    #[arg(long, global = true, env = "TRIALS_DB_URL", default_value = DEFAULT_DB_URL)]
    db: String,

    /// Question set: `standard` (4 phases) or `extended` (6 phases).
    #[arg(long, global = true, env = "TRIALS_VARIANT", default_value = "standard")]
    variant: QuizVariant,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Launch the desktop game (default).
    Play,
    /// Print the top scores without creating the database.
    Leaderboard {
        #[arg(long, default_value_t = services::LEADERBOARD_SIZE)]
        limit: u32,
        /// Keep printing every `--interval` seconds until interrupted.
        #[arg(long)]
        watch: bool,
        #[arg(long, default_value_t = 10)]
        interval: u64,
        #[arg(long)]
        json: bool,
    },
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn variant(&self) -> QuizVariant {
        self.services.variant()
    }

    fn quiz(&self) -> Arc<QuizFlow> {
        self.services.quiz()
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        self.services.leaderboard()
    }
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn sqlite_path(db_url: &str) -> Result<&Path, CliError> {
    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| CliError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(CliError::InvalidDbUrl {
            raw: db_url.to_string(),
        });
    }
    Ok(Path::new(path))
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = sqlite_path(db_url)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn play(db_url: &str, variant: QuizVariant) -> Result<(), Box<dyn std::error::Error>> {
    // Open + migrate SQLite before the window exists so failures print to the terminal.
    prepare_sqlite_file(db_url)?;
    let services = AppServices::new_sqlite(db_url, variant).await?;
    tracing::info!(db = %db_url, variant = variant.as_str(), "launching desktop window");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(ui::vm::window_title(variant))
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn write_board(
    out: &mut impl Write,
    board: &LeaderboardScreen,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        serde_json::to_writer(&mut *out, board)?;
        writeln!(out)?;
        return Ok(());
    }

    let vm = map_leaderboard(board, None);
    writeln!(out, "Leaderboard")?;
    if let Some(warning) = &vm.warning {
        writeln!(out, "warning: {warning}")?;
    }
    if let Some(message) = vm.empty_message() {
        writeln!(out, "{message}")?;
    }
    for row in &vm.rows {
        writeln!(out, "{}", row.line())?;
    }
    Ok(())
}

/// Terminal leaderboard over a database it never creates or writes.
struct Viewer {
    db_url: String,
    limit: u32,
    leaderboard: Option<LeaderboardService>,
}

impl Viewer {
    fn new(db_url: &str, limit: u32) -> Self {
        Self {
            db_url: db_url.to_string(),
            limit,
            leaderboard: None,
        }
    }

    /// Current board. Until the database exists every call retries the open
    /// and yields an empty board carrying the reason.
    async fn refresh(&mut self) -> LeaderboardScreen {
        if self.leaderboard.is_none() {
            match Storage::sqlite_existing(&self.db_url).await {
                Ok(storage) => {
                    self.leaderboard = Some(
                        LeaderboardService::new(Arc::clone(&storage.scores)).with_size(self.limit),
                    );
                }
                Err(SqliteInitError::Missing { path }) => {
                    tracing::debug!(path = %path, "leaderboard database missing");
                    return LeaderboardScreen::unavailable(format!(
                        "Database not found at: {path}"
                    ));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "leaderboard database unavailable");
                    return LeaderboardScreen::unavailable(format!("Database error: {err}"));
                }
            }
        }

        match &self.leaderboard {
            Some(leaderboard) => leaderboard.load().await,
            None => LeaderboardScreen::unavailable("Leaderboard unavailable"),
        }
    }
}

async fn show_leaderboard(
    db_url: &str,
    limit: u32,
    watch: bool,
    interval: u64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut viewer = Viewer::new(db_url, limit);
    let interval = Duration::from_secs(interval.max(1));

    loop {
        let board = viewer.refresh().await;
        write_board(&mut std::io::stdout().lock(), &board, json)?;
        if !watch {
            return Ok(());
        }

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let db_url = normalize_sqlite_url(&cli.db);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(&db_url, cli.variant).await,
        Command::Leaderboard {
            limit,
            watch,
            interval,
            json,
        } => show_leaderboard(&db_url, limit, watch, interval, json).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
