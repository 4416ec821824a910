use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::{VAR_CSV_PATH, VAR_SHEET_ID, VAR_SOURCE, VAR_TITLE};
use services::{AppServices, Clock, QuizConfig, QuizLoopService};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "app=info,services=info,storage=info";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    ConflictingSources,
    EmptyValue { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::ConflictingSources => {
                write!(f, "--csv and --sheet-id cannot be used together")
            }
            ArgsError::EmptyValue { flag } => write!(f, "{flag} cannot be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

struct DesktopApp {
    title: String,
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn exam_title(&self) -> String {
        self.title.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--csv <path> | --sheet-id <id>] [--title <text>]");
    eprintln!("  cargo run -p app -- check [--csv <path> | --sheet-id <id>]");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  QUIZ_TITLE, QUIZ_SOURCE (sheets|csv), QUIZ_CSV_PATH,");
    eprintln!("  QUIZ_SHEET_ID, QUIZ_SHEET_RANGE, QUIZ_SHEET_GID,");
    eprintln!("  QUIZ_SHEETS_API_KEY, QUIZ_SHEETS_ACCESS_TOKEN,");
    eprintln!("  QUIZ_SHUFFLE, QUIZ_QUESTION_LIMIT, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    csv: Option<PathBuf>,
    sheet_id: Option<String>,
    title: Option<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--csv" => parsed.csv = Some(PathBuf::from(require_value(args, "--csv")?)),
                "--sheet-id" => parsed.sheet_id = Some(require_value(args, "--sheet-id")?),
                "--title" => parsed.title = Some(require_value(args, "--title")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if parsed.csv.is_some() && parsed.sheet_id.is_some() {
            return Err(ArgsError::ConflictingSources);
        }
        Ok(parsed)
    }

    /// Variables that take precedence over the environment.
    fn overrides(&self) -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();
        if let Some(path) = &self.csv {
            vars.insert(VAR_SOURCE, "csv".to_string());
            vars.insert(VAR_CSV_PATH, path.display().to_string());
        }
        if let Some(id) = &self.sheet_id {
            vars.insert(VAR_SOURCE, "sheets".to_string());
            vars.insert(VAR_SHEET_ID, id.clone());
        }
        if let Some(title) = &self.title {
            vars.insert(VAR_TITLE, title.clone());
        }
        vars
    }

    fn load_config(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<QuizConfig, services::ConfigError> {
        let overrides = self.overrides();
        QuizConfig::from_lookup(|var| overrides.get(var).cloned().or_else(|| env(var)))
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let config = parsed.load_config(|var| std::env::var(var).ok())?;
    let services = AppServices::from_config(&config, Clock::system())?;
    let quiz_loop = services.quiz_loop();

    match cmd {
        Command::Ui => {
            info!(
                title = %config.title,
                source = %quiz_loop.source_label(),
                "launching desktop ui"
            );
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                title: services.title().to_string(),
                quiz_loop,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(config.title.as_str())
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Check => {
            let source = quiz_loop.source_label();
            match quiz_loop.check_source().await {
                Ok(count) => {
                    println!("Loaded {count} questions from {source}");
                    Ok(())
                }
                Err(err) => {
                    println!("Error loading questions: {err}");
                    std::process::exit(1);
                }
            }
        }
    }
}

/// A missing `.env` file is fine; real environment variables still apply.
fn dotenv_problem(result: dotenvy::Result<PathBuf>) -> Option<dotenvy::Error> {
    match result {
        Err(err) if !err.not_found() => Some(err),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    let dotenv_error = dotenv_problem(dotenvy::dotenv());
    init_tracing();
    if let Some(err) = dotenv_error {
        warn!(error = %err, "ignoring unreadable .env file");
    }

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
