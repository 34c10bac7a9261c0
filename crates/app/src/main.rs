use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::{parse_time_limit, MAX_TIME_LIMIT_SECS, MIN_TIME_LIMIT_SECS};
use services::{Clock, ConfigError, QuestionSource, QuizConfig, QuizLoopService};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--source <builtin|path|url>] [--time-limit <secs>] [--shuffle]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --source builtin");
    eprintln!("  --time-limit 30 ({MIN_TIME_LIMIT_SECS}..={MAX_TIME_LIMIT_SECS})");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SOURCE, QUIZ_TIME_LIMIT_SECS, QUIZ_SHUFFLE, RUST_LOG");
}

enum Parsed {
    Run(QuizConfig),
    Help,
}

/// Flags override whatever the environment configured.
fn parse_args(
    mut config: QuizConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<Parsed, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--source" => {
                let value = require_value(args, "--source")?;
                config.source = QuestionSource::parse(&value)?;
            }
            "--time-limit" => {
                let value = require_value(args, "--time-limit")?;
                config.time_limit_secs = parse_time_limit(&value)?;
            }
            "--shuffle" => config.shuffle_questions = true,
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(Parsed::Run(config))
}

const DEFAULT_LOG_FILTER: &str = "info";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing() {
    tracing_subscriber::fmt().with_env_filter(log_filter()).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let env_config = QuizConfig::from_env().inspect_err(|_| print_usage())?;
    let mut argv = std::env::args().skip(1);
    let config = match parse_args(env_config, &mut argv).map_err(|e| {
        print_usage();
        e
    })? {
        Parsed::Run(config) => config,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    info!(
        source = %config.source,
        time_limit = config.time_limit_secs,
        shuffle = config.shuffle_questions,
        "launching quiz"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_loop: Arc::new(config.loop_service(Clock::system())),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Sentence Construction")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|value| (*value).to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn parse(values: &[&str]) -> Result<Parsed, ArgsError> {
        parse_args(QuizConfig::default(), &mut args(values))
    }

    #[test]
    fn log_filter_falls_back_to_info() {
        let expected = std::env::var("RUST_LOG")
            .ok()
            .and_then(|raw| EnvFilter::try_new(raw).ok())
            .map_or_else(|| DEFAULT_LOG_FILTER.to_string(), |filter| filter.to_string());
        assert_eq!(log_filter().to_string(), expected);
    }

    #[test]
    fn flags_override_defaults() {
        let Parsed::Run(config) =
            parse(&["--source", "questions.json", "--time-limit", "45", "--shuffle"]).unwrap()
        else {
            panic!("expected run");
        };
        assert_eq!(config.source, QuestionSource::File("questions.json".into()));
        assert_eq!(config.time_limit_secs, 45);
        assert!(config.shuffle_questions);
    }

    #[test]
    fn help_short_circuits() {
        assert!(matches!(parse(&["--help", "--bogus"]).unwrap(), Parsed::Help));
    }

    #[test]
    fn reports_bad_arguments() {
        assert!(matches!(
            parse(&["--time-limit"]),
            Err(ArgsError::MissingValue { flag: "--time-limit" })
        ));
        assert!(matches!(parse(&["--bogus"]), Err(ArgsError::UnknownArg(arg)) if arg == "--bogus"));
        assert!(matches!(
            parse(&["--time-limit", "0"]),
            Err(ArgsError::Config(ConfigError::InvalidTimeLimit { .. }))
        ));
    }
}
