use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use taskbot_cli::cli::{Cli, Command, collect_overrides};
use taskbot_cli::logging::init_logging;
use taskbot_core::command::Verb;
use taskbot_core::config::{
    Config, load_config_with_fallback, merge_overrides, validate_config,
};
use taskbot_core::error::AppError;
use taskbot_core::session::{Response, Session};
use taskbot_core::storage::{LineStore, line_store};

fn print_response(response: &Response, json: bool) {
    if json {
        let payload = serde_json::json!({
            "success": response.success,
            "text": response.text,
            "exit": response.exit,
        });
        println!("{}", payload);
    } else if response.success {
        println!("{}", response.text);
    } else {
        eprintln!("ERROR: {}", response.text);
    }
}

fn print_grammar() {
    println!("Usage:");
    for verb in Verb::ALL {
        println!("  {}", verb.usage());
    }
    println!("Timings are written D/M/YYYY HHMM, e.g. 2/12/2019 1800.");
}

fn resolve_store_path(cli_store: Option<PathBuf>, config: &Config) -> Result<PathBuf, AppError> {
    if let Some(path) = cli_store {
        return Ok(path);
    }

    let from_env = std::env::var(line_store::STORE_ENV_VAR)
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false);
    match config.store_path.as_deref() {
        Some(path) if !from_env && !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => line_store::store_path(),
    }
}

fn run_interactive(session: &mut Session, json: bool) -> Result<(), AppError> {
    let mut input = Vec::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_until(b'\n', &mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        // Invalid UTF-8 is replaced, never fatal.
        let decoded = String::from_utf8_lossy(&input);
        let line = decoded.trim();
        if line.is_empty() {
            continue;
        }

        if line == "help" || line == "?" {
            print_grammar();
            continue;
        }

        let response = session.handle_line(line);
        print_response(&response, json);
        if response.exit {
            break;
        }
    }

    Ok(())
}

fn run_check(session: &Session, path: &std::path::Path, json: bool) {
    if json {
        let skipped: Vec<_> = session
            .skipped()
            .iter()
            .map(|skipped| {
                serde_json::json!({
                    "line": skipped.line_number,
                    "error": skipped.error.to_string(),
                })
            })
            .collect();
        let payload = serde_json::json!({
            "path": path.display().to_string(),
            "tasks": session.tasks().len(),
            "skipped": skipped,
        });
        println!("{}", payload);
        return;
    }

    println!(
        "Loaded {} tasks from {}",
        session.tasks().len(),
        path.display()
    );
    for skipped in session.skipped() {
        println!("  line {}: {}", skipped.line_number, skipped.error);
    }
}

fn run(cli: Cli) -> Result<bool, AppError> {
    let loaded = load_config_with_fallback();
    let overrides = collect_overrides(&cli.config_override).map_err(AppError::invalid_input)?;
    let config = merge_overrides(&loaded.config, &overrides);
    validate_config(&config)?;

    init_logging(config.log_filter.as_deref());
    if let Some(err) = loaded.error {
        tracing::warn!(error = %err, "using default configuration");
        eprintln!("WARNING: ignoring config: {}", err);
    }

    let path = resolve_store_path(cli.store, &config)?;
    tracing::debug!(path = %path.display(), "opening task store");
    let mut session = Session::open(LineStore::new(&path))?.with_aliases(config.aliases);

    if let Some(warning) = session.load_warning()
        && !matches!(cli.command, Some(Command::Check))
    {
        eprintln!("WARNING: {}", warning);
    }

    match cli.command {
        None | Some(Command::Shell) => {
            run_interactive(&mut session, cli.json)?;
            Ok(true)
        }
        Some(Command::Exec { words }) => {
            let response = session.handle_line(&words.join(" "));
            print_response(&response, cli.json);
            Ok(response.success)
        }
        Some(Command::Check) => {
            run_check(&session, &path, cli.json);
            Ok(session.skipped().is_empty())
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let rendered = err.to_string();
            let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
            let message = first_line.strip_prefix("error: ").unwrap_or(first_line);
            eprintln!("ERROR: {}", AppError::invalid_input(message));
            std::process::exit(1);
        }
    };

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    }
}
