mod api;
mod app;
mod config;
mod error;
mod events;
mod loadable;
mod log;
mod picker;
mod screens;
mod selector;
mod services;
mod tui;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use api::ApiClient;
use app::{App, InputMode, Screen};
use config::Config;
use error::OrgdeskError;
use events::EventHandler;
use services::{ApiEvent, RequestDispatcher};

const USAGE: &str = "\
Usage: orgdesk [OPTIONS]

Options:
  -a, --api-url <URL>       Backend base URL (default http://localhost:8080)
  -t, --timeout <SECS>      Per-request timeout in seconds
  -s, --screen <NAME>       Screen to open on startup (e.g. employees, states, salary)
  -h, --help                Print this help";

/// Command line overrides
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    screen: Option<String>,
    help: bool,
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--api-url" | "-a" => match value {
                Some(url) => {
                    cli.api_url = Some(url);
                    i += 1;
                }
                None => eprintln!("Warning: --api-url requires a URL argument"),
            },
            "--timeout" | "-t" => match value.as_deref().map(str::parse::<u64>) {
                Some(Ok(secs)) => {
                    cli.timeout_secs = Some(secs);
                    i += 1;
                }
                _ => eprintln!("Warning: --timeout requires a number of seconds"),
            },
            "--screen" | "-s" => match value {
                Some(name) => {
                    cli.screen = Some(name);
                    i += 1;
                }
                None => eprintln!("Warning: --screen requires a screen name"),
            },
            "--help" | "-h" => cli.help = true,
            other => eprintln!("Warning: ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    cli
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
        log::install_panic_hook();
    }

    // Precedence: CLI > env var > config file > default
    let config = Config::load().with_overrides(cli.api_url, cli.timeout_secs, cli.screen);
    let base_url = config.api_base_url();
    log::log(&format!(
        "Backend {} (timeout: {:?})",
        base_url,
        config.request_timeout()
    ));

    let client = ApiClient::new(&base_url, config.request_timeout())?;
    let start_screen = match config.start_screen.as_deref() {
        Some(name) => Screen::from_name(name).unwrap_or_else(|| {
            log::log(&format!("Unknown start screen '{}', using employees", name));
            Screen::Employees
        }),
        None => Screen::Employees,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client.base_url().to_string(), config.years());
    if config.start_screen.is_some() {
        app.input_mode = InputMode::Insert;
    }

    let result = run_app(&mut terminal, &mut app, client, start_screen).await;
    if let Err(e) = &result {
        log::log(&format!("Fatal: {}", e));
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::log("=== orgdesk exiting ===");
    Ok(result?)
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: ApiClient,
    start_screen: Screen,
) -> error::Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Completed backend calls flow back through this channel
    let (api_tx, mut api_rx) = mpsc::channel::<ApiEvent>(100);
    let dispatcher = RequestDispatcher::new(client, api_tx);

    let mut event_stream = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(80));

    dispatcher.dispatch_all(app.open_screen(start_screen));

    loop {
        terminal
            .draw(|frame| tui::render(frame, app))
            .map_err(|e| OrgdeskError::Terminal(e.to_string()))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        let action = EventHandler::handle_event(app, &event);
                        dispatcher.dispatch_all(app.dispatch(action));
                    }
                    Some(Err(e)) => {
                        log::log(&format!("Terminal event error: {}", e));
                        return Err(e.into());
                    }
                    None => break,
                }
            }

            Some(event) = api_rx.recv() => {
                log::log_event(&format!("{:?}", event));
                dispatcher.dispatch_all(app.handle_api_event(event));
            }

            // Keep the spinner moving and expire toasts
            _ = ticker.tick() => {
                app.tick(Instant::now());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("orgdesk")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args() {
        let cli = parse_args(&args(&["-a", "http://hr:9000", "--timeout", "15", "-s", "states"]));
        assert_eq!(
            cli,
            CliArgs {
                api_url: Some("http://hr:9000".to_string()),
                timeout_secs: Some(15),
                screen: Some("states".to_string()),
                help: false,
            }
        );
    }

    #[test]
    fn test_parse_args_skips_bad_values() {
        let cli = parse_args(&args(&["--timeout", "soon", "--help"]));
        assert_eq!(cli.timeout_secs, None);
        assert!(cli.help);
    }

    #[test]
    fn test_parse_args_missing_value() {
        let cli = parse_args(&args(&["--api-url"]));
        assert_eq!(cli.api_url, None);
    }
}
