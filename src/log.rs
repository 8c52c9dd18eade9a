use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use once_cell::sync::Lazy;
use chrono::Local;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

const MAX_BODY_CHARS: usize = 500;

/// Initialize logging to a file
pub fn init() -> std::io::Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".orgdesk")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join(format!("orgdesk_{}.log", timestamp));

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }

    log("=== orgdesk started ===");

    Ok(log_path)
}

/// Log a message with timestamp
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() > MAX_BODY_CHARS {
        let head: String = body.chars().take(MAX_BODY_CHARS).collect();
        format!("{}... ({} bytes total)", head, body.len())
    } else {
        body.to_string()
    }
}

/// Log an outgoing HTTP request
pub fn log_request(method: &str, url: &str) {
    log(&format!("--> {} {}", method, url));
}

/// Log an HTTP response (body truncated for readability)
pub fn log_response(status: u16, url: &str, body: &str) {
    if body.is_empty() {
        log(&format!("<-- {} {}", status, url));
    } else {
        log(&format!("<-- {} {} {}", status, url, truncate(body)));
    }
}

/// Log an event
pub fn log_event(event: &str) {
    log(&format!("[EVENT] {}", truncate(event)));
}

/// Install a panic hook that restores the terminal before reporting.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log(&format!("[PANIC] {}", info));
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::DisableMouseCapture,
            crossterm::terminal::LeaveAlternateScreen
        );
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_body() {
        assert_eq!(truncate("[]"), "[]");
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "x".repeat(600);
        let out = truncate(&body);
        assert!(out.starts_with(&"x".repeat(MAX_BODY_CHARS)));
        assert!(out.ends_with("(600 bytes total)"));
    }
}
