use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

/// Open the debug log in append mode. Later calls keep the first file.
pub fn init(path: &Path) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(path)
    {
        *logger = Some(file);
    }
}

pub fn log(message: &str) {
    write_line("INFO", message);
}

pub fn error(message: &str) {
    write_line("ERROR", message);
}

fn write_line(level: &str, message: &str) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if let Some(file) = logger.as_mut() {
        let _ = writeln!(file, "{}", format_line(level, message));
    }
}

fn format_line(level: &str, message: &str) -> String {
    let timestamp = chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false);
    format!("[{}] {} {}", timestamp, level, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_contains_level_and_message() {
        let line = format_line("ERROR", "boom");
        assert!(line.starts_with('['));
        assert!(line.ends_with("] ERROR boom"));
    }

    #[test]
    fn test_logger_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tutor.log");
        init(&path);
        log("Test log message");
        error("Test error message");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO Test log message"));
        assert!(contents.contains("ERROR Test error message"));
    }

    #[test]
    fn test_log_before_init_does_not_panic() {
        log("nobody listening");
    }
}
