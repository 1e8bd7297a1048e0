use colored::{ColoredString, Colorize};
use env_logger::{Builder, Env};
use log::Level;
use std::io::Write;
use std::time::Duration;

/// Installs the global logger. `RUST_LOG` wins over the default filter.
pub fn init_logging(quiet: bool) {
    let default_filter = if quiet { "warn" } else { "info" };
    let logging_env = Env::default().filter_or("RUST_LOG", default_filter);

    Builder::from_env(logging_env)
        .format(|buf, record| {
            let target = record.target().to_ascii_lowercase();
            let target = match record.level() {
                Level::Error => target.bold().red(),
                Level::Warn => target.bold().yellow(),
                _ => target.bold().bright_yellow(),
            };

            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                target,
                record.args()
            )
        })
        .init();
}

/// Formats a duration for log lines, turning slow steps yellow and red.
pub fn format_elapsed_time(elapsed: Duration) -> ColoredString {
    match elapsed.as_secs() {
        secs if secs > 2 => format!("{}s", secs).red(),
        secs if secs > 0 => format!("{}s", secs).yellow(),
        _ => match elapsed.as_millis() {
            millis if millis > 500 => format!("{}ms", millis).red(),
            millis if millis > 100 => format!("{}ms", millis).yellow(),
            millis if millis > 0 => format!("{}ms", millis).normal(),
            _ => format!("{}μs", elapsed.as_micros()).normal(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_time_units() {
        colored::control::set_override(false);

        assert_eq!(format_elapsed_time(Duration::from_micros(42)).to_string(), "42μs");
        assert_eq!(format_elapsed_time(Duration::from_millis(120)).to_string(), "120ms");
        assert_eq!(format_elapsed_time(Duration::from_secs(3)).to_string(), "3s");
    }
}
