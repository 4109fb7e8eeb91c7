use std::path::PathBuf;
use toolshed_core::paths::cache_dir;

const LOG_FILE_NAME: &str = "toolshed.log";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

pub fn default_log_file() -> PathBuf {
    cache_dir().join(LOG_FILE_NAME)
}

/// Unknown names fall back to the default level.
pub fn parse_level(name: &str) -> log::LevelFilter {
    name.parse()
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.parse().unwrap_or(log::LevelFilter::Warn))
}

pub fn setup_logging(level: log::LevelFilter) -> anyhow::Result<()> {
    if level == log::LevelFilter::Off {
        return Ok(());
    }
    let log_file = default_log_file();
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("toolshed logging initialised (level={level})");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_file_ends_with_log_filename() {
        let path = default_log_file();
        assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
        assert!(path.parent().unwrap().ends_with("toolshed"));
    }

    #[test]
    fn parse_level_accepts_every_listed_name() {
        for name in LOG_LEVELS {
            assert_eq!(parse_level(name).to_string().to_lowercase(), name);
        }
        assert_eq!(parse_level("DEBUG"), log::LevelFilter::Debug);
        assert_eq!(parse_level("loud"), log::LevelFilter::Warn);
    }
}
