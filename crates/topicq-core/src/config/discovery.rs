//! Configuration discovery and resolution

use super::types::{Config, QueueSettings};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Explicitly requested config file does not exist
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),
}

/// Command-line overrides for configuration
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Override queue directory
    pub base_dir: Option<PathBuf>,
    /// Override poll interval
    pub poll_interval: Option<Duration>,
    /// Override lock timeout
    pub lock_timeout: Option<Duration>,
    /// Path to config file override
    pub config_path: Option<PathBuf>,
}

/// Resolve settings from all sources
///
/// Priority (highest to lowest):
/// 1. Command-line overrides
/// 2. Environment variables (`Q_DIR`, `Q_POLL_MS`, `Q_LOCK_TIMEOUT_MS`)
/// 3. Config file (`--config` path, else `~/.config/q/config.toml`)
/// 4. Defaults (`$XDG_STATE_HOME/q`, else `~/.local/state/q`)
pub fn resolve_config(
    overrides: &ConfigOverrides,
    home_dir: &Path,
) -> Result<QueueSettings, ConfigError> {
    let config = match overrides.config_path {
        // An explicit path must load
        Some(ref path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            load_config_file(path)?
        }
        None => {
            let global_config_path = home_dir.join(".config/q/config.toml");
            if global_config_path.exists() {
                load_config_file(&global_config_path).unwrap_or_else(|e| {
                    warn!("Failed to parse global config at {global_config_path:?}: {e}");
                    Config::default()
                })
            } else {
                Config::default()
            }
        }
    };

    let mut settings = QueueSettings {
        base_dir: default_base_dir(home_dir),
        lock_timeout: config.store.lock_timeout_ms.map(Duration::from_millis),
        poll_interval: Duration::from_millis(config.poll.interval_ms),
        watch: config.poll.watch,
    };
    if let Some(ref dir) = config.store.base_dir {
        settings.base_dir = expand_home(dir, home_dir);
    }

    apply_env_overrides(&mut settings, home_dir);
    apply_cli_overrides(&mut settings, overrides);

    Ok(settings)
}

/// Default queue directory: `$XDG_STATE_HOME/q`, else `~/.local/state/q`
pub fn default_base_dir(home_dir: &Path) -> PathBuf {
    match non_empty_env("XDG_STATE_HOME") {
        Some(state) => PathBuf::from(state).join("q"),
        None => home_dir.join(".local/state/q"),
    }
}

/// Load config from a TOML file
fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Apply environment variable overrides
fn apply_env_overrides(settings: &mut QueueSettings, home_dir: &Path) {
    if let Some(dir) = non_empty_env("Q_DIR") {
        settings.base_dir = expand_home(Path::new(&dir), home_dir);
    }

    if let Some(ms) = env_millis("Q_POLL_MS") {
        settings.poll_interval = ms;
    }

    if let Some(ms) = env_millis("Q_LOCK_TIMEOUT_MS") {
        settings.lock_timeout = Some(ms);
    }
}

/// Apply command-line overrides
fn apply_cli_overrides(settings: &mut QueueSettings, overrides: &ConfigOverrides) {
    if let Some(ref dir) = overrides.base_dir {
        settings.base_dir = dir.clone();
    }

    if let Some(interval) = overrides.poll_interval {
        settings.poll_interval = interval;
    }

    if let Some(timeout) = overrides.lock_timeout {
        settings.lock_timeout = Some(timeout);
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_millis(name: &str) -> Option<Duration> {
    let raw = non_empty_env(name)?;
    match raw.parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            warn!("Ignoring {name}={raw:?}: expected milliseconds");
            None
        }
    }
}

/// Expand a leading `~/` to `home_dir`
fn expand_home(path: &Path, home_dir: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home_dir.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    fn clear_env() {
        unsafe {
            env::remove_var("Q_DIR");
            env::remove_var("Q_POLL_MS");
            env::remove_var("Q_LOCK_TIMEOUT_MS");
            env::remove_var("XDG_STATE_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env();
        let home = TempDir::new().unwrap();

        let settings = resolve_config(&ConfigOverrides::default(), home.path()).unwrap();
        assert_eq!(settings.base_dir, home.path().join(".local/state/q"));
        assert_eq!(settings.poll_interval, Duration::from_millis(200));
        assert!(settings.lock_timeout.is_none());
        assert!(settings.watch);
    }

    #[test]
    #[serial]
    fn test_xdg_state_home() {
        clear_env();
        let home = TempDir::new().unwrap();
        unsafe { env::set_var("XDG_STATE_HOME", "/state") };

        let settings = resolve_config(&ConfigOverrides::default(), home.path()).unwrap();
        assert_eq!(settings.base_dir, PathBuf::from("/state/q"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_global_config_file() {
        clear_env();
        let home = TempDir::new().unwrap();
        let config_dir = home.path().join(".config/q");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[store]\nbase_dir = \"~/queues\"\nlock_timeout_ms = 250\n\n[poll]\ninterval_ms = 75\n",
        )
        .unwrap();

        let settings = resolve_config(&ConfigOverrides::default(), home.path()).unwrap();
        assert_eq!(settings.base_dir, home.path().join("queues"));
        assert_eq!(settings.lock_timeout, Some(Duration::from_millis(250)));
        assert_eq!(settings.poll_interval, Duration::from_millis(75));
    }

    #[test]
    #[serial]
    fn test_broken_global_config_ignored() {
        clear_env();
        let home = TempDir::new().unwrap();
        let config_dir = home.path().join(".config/q");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), "[store\nbase_dir = ").unwrap();

        let settings = resolve_config(&ConfigOverrides::default(), home.path()).unwrap();
        assert_eq!(settings.base_dir, home.path().join(".local/state/q"));
    }

    #[test]
    #[serial]
    fn test_explicit_config_path_must_exist() {
        clear_env();
        let home = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            config_path: Some(home.path().join("missing.toml")),
            ..Default::default()
        };

        let result = resolve_config(&overrides, home.path());
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        let home = TempDir::new().unwrap();
        unsafe {
            env::set_var("Q_DIR", "/env/q");
            env::set_var("Q_POLL_MS", "10");
            env::set_var("Q_LOCK_TIMEOUT_MS", "not-a-number");
        }

        let settings = resolve_config(&ConfigOverrides::default(), home.path()).unwrap();
        assert_eq!(settings.base_dir, PathBuf::from("/env/q"));
        assert_eq!(settings.poll_interval, Duration::from_millis(10));
        assert!(settings.lock_timeout.is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_cli_overrides_win() {
        clear_env();
        let home = TempDir::new().unwrap();
        unsafe { env::set_var("Q_DIR", "/env/q") };

        let overrides = ConfigOverrides {
            base_dir: Some(PathBuf::from("/cli/q")),
            poll_interval: Some(Duration::from_millis(5)),
            lock_timeout: Some(Duration::from_secs(1)),
            config_path: None,
        };

        let settings = resolve_config(&overrides, home.path()).unwrap();
        assert_eq!(settings.base_dir, PathBuf::from("/cli/q"));
        assert_eq!(settings.poll_interval, Duration::from_millis(5));
        assert_eq!(settings.lock_timeout, Some(Duration::from_secs(1)));
        clear_env();
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/user");
        assert_eq!(
            expand_home(Path::new("~/q"), home),
            PathBuf::from("/home/user/q")
        );
        assert_eq!(expand_home(Path::new("/abs/q"), home), PathBuf::from("/abs/q"));
    }
}
