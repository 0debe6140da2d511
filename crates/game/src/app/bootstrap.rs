use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use snake_engine::{LoopConfig, DEFAULT_TARGET_FPS};
use snake_game::state::{GameState, Settings, SettingsError};

use super::demo::DemoSession;

const SETTINGS_PATH_ENV_VAR: &str = "SNAKE_SETTINGS_PATH";
const TARGET_FPS_ENV_VAR: &str = "SNAKE_TARGET_FPS";
const DEMO_SECONDS_ENV_VAR: &str = "SNAKE_DEMO_SECONDS";
const SLOW_TICK_ENV_VAR: &str = "SNAKE_SLOW_TICK_MS";

const DEFAULT_SETTINGS_FILE: &str = "snake-settings.json";
const DEFAULT_DEMO_SECONDS: f64 = 10.0;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) settings_path: PathBuf,
    pub(crate) session: DemoSession,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Infinite Snake Startup ===");

    let settings_path = resolve_settings_path();
    let settings = load_settings(&settings_path);

    let mut initial = GameState::default();
    initial.ui.settings = settings;

    let config = LoopConfig {
        target_fps: resolve_target_fps(),
        ..LoopConfig::default()
    };
    let session = DemoSession::new(initial, resolve_demo_seconds(), resolve_slow_tick());

    AppWiring {
        config,
        settings_path,
        session,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn load_settings(path: &Path) -> Settings {
    match Settings::load(path) {
        Ok(settings) => {
            info!(path = %path.display(), "settings_loaded");
            settings
        }
        Err(SettingsError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no settings file yet; using defaults");
            Settings::default()
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unusable settings file; using defaults");
            Settings::default()
        }
    }
}

fn resolve_settings_path() -> PathBuf {
    match env::var(SETTINGS_PATH_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        Ok(_) | Err(env::VarError::NotPresent) => PathBuf::from(DEFAULT_SETTINGS_FILE),
        Err(err) => {
            warn!(
                env_var = SETTINGS_PATH_ENV_VAR,
                error = %err,
                "unable to read settings-path env var; falling back to default"
            );
            PathBuf::from(DEFAULT_SETTINGS_FILE)
        }
    }
}

fn resolve_target_fps() -> f64 {
    match env::var(TARGET_FPS_ENV_VAR) {
        Ok(value) => match parse_target_fps(&value) {
            Some(fps) => fps,
            None => {
                warn!(
                    env_var = TARGET_FPS_ENV_VAR,
                    value = value.as_str(),
                    "invalid target-fps env var value; falling back to default"
                );
                DEFAULT_TARGET_FPS
            }
        },
        Err(env::VarError::NotPresent) => DEFAULT_TARGET_FPS,
        Err(err) => {
            warn!(
                env_var = TARGET_FPS_ENV_VAR,
                error = %err,
                "unable to read target-fps env var; falling back to default"
            );
            DEFAULT_TARGET_FPS
        }
    }
}

fn resolve_demo_seconds() -> f64 {
    match env::var(DEMO_SECONDS_ENV_VAR) {
        Ok(value) => match parse_demo_seconds(&value) {
            Some(seconds) => seconds,
            None => {
                warn!(
                    env_var = DEMO_SECONDS_ENV_VAR,
                    value = value.as_str(),
                    "invalid demo-seconds env var value; falling back to default"
                );
                DEFAULT_DEMO_SECONDS
            }
        },
        Err(env::VarError::NotPresent) => DEFAULT_DEMO_SECONDS,
        Err(err) => {
            warn!(
                env_var = DEMO_SECONDS_ENV_VAR,
                error = %err,
                "unable to read demo-seconds env var; falling back to default"
            );
            DEFAULT_DEMO_SECONDS
        }
    }
}

fn resolve_slow_tick() -> Option<Duration> {
    match env::var(SLOW_TICK_ENV_VAR) {
        Ok(value) => match parse_slow_tick(&value) {
            Some(delay) if !delay.is_zero() => {
                warn!(
                    delay_ms = delay.as_millis() as u64,
                    "artificial update delay enabled"
                );
                Some(delay)
            }
            Some(_) => None,
            None => {
                warn!(
                    env_var = SLOW_TICK_ENV_VAR,
                    value = value.as_str(),
                    "invalid slow-tick env var value; ignoring"
                );
                None
            }
        },
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            warn!(
                env_var = SLOW_TICK_ENV_VAR,
                error = %err,
                "unable to read slow-tick env var; ignoring"
            );
            None
        }
    }
}

fn parse_target_fps(raw: &str) -> Option<f64> {
    let fps = raw.trim().parse::<f64>().ok()?;
    if fps.is_finite() && fps > 0.0 {
        Some(fps)
    } else {
        None
    }
}

fn parse_demo_seconds(raw: &str) -> Option<f64> {
    let seconds = raw.trim().parse::<f64>().ok()?;
    if seconds.is_finite() && seconds > 0.0 {
        Some(seconds)
    } else {
        None
    }
}

fn parse_slow_tick(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_overrides_must_be_finite_and_positive() {
        assert_eq!(parse_target_fps("120"), Some(120.0));
        assert_eq!(parse_target_fps(" 48.5 "), Some(48.5));
        assert_eq!(parse_target_fps("0"), None);
        assert_eq!(parse_target_fps("-30"), None);
        assert_eq!(parse_target_fps("NaN"), None);
        assert_eq!(parse_target_fps("inf"), None);
        assert_eq!(parse_target_fps("fast"), None);
    }

    #[test]
    fn demo_length_overrides_follow_the_same_rules() {
        assert_eq!(parse_demo_seconds("30"), Some(30.0));
        assert_eq!(parse_demo_seconds("2.5"), Some(2.5));
        assert_eq!(parse_demo_seconds("0"), None);
        assert_eq!(parse_demo_seconds("forever"), None);
    }

    #[test]
    fn slow_tick_overrides_parse_as_whole_milliseconds() {
        assert_eq!(parse_slow_tick("250"), Some(Duration::from_millis(250)));
        assert_eq!(parse_slow_tick("0"), Some(Duration::ZERO));
        assert_eq!(parse_slow_tick("-1"), None);
        assert_eq!(parse_slow_tick("0.5"), None);
    }
}
