use serde::{Deserialize, Deserializer};
use std::io::IsTerminal;

/// Build tag baked in by the release pipeline
pub const BUILD_TAG: &str = match option_env!("BUILD_TAG") {
    Some(tag) => tag,
    None => "snapshot",
};

/// Git sha of the commit built
pub const BUILD_COMMIT: &str = match option_env!("BUILD_COMMIT") {
    Some(sha) => sha,
    None => "-",
};

static DEBUG_ENABLED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();
static IS_TERMINAL: std::sync::OnceLock<bool> = std::sync::OnceLock::new();

fn is_debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| {
        (cfg!(debug_assertions)
            || std::env::var("DRONE_DATADOG_DEBUG").unwrap_or_default() == "1")
            && std::env::var("DRONE_DATADOG_DEBUG").unwrap_or_default() != "0"
    })
}

fn stderr_is_terminal() -> bool {
    *IS_TERMINAL.get_or_init(|| std::io::stderr().is_terminal())
}

fn prefix() -> &'static str {
    if stderr_is_terminal() {
        "\x1b[1;34m[drone-datadog]\x1b[0m"
    } else {
        "[drone-datadog]"
    }
}

pub fn version_string() -> String {
    format!(
        "Drone-Datadog Plugin version: {} - git commit: {}",
        BUILD_TAG, BUILD_COMMIT
    )
}

/// Log a progress or diagnostic line to stderr
pub fn log_info(msg: &str) {
    eprintln!("{} {}", prefix(), msg);
}

/// Log a failure to stderr
pub fn log_error(msg: &str) {
    if stderr_is_terminal() {
        eprintln!("\x1b[1;31m[drone-datadog]\x1b[0m {}", msg);
    } else {
        eprintln!("[drone-datadog] {}", msg);
    }
}

/// Debug logging, enabled in debug builds or with `DRONE_DATADOG_DEBUG=1`
pub fn debug_log(msg: &str) {
    if is_debug_enabled() {
        eprintln!("{} (debug) {}", prefix(), msg);
    }
}

/// Treat an explicit JSON `null` the same as a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
