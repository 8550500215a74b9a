use drone_datadog::config::PluginInput;
use serial_test::serial;

struct EnvVarGuard {
    key: &'static str,
    old: Option<String>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let old = std::env::var(key).ok();
        // SAFETY: tests marked `serial` avoid concurrent env mutation.
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, old }
    }

    fn unset(key: &'static str) -> Self {
        let old = std::env::var(key).ok();
        // SAFETY: tests marked `serial` avoid concurrent env mutation.
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: tests marked `serial` avoid concurrent env mutation.
        unsafe {
            if let Some(old) = &self.old {
                std::env::set_var(self.key, old);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }
}

#[test]
#[serial]
fn from_env_requires_api_key_for_live_runs() {
    let _key = EnvVarGuard::unset("PLUGIN_API_KEY");
    let _dry = EnvVarGuard::set("PLUGIN_DRY_RUN", "false");

    let input = PluginInput::from_env().expect("settings should decode");
    assert!(input.config().is_err());
}

#[test]
#[serial]
fn from_env_reads_key_and_payloads() {
    let _key = EnvVarGuard::set("PLUGIN_API_KEY", "123456");
    let _dry = EnvVarGuard::unset("PLUGIN_DRY_RUN");
    let _metrics = EnvVarGuard::set("PLUGIN_METRICS", r#"[{"name":"a"}]"#);
    let _events = EnvVarGuard::unset("PLUGIN_EVENTS");

    let input = PluginInput::from_env().expect("settings should decode");
    let config = input.config().expect("api key is set");
    assert_eq!(config.api_key, "123456");
    assert!(!config.dry_run);
    assert_eq!(input.metrics_raw(), r#"[{"name":"a"}]"#);
    assert_eq!(input.events_raw(), "");
}

#[test]
#[serial]
fn from_env_dry_run_without_key() {
    let _key = EnvVarGuard::unset("PLUGIN_API_KEY");
    let _dry = EnvVarGuard::set("PLUGIN_DRY_RUN", "true");

    let config = PluginInput::from_env()
        .and_then(|input| input.config())
        .expect("dry run needs no key");
    assert!(config.dry_run);
}
