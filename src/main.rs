use clap::Parser;
use drone_datadog::config::PluginInput;
use drone_datadog::dispatch::Dispatcher;
use drone_datadog::plugin::execute;
use drone_datadog::transport::{DryRunTransport, HttpTransport};
use drone_datadog::utils::{log_error, log_info, version_string};

#[derive(Parser)]
#[command(name = "drone-datadog")]
#[command(about = "Send metrics and events to Datadog from a Drone pipeline", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print plugin version
    #[arg(short = 'v', long = "version")]
    version: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        log_info(&version_string());
        std::process::exit(0);
    }

    let input = match PluginInput::from_env() {
        Ok(input) => input,
        Err(e) => {
            log_error(&format!("unable to read plugin settings: {}", e));
            std::process::exit(1);
        }
    };

    let config = match input.config() {
        Ok(config) => config,
        Err(e) => {
            log_error(&format!("configuration error: {}", e));
            std::process::exit(1);
        }
    };

    let status = if config.dry_run {
        let mut dispatcher = Dispatcher::new(DryRunTransport::stderr(), config.api_key);
        execute(&input, &mut dispatcher)
    } else {
        let transport = HttpTransport::new(Some(config.timeout_secs));
        let mut dispatcher = Dispatcher::new(transport, config.api_key);
        execute(&input, &mut dispatcher)
    };

    std::process::exit(status);
}
