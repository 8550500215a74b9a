//! One pass of the plugin: parse both halves, then dispatch them.

use crate::config::PluginInput;
use crate::dispatch::{Dispatcher, EventReport};
use crate::error::PluginError;
use crate::parser::{parse_events, parse_metrics};
use crate::transport::Transport;
use crate::utils::{log_error, log_info};

/// What a run delivered; `None` means that half was skipped because its
/// configuration could not be decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub metrics_sent: Option<usize>,
    pub events: Option<EventReport>,
}

/// Send the configured metrics and events.
///
/// Returns an error only when the metrics request fails; the caller treats it
/// as fatal. Config errors in either half are logged and skip that half.
pub fn run<T: Transport>(
    input: &PluginInput,
    dispatcher: &mut Dispatcher<T>,
) -> Result<RunSummary, PluginError> {
    let mut summary = RunSummary::default();

    match parse_metrics(input.metrics_raw()) {
        Ok(metrics) => {
            let sent = dispatcher.send_metrics(&metrics)?;
            log_info(&format!("{} metric(s) sent successfully", sent));
            summary.metrics_sent = Some(sent);
        }
        Err(e) => log_info(&e.to_string()),
    }

    match parse_events(input.events_raw()) {
        Ok(events) => {
            let report = dispatcher.send_events(&events);
            log_info(&format!(
                "{} event(s) sent successfully out of {}",
                report.sent, report.attempted
            ));
            summary.events = Some(report);
        }
        Err(e) => log_info(&e.to_string()),
    }

    Ok(summary)
}

/// Line logged before exiting when the metrics request fails
pub fn metrics_failure_message(err: &PluginError) -> String {
    format!("unable to send metrics: {}", err)
}

/// Run once and map the outcome to a process exit status
pub fn execute<T: Transport>(input: &PluginInput, dispatcher: &mut Dispatcher<T>) -> i32 {
    match run(input, dispatcher) {
        Ok(_) => 0,
        Err(e) => {
            log_error(&metrics_failure_message(&e));
            1
        }
    }
}
