//! The POST primitive the dispatcher sends through.
//!
//! Dry run is a transport of its own, so everything above this layer
//! (encoding, URL building, per-event isolation) runs the same way in both
//! modes.

use crate::error::PluginError;
use crate::utils::debug_log;
use std::io::Write;
use url::Url;

pub trait Transport {
    /// POST `body` as JSON to `url`; any status of 300 or above is an error
    fn post_json(&mut self, url: &Url, body: &str) -> Result<(), PluginError>;
}

/// Sends requests over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl HttpTransport {
    pub fn new(timeout_secs: Option<u64>) -> Self {
        Self { timeout_secs }
    }
}

impl Transport for HttpTransport {
    fn post_json(&mut self, url: &Url, body: &str) -> Result<(), PluginError> {
        let mut request = minreq::post(url.as_str())
            .with_header(
                "User-Agent",
                format!("drone-datadog/{}", env!("CARGO_PKG_VERSION")),
            )
            .with_header("Content-Type", "application/json")
            .with_body(body);

        if let Some(timeout) = self.timeout_secs {
            request = request.with_timeout(timeout);
        }

        let response = request.send()?;
        debug_log(&format!(
            "POST {} -> {} {}",
            url.path(),
            response.status_code,
            response.reason_phrase
        ));

        if response.status_code >= 300 {
            return Err(PluginError::Status {
                code: response.status_code,
                reason: response.reason_phrase.clone(),
            });
        }

        Ok(())
    }
}

/// Logs each payload instead of sending it
#[derive(Debug)]
pub struct DryRunTransport<W: Write> {
    out: W,
}

impl DryRunTransport<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> DryRunTransport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Transport for DryRunTransport<W> {
    fn post_json(&mut self, url: &Url, body: &str) -> Result<(), PluginError> {
        debug_log(&format!("dry run, skipping POST {}", url.path()));
        // Dry run always succeeds, even if the sink is gone
        let _ = writeln!(self.out, "Dry run, logging payload:");
        let _ = writeln!(self.out, "{}", body);
        let _ = self.out.flush();
        Ok(())
    }
}
