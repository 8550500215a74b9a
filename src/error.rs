use std::fmt;

#[derive(Debug)]
pub enum PluginError {
    /// Malformed plugin settings: bad JSON input, missing API key, bad env value
    Config(String),
    /// A payload could not be serialized
    Encoding(serde_json::Error),
    /// The request never got a response
    Transport(String),
    /// The service answered with a non-success status
    Status { code: i32, reason: String },
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::Config(e) => write!(f, "{}", e),
            PluginError::Encoding(e) => write!(f, "encoding error: {}", e),
            PluginError::Transport(e) => write!(f, "unable to send data: {}", e),
            PluginError::Status { code, reason } => {
                write!(f, "server responded with: {} {}", code, reason)
            }
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PluginError::Encoding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        PluginError::Encoding(err)
    }
}

impl From<envy::Error> for PluginError {
    fn from(err: envy::Error) -> Self {
        PluginError::Config(format!("invalid plugin settings: {}", err))
    }
}

impl From<minreq::Error> for PluginError {
    fn from(err: minreq::Error) -> Self {
        PluginError::Transport(err.to_string())
    }
}

impl From<url::ParseError> for PluginError {
    fn from(err: url::ParseError) -> Self {
        PluginError::Config(format!("invalid endpoint URL: {}", err))
    }
}
