use thiserror::Error;

/// Errors talking to the framing stats backend
#[derive(Debug, Error)]
pub enum StatsServiceError {
    #[error("Stats service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Could not reach stats service: {reason}")]
    Transport { reason: String },

    #[error("Malformed stats service response: {reason}")]
    Decode { reason: String },

    #[error("Plot response for catcher {catcher_id} in game {game_pk} had no image")]
    MissingImage { catcher_id: i64, game_pk: i64 },
}

impl StatsServiceError {
    /// Text suitable for showing to the user in place of the loaded data.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Api { .. } | Self::Decode { .. } => "Failed to fetch data".to_string(),
            Self::Transport { .. } => {
                "Failed to connect to backend. Make sure the stats server is running.".to_string()
            }
            Self::MissingImage { .. } => "Unknown error".to_string(),
        }
    }
}

/// Errors decoding an embedded plot image
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlotDecodeError {
    #[error("Plot payload is empty")]
    Empty,

    #[error("Unsupported data URL encoding: {encoding}")]
    UnsupportedEncoding { encoding: String },

    #[error("Plot payload is not valid base64: {reason}")]
    NotBase64 { reason: String },
}
