use crate::domain::errors::PlotDecodeError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const DEFAULT_MIME: &str = "image/png";

/// A rendered shadow-zone plot, decoded from the backend's data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl PlotImage {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Parses `data:<mime>;base64,<payload>`. A bare base64 payload is taken as PNG.
    pub fn from_data_url(payload: &str) -> Result<Self, PlotDecodeError> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(PlotDecodeError::Empty);
        }

        let (mime, encoded) = match payload.strip_prefix("data:") {
            Some(rest) => {
                let (header, data) = rest.split_once(',').ok_or_else(|| PlotDecodeError::NotBase64 {
                    reason: "missing ',' after data URL header".to_string(),
                })?;
                let mut parts = header.split(';');
                let mime = parts.next().filter(|m| !m.is_empty()).unwrap_or(DEFAULT_MIME);
                let encoding = parts.last().unwrap_or("");
                if encoding != "base64" {
                    return Err(PlotDecodeError::UnsupportedEncoding {
                        encoding: if encoding.is_empty() { "none".to_string() } else { encoding.to_string() },
                    });
                }
                (mime.to_string(), data)
            }
            None => (DEFAULT_MIME.to_string(), payload),
        };

        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| PlotDecodeError::NotBase64 { reason: e.to_string() })?;
        if bytes.is_empty() {
            return Err(PlotDecodeError::Empty);
        }

        Ok(Self { mime, bytes })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    pub fn is_png(&self) -> bool {
        self.bytes.starts_with(&[0x89, b'P', b'N', b'G'])
    }
}
