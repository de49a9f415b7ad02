//! Fallos de los colaboradores externos (servicio de completado,
//! canonicalización). Nunca salen del resolver tal cual: se registran y se
//! traducen a `ResolutionError`.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ProviderError::Status { status: status.as_u16(), body: e.to_string() },
            None if e.is_decode() => ProviderError::Decode(e.to_string()),
            None => ProviderError::Transport(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_format() {
        let err = ProviderError::Status { status: 429, body: "quota".into() };
        assert_eq!(err.to_string(), "HTTP 429: quota");
    }

    #[test]
    fn test_from_serde_error_is_decode() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(ProviderError::from(serde_err), ProviderError::Decode(_)));
    }
}
