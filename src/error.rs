use thiserror::Error;

/// Everything that can go wrong while fetching one listing page.
///
/// `Http` and `Network` are both transport failures; `Decode` means the
/// server answered but the body was not an image list.  None of them is
/// fatal: the gallery reports the message and returns to idle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {status} {reason}")]
    Http { status: u16, reason: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode image list: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Network(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_carries_status_and_reason() {
        let err = FetchError::Http {
            status: 503,
            reason: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "HTTP error: 503 Service Unavailable");
        assert!(err.is_transport());
    }

    #[test]
    fn decode_error_is_not_transport() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = FetchError::from(json_err);
        assert!(!err.is_transport());
        assert!(err.to_string().starts_with("could not decode image list"));
    }
}
