use thiserror::Error;

/// Failure modes of the fetch → parse pipeline.
///
/// Callers match on the variant to decide how to surface the failure;
/// transport problems and extraction problems stay distinguishable all the
/// way up to the API layer.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Request timed out for query '{0}'")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Upstream returned HTTP {status}")]
    Http { status: u16 },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to parse results page: {0}")]
    Parsing(String),
}

impl ScrapeError {
    /// Upstream HTTP status, when the failure carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_variant_exposes_status() {
        assert_eq!(ScrapeError::Http { status: 503 }.status(), Some(503));
        assert_eq!(ScrapeError::Timeout("mice".to_string()).status(), None);
        assert_eq!(ScrapeError::Parsing("bad page".to_string()).status(), None);
    }

    #[test]
    fn display_names_the_failure() {
        let e = ScrapeError::Http { status: 404 };
        assert_eq!(e.to_string(), "Upstream returned HTTP 404");

        let e = ScrapeError::Timeout("usb microphone".to_string());
        assert!(e.to_string().contains("usb microphone"));
    }
}
