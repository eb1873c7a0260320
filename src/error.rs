use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid month {input} (expected 1-12)")]
    InvalidMonth { input: u32 },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },
}

/// Failures inside the record source layer. These never reach the user as
/// errors: the source logs them and hands back an empty record list.
#[derive(Debug, Error)]
pub(crate) enum SourceError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON from {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected response shape from {origin}: {detail}")]
    UnexpectedShape { origin: String, detail: String },
}
