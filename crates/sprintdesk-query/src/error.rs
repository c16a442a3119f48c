/// Errors raised while resolving filter options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("options for filter `{key}` are unavailable: {reason}")]
    OptionsUnavailable { key: String, reason: String },

    /// Raised by option producers themselves.
    #[error("{0}")]
    Producer(String),
}
