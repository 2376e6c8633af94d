use thiserror::Error;

/// Parse failures for CVSS vector strings.
///
/// These are reported as values so callers (typically a form layer) can tell
/// "bad input, ask the user to fix it" apart from programming errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    /// Missing `CVSS:3.1/` prefix, or a segment without a `CODE:VALUE` shape.
    #[error("malformed vector: expected `CVSS:3.1/` followed by CODE:VALUE segments")]
    MalformedVector,

    /// Metric code is not one of the 8 base metrics.
    #[error("unknown metric code `{0}`")]
    UnknownMetric(String),

    /// Value is not a valid option for that metric.
    #[error("invalid value `{value}` for metric `{metric}`")]
    UnknownOption { metric: String, value: String },

    /// Strict decoding: one of the 8 required metrics is absent.
    #[error("incomplete vector: missing metric `{0}`")]
    IncompleteVector(&'static str),
}
