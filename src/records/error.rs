use thiserror::Error;

/// Errors produced while turning file contents into typed records.
///
/// `line` is 1-based. Song files hold a single object and always report
/// line 1.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("line {line}: invalid JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: missing required field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid field '{field}': {reason}")]
    InvalidField {
        line: usize,
        field: &'static str,
        reason: String,
    },

    #[error("line {line}: not valid UTF-8: {source}")]
    Encoding {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Decode raw file contents, reporting the line of the first invalid byte.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, RecordError> {
    std::str::from_utf8(bytes).map_err(|source| RecordError::Encoding {
        line: bytes[..source.valid_up_to()]
            .iter()
            .filter(|b| **b == b'\n')
            .count()
            + 1,
        source,
    })
}

/// Unwrap a required field or report it as missing.
pub(super) fn required<T>(
    value: Option<T>,
    line: usize,
    field: &'static str,
) -> Result<T, RecordError> {
    value.ok_or(RecordError::MissingField { line, field })
}

/// Treat blank strings as absent.
pub(super) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
