//! Policy document normalization.
//!
//! IAM hands out policy documents as RFC 3986 percent-encoded JSON. Before they can
//! be embedded in a template they are decoded and re-indented with two spaces per
//! nesting level. Key order and number tokens are kept as received.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid percent-encoding at byte {position}")]
    InvalidEscape { position: usize },
    #[error("decoded policy document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("policy document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Percent-decode and pretty-print a policy document as returned by IAM.
pub fn decode_policy_document(encoded: &str) -> Result<String, DocumentError> {
    validate_escapes(encoded)?;
    let decoded = percent_encoding::percent_decode_str(encoded).decode_utf8()?;
    reindent(&decoded)
}

/// Re-indent an already decoded JSON document with two spaces per level.
pub fn reindent(json: &str) -> Result<String, DocumentError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

// percent_decode_str passes malformed escapes through untouched; reject them instead.
fn validate_escapes(encoded: &str) -> Result<(), DocumentError> {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
            if !valid {
                return Err(DocumentError::InvalidEscape { position: i });
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
