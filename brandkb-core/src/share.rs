//! Share links for knowledge bases.
//!
//! A link has the form `{base_url}/shared/{token}` where the token is the
//! standard padded base64 encoding of `{"id": <record timestamp>}`, the same
//! encoding a browser's `btoa`/`atob` pair produces and reads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
struct SharePayload {
    id: String,
}

/// Encode a share token for a record timestamp
pub fn share_token(timestamp: &str) -> Result<String> {
    if timestamp.is_empty() {
        return Err(Error::validation("Timestamp is required to share a knowledge base"));
    }
    let payload = serde_json::to_vec(&SharePayload {
        id: timestamp.to_string(),
    })?;
    Ok(STANDARD.encode(payload))
}

/// Build a share link under `base_url`
pub fn share_link(base_url: &str, timestamp: &str) -> Result<String> {
    Ok(format!(
        "{}/shared/{}",
        base_url.trim_end_matches('/'),
        share_token(timestamp)?
    ))
}

/// Decode a share token or link back into the record timestamp
pub fn parse_share(token_or_link: &str) -> Result<String> {
    // Standard base64 may contain '/', so split on the first marker only
    let token = token_or_link
        .split_once("/shared/")
        .map(|(_, token)| token)
        .unwrap_or(token_or_link);

    let bytes = STANDARD
        .decode(token)
        .map_err(|e| Error::validation(format!("Invalid share token: {}", e)))?;
    let payload: SharePayload = serde_json::from_slice(&bytes)?;
    if payload.id.is_empty() {
        return Err(Error::validation("Share token has no id"));
    }
    Ok(payload.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link_shape() {
        let link = share_link("https://app.example.com/", "2024-05-01T10:00:00.000Z").unwrap();
        assert!(link.starts_with("https://app.example.com/shared/"));
        assert_eq!(parse_share(&link).unwrap(), "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_share_token_is_padded_standard_base64() {
        assert_eq!(share_token("t1").unwrap(), "eyJpZCI6InQxIn0=");
        assert_eq!(parse_share("eyJpZCI6InQxIn0=").unwrap(), "t1");
        assert_eq!(parse_share("https://x/shared/eyJpZCI6InQxIn0=").unwrap(), "t1");
    }

    #[test]
    fn test_parse_token_containing_slash() {
        let timestamp = "2024?";
        assert_eq!(share_token(timestamp).unwrap(), "eyJpZCI6IjIwMjQ/In0=");
        let link = share_link("https://app.example.com", timestamp).unwrap();
        assert_eq!(parse_share(&link).unwrap(), timestamp);
    }

    #[test]
    fn test_share_requires_timestamp() {
        assert!(share_token("").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_share("https://x/shared/!!!").is_err());
        assert!(parse_share(&STANDARD.encode(b"{\"id\":\"\"}")).is_err());
    }
}
