//! Utility functions for the Workshop HTTP client.

use crate::client::ErrorCode;
use crate::error::FALLBACK_MESSAGE;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

pub fn is_access_denied_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}

pub fn is_absolute_url(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}

/// Absolute URLs pass through, anything else is appended to `base_url`.
pub fn resolve_url(base_url: &str, endpoint: &str) -> String {
    if is_absolute_url(endpoint) {
        return endpoint.to_string();
    }
    let base = base_url.trim_end_matches('/');
    let path = endpoint.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Escape user input for use as one path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Empty body reads as `None`; anything else must be JSON.
pub fn parse_body(body: &[u8]) -> Result<Option<Value>, serde_json::Error> {
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some)
}

/// User-facing message for a failed call.
///
/// `data.message` wins, then the Polish text for a known
/// `data.errorDescription`, then the fixed fallback. An empty `message`
/// counts as absent.
pub fn error_message(data: Option<&Value>) -> String {
    let Some(data) = data else {
        return FALLBACK_MESSAGE.to_string();
    };
    if let Some(message) = data.get("message").and_then(Value::as_str) {
        if !message.is_empty() {
            return message.to_string();
        }
    }
    data.get("errorDescription")
        .and_then(Value::as_str)
        .and_then(ErrorCode::from_description)
        .map(|code| code.message().to_string())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

/// `filename` parameter of a `Content-Disposition` header value, reduced
/// to its last path component. Names that are empty or only `.`/`..` are
/// dropped.
pub fn parse_disposition_filename(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|param| {
        let (key, val) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        safe_file_name(val.trim().trim_matches('"'))
    })
}

/// Last component of a server-supplied name. Both `/` and `\` separate.
pub fn safe_file_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    match last {
        "" | "." | ".." => None,
        _ => Some(last.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_url() {
        let base = "http://localhost:8080/api/v1";
        assert_eq!(
            resolve_url(base, "/clients/42"),
            "http://localhost:8080/api/v1/clients/42"
        );
        assert_eq!(
            resolve_url("http://localhost:8080/api/v1/", "clients"),
            "http://localhost:8080/api/v1/clients"
        );
        assert_eq!(
            resolve_url(base, "https://other.example/api/v1/auth/login"),
            "https://other.example/api/v1/auth/login"
        );
        assert_eq!(resolve_url(base, ""), base);
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("WX 1234A"), "WX%201234A");
        assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_segment("Żółć"), "%C5%BB%C3%B3%C5%82%C4%87");
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b"").unwrap(), None);
        assert_eq!(parse_body(b"{\"a\":1}").unwrap(), Some(json!({"a": 1})));
        assert!(parse_body(b"<html>").is_err());
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        let data = json!({"message": "Nie znaleziono", "errorDescription": "Client not found"});
        assert_eq!(error_message(Some(&data)), "Nie znaleziono");
    }

    #[test]
    fn test_error_message_from_error_description() {
        let data = json!({"errorCode": 1100, "errorDescription": "Repair not found"});
        assert_eq!(error_message(Some(&data)), "Naprawa nie została znaleziona.");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message(None), FALLBACK_MESSAGE);
        assert_eq!(error_message(Some(&json!([1, 2]))), FALLBACK_MESSAGE);
        assert_eq!(error_message(Some(&json!({"message": 5}))), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_disposition_filename() {
        assert_eq!(
            parse_disposition_filename("inline; filename=\"faktura.pdf\""),
            Some("faktura.pdf".to_string())
        );
        assert_eq!(
            parse_disposition_filename("attachment; FILENAME=scan.png"),
            Some("scan.png".to_string())
        );
        assert_eq!(parse_disposition_filename("inline"), None);
    }

    #[test]
    fn test_disposition_filename_strips_directories() {
        assert_eq!(
            parse_disposition_filename("attachment; filename=\"../../.bashrc\""),
            Some(".bashrc".to_string())
        );
        assert_eq!(
            parse_disposition_filename("attachment; filename=/home/u/.ssh/authorized_keys"),
            Some("authorized_keys".to_string())
        );
        assert_eq!(
            parse_disposition_filename("attachment; filename=\"..\\..\\boot.ini\""),
            Some("boot.ini".to_string())
        );
        assert_eq!(parse_disposition_filename("attachment; filename=\"..\""), None);
        assert_eq!(parse_disposition_filename("attachment; filename=\"docs/\""), None);
    }

    #[test]
    fn test_error_message_skips_empty_message() {
        let data = json!({"message": "", "errorDescription": "Repair not found"});
        assert_eq!(error_message(Some(&data)), "Naprawa nie została znaleziona.");
    }

    #[test]
    fn test_status_helpers() {
        assert!(is_success_status(204));
        assert!(!is_success_status(304));
        assert!(is_access_denied_status(401));
        assert!(is_access_denied_status(403));
        assert!(!is_access_denied_status(404));
    }
}
