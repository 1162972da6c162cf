use std::collections::BTreeMap;

/// Headers proving identity for a request: empty without a token,
/// `Authorization: Bearer <token>` otherwise.
pub fn auth_header(token: Option<&str>) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
    }
    headers
}
