use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get access token from localStorage, trying each key in order
pub fn get_access_token(keys: &[String]) -> Option<String> {
    let storage = get_local_storage()?;
    keys.iter()
        .filter_map(|key| storage.get_item(key).ok().flatten())
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
}

/// Bearer header value for the stored token
pub fn bearer(keys: &[String]) -> Option<String> {
    get_access_token(keys).map(|token| format!("Bearer {}", token))
}
