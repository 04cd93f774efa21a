// src/response/loader.rs
use crate::response::models::RawResponse;
use crate::utils::error::LoadError;
use std::io::Read;
use std::path::Path;

/// Reads a saved agent response.
///
/// `-` reads stdin. `.json` files hold either an array of message strings or an
/// object with a `messages` array; anything else is one text fragment.
pub fn load_response(path: &Path) -> Result<RawResponse, LoadError> {
    let (content, is_json) = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        let looks_json = buf.trim_start().starts_with(|c| c == '[' || c == '{');
        (buf, looks_json)
    } else {
        tracing::info!("Reading bot response from: {}", path.display());
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        (std::fs::read_to_string(path)?, is_json)
    };

    let response = if is_json {
        parse_response_json(&content)?
    } else {
        RawResponse::from_text(content)
    };

    if response.is_blank() {
        return Err(LoadError::Empty(path.display().to_string()));
    }

    tracing::debug!("Loaded {} response fragment(s)", response.fragments.len());
    Ok(response)
}

/// Decodes the JSON layouts a saved response can take.
pub fn parse_response_json(content: &str) -> Result<RawResponse, LoadError> {
    let json: serde_json::Value = serde_json::from_str(content)?;

    let messages = match &json {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => map
            .get("messages")
            .and_then(|m| m.as_array())
            .ok_or_else(|| LoadError::Layout("object has no `messages` array".to_string()))?,
        _ => return Err(LoadError::Layout("expected an array or an object".to_string())),
    };

    let mut fragments = Vec::with_capacity(messages.len());
    for message in messages {
        match message.as_str() {
            Some(text) => fragments.push(text.to_string()),
            None => tracing::warn!("Skipping non-text message entry: {}", message),
        }
    }

    Ok(RawResponse { fragments })
}
