//! Font source resolution.
//!
//! Snapshots reference fonts the same way they would reference any other
//! binary asset: inline as a data URI or raw base64, or by explicit path.

/// Resolve a font source string to raw font bytes.
///
/// Supported `src` formats:
/// - `data:font/...;base64,...` (or any `data:` URI with a base64 payload)
/// - File path with an explicit prefix (`/`, `./`, `../`), read from disk
/// - Raw base64-encoded font data
pub fn load_font_source(src: &str) -> Result<Vec<u8>, String> {
    if src.starts_with("data:") {
        let comma_pos = src
            .find(',')
            .ok_or_else(|| "Invalid data URI: missing comma".to_string())?;
        return base64_decode(&src[comma_pos + 1..]);
    }

    // Only match explicit path prefixes so base64 payloads (which contain
    // '/') are not mistaken for paths.
    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        #[cfg(not(target_arch = "wasm32"))]
        {
            return std::fs::read(src)
                .map_err(|e| format!("Failed to read font file '{}': {}", src, e));
        }
        #[cfg(target_arch = "wasm32")]
        {
            return Err(format!(
                "File path fonts not supported in WASM: '{}'. Use data URIs or base64.",
                src
            ));
        }
    }

    base64_decode(src)
}

fn base64_decode(input: &str) -> Result<Vec<u8>, String> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input.trim())
        .map_err(|e| format!("Base64 decode error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        let bytes = load_font_source("data:font/ttf;base64,AAEAAA==").unwrap();
        assert_eq!(bytes, vec![0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_raw_base64() {
        let bytes = load_font_source("T1RUTw==").unwrap();
        assert_eq!(bytes, b"OTTO".to_vec());
    }

    #[test]
    fn test_data_uri_without_comma() {
        assert!(load_font_source("data:font/ttf;base64").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_font_source("./definitely/not/here.ttf").unwrap_err();
        assert!(err.contains("Failed to read font file"));
    }
}
