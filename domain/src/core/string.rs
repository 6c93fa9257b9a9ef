//! String utilities for the domain layer.

/// Bodies up to this many bytes are logged verbatim.
pub const DEFAULT_MAX_BODY_SIZE: usize = 2048;

/// Number of bytes kept as a preview when a body is truncated.
pub const DEFAULT_PREVIEW_SIZE: usize = 500;

/// Largest index `<= index` that lies on a UTF-8 character boundary.
fn floor_boundary(s: &str, index: usize) -> usize {
    let mut end = index.min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Shorten a request/response body for logging.
///
/// Returns the body unchanged when it fits in `max_size` bytes, otherwise a
/// marker of the form
/// `[LARGE_BODY: truncated, size: N bytes, preview: <preview>...]`.
/// The preview never exceeds `max_size` and is cut on a char boundary.
pub fn truncate_body(body: &str, max_size: usize, preview_size: usize) -> String {
    if body.len() <= max_size {
        return body.to_string();
    }

    let preview_end = floor_boundary(body, preview_size.min(max_size));
    format!(
        "[LARGE_BODY: truncated, size: {} bytes, preview: {}...]",
        body.len(),
        &body[..preview_end]
    )
}

/// [`truncate_body`] with the default limits.
pub fn truncate_body_default(body: &str) -> String {
    truncate_body(body, DEFAULT_MAX_BODY_SIZE, DEFAULT_PREVIEW_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_body_unchanged() {
        assert_eq!(truncate_body("{\"a\":1}", 20, 5), "{\"a\":1}");
        assert_eq!(truncate_body("", 0, 0), "");
    }

    #[test]
    fn test_exact_limit_unchanged() {
        let body = "x".repeat(2048);
        assert_eq!(truncate_body_default(&body), body);
    }

    #[test]
    fn test_large_body_truncated() {
        let body = "a".repeat(3000);
        let out = truncate_body_default(&body);
        assert!(out.starts_with("[LARGE_BODY: truncated, size: 3000 bytes, preview: "));
        assert!(out.ends_with("...]"));
        assert!(out.contains(&"a".repeat(500)));
        assert!(!out.contains(&"a".repeat(501)));
    }

    #[test]
    fn test_preview_capped_by_max_size() {
        let out = truncate_body("abcdefghij", 4, 100);
        assert_eq!(out, "[LARGE_BODY: truncated, size: 10 bytes, preview: abcd...]");
    }

    #[test]
    fn test_preview_respects_char_boundary() {
        // each char is 3 bytes; a 4 byte preview backs off to one char
        let out = truncate_body("日本語テスト", 5, 4);
        assert_eq!(out, "[LARGE_BODY: truncated, size: 18 bytes, preview: 日...]");
    }
}
