//! Small utility helpers used across modules.

/// Case-insensitive substring test (Unicode-aware lowercase on both sides).
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Query-string boolean: only the literal `"true"` is true; absent stays `None`.
pub fn parse_flag(raw: Option<&str>) -> Option<bool> {
  raw.map(|s| s == "true")
}

/// Parse a strictly positive integer, falling back to `default` on absence,
/// parse failure, zero or a negative value.
pub fn positive_or(raw: Option<&str>, default: u32) -> u32 {
  raw
    .and_then(|s| s.trim().parse::<i64>().ok())
    .filter(|n| *n > 0)
    .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
    .unwrap_or(default)
}

/// Treat empty or whitespace-only strings as missing.
pub fn non_blank(s: Option<String>) -> Option<String> {
  s.and_then(|v| {
    let t = v.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
  })
}

/// Borrow a query value, treating empty or whitespace-only as absent.
pub fn present(v: &Option<String>) -> Option<&str> {
  v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
