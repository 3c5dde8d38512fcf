pub mod accounts;
pub mod books;
pub mod community;

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

/// Compact user reference embedded in threads and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub username: String,
}

/// Serialize a secret as a plain string. Only used for request bodies.
pub(crate) fn expose_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Percent-encode `value` as exactly one path segment.
///
/// Returns `None` for values no URL can carry as a segment: the empty string,
/// `.` and `..` are collapsed by URL normalization whatever their encoding.
pub(crate) fn path_segment(value: &str) -> Option<String> {
    if matches!(value, "" | "." | "..") {
        return None;
    }

    let mut url = Url::parse("http://segment.invalid/").ok()?;
    url.path_segments_mut().ok()?.clear().push(value);
    Some(url.path().trim_start_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segment_escapes_separators() {
        assert_eq!(path_segment("alice").as_deref(), Some("alice"));
        assert_eq!(path_segment("x/y").as_deref(), Some("x%2Fy"));
        assert_eq!(path_segment("a?b").as_deref(), Some("a%3Fb"));
        assert_eq!(path_segment("a#b").as_deref(), Some("a%23b"));
        assert_eq!(path_segment("50%").as_deref(), Some("50%25"));
        assert_eq!(path_segment("a.b").as_deref(), Some("a.b"));
    }

    #[test]
    fn test_path_segment_rejects_dot_segments() {
        assert_eq!(path_segment(""), None);
        assert_eq!(path_segment("."), None);
        assert_eq!(path_segment(".."), None);
    }
}
