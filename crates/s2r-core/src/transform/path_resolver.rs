/// Join a base identifier with further path segments.
///
/// A segment carrying a protocol (`scheme://...`) replaces everything
/// accumulated so far. Otherwise segments are appended with `/` and the
/// result is normalized: empty and `.` segments are dropped and `..` removes
/// the preceding segment, if any. The `scheme://host` origin of a remote
/// identifier is never removed by `..`.
///
/// Examples:
/// - `resolve("/v1", &["./pets"])` → `/v1/pets`
/// - `resolve("http://a.com/v1", &["../x"])` → `http://a.com/x`
/// - `resolve("/v1", &["http://other.com/y"])` → `http://other.com/y`
pub fn resolve<S: AsRef<str>>(base: &str, segments: &[S]) -> String {
    let mut joined = base.to_string();

    for segment in segments {
        let segment = segment.as_ref();
        if has_protocol(segment) {
            joined = segment.to_string();
        } else {
            joined.push('/');
            joined.push_str(segment);
        }
    }

    normalize(&joined)
}

/// Whether an identifier starts with `scheme://`.
pub fn has_protocol(identifier: &str) -> bool {
    identifier
        .split_once("://")
        .is_some_and(|(scheme, _)| {
            !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Split `scheme://host/rest` into (`scheme://host`, `/rest`).
fn split_origin(identifier: &str) -> (Option<&str>, &str) {
    if !has_protocol(identifier) {
        return (None, identifier);
    }
    let after_scheme = identifier.find("://").map_or(0, |i| i + 3);
    let origin_end = identifier[after_scheme..]
        .find('/')
        .map_or(identifier.len(), |i| after_scheme + i);
    (Some(&identifier[..origin_end]), &identifier[origin_end..])
}

fn normalize(path: &str) -> String {
    let (origin, rest) = split_origin(path);
    let absolute = origin.is_none() && rest.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match origin {
        Some(origin) if joined.is_empty() => origin.to_string(),
        Some(origin) => format!("{origin}/{joined}"),
        None if absolute => format!("/{joined}"),
        None => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_segment() {
        assert_eq!(resolve("/v1", &["./pets"]), "/v1/pets");
    }

    #[test]
    fn test_absolute_segment_is_appended() {
        assert_eq!(resolve("/api-docs", &["/pet"]), "/api-docs/pet");
        assert_eq!(
            resolve("http://petstore.example.com/api/api-docs", &["/user"]),
            "http://petstore.example.com/api/api-docs/user"
        );
    }

    #[test]
    fn test_parent_segment_on_remote_base() {
        assert_eq!(resolve("http://a.com/v1", &["../x"]), "http://a.com/x");
    }

    #[test]
    fn test_parent_segment_never_strips_origin() {
        assert_eq!(resolve("http://a.com/v1", &["../../../x"]), "http://a.com/x");
        assert_eq!(resolve("http://a.com", &[".."]), "http://a.com");
    }

    #[test]
    fn test_protocol_segment_overrides() {
        assert_eq!(resolve("/v1", &["http://other.com/y"]), "http://other.com/y");
        assert_eq!(
            resolve("http://a.com/v1", &["http://other.com/y", "./z"]),
            "http://other.com/y/z"
        );
    }

    #[test]
    fn test_relative_base() {
        assert_eq!(resolve("docs/api", &["pets", "../users"]), "docs/api/users");
        assert_eq!(resolve("docs", &["../../x"]), "x");
    }

    #[test]
    fn test_multiple_segments() {
        assert_eq!(resolve("/a", &["b", "./c", "/d"]), "/a/b/c/d");
    }

    #[test]
    fn test_has_protocol() {
        assert!(has_protocol("https://example.com"));
        assert!(has_protocol("file:///tmp/docs"));
        assert!(!has_protocol("/tmp/http://x"));
        assert!(!has_protocol("docs/api"));
    }
}
