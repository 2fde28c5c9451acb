use crate::{UrlError, UrlResult};
use std::sync::OnceLock;
use url::Url;

/// Identifier given to the site root
pub const ROOT_IDENTIFIER: &str = "index";

/// Placeholder origin used to resolve bare paths; never requested
fn path_base() -> &'static Url {
    static BASE: OnceLock<Url> = OnceLock::new();
    BASE.get_or_init(|| Url::parse("http://localhost/").expect("static base URL is valid"))
}

/// Maps a URL or URL path to its page identifier
///
/// # Normalization Steps
///
/// 1. Input of the form `scheme://...` must be HTTP(S); anything else,
///    including `notes:intro`, is treated as a path on the site
/// 2. Keep only the path component (scheme, host, query and fragment are dropped)
/// 3. Strip leading and trailing slashes
/// 4. An empty result (the site root) becomes `index`
/// 5. Reject identifiers that could escape the output directories
///
/// Normalizing an identifier again returns it unchanged.
///
/// # Examples
///
/// ```
/// use sumi_mirror::url::normalize_identifier;
///
/// assert_eq!(normalize_identifier("https://example.com/blog/post-1/").unwrap(), "blog/post-1");
/// assert_eq!(normalize_identifier("/").unwrap(), "index");
/// assert_eq!(normalize_identifier("blog/post-1").unwrap(), "blog/post-1");
/// ```
pub fn normalize_identifier(raw: &str) -> UrlResult<String> {
    let raw = raw.trim();

    let url = if has_authority(raw) {
        let url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                url.scheme()
            )));
        }
        url
    } else {
        // Anything without `scheme://` is a site path, even if a segment holds a colon
        let path = format!("/{}", raw.trim_start_matches('/'));
        path_base()
            .join(&path)
            .map_err(|e| UrlError::Parse(e.to_string()))?
    };

    let trimmed = url.path().trim_matches('/');
    let identifier = if trimmed.is_empty() {
        ROOT_IDENTIFIER
    } else {
        trimmed
    };

    validate_identifier(identifier)?;
    Ok(identifier.to_string())
}

/// True for `scheme://...` input; bare identifiers such as `notes:intro` are paths
fn has_authority(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Checks that an identifier is safe to use as a relative file path
///
/// Identifiers become `html/<id>.html` and `markdown/<id>.md`, so any
/// segment that walks upwards, any absolute marker, and any platform
/// separator other than `/` is rejected.
pub fn validate_identifier(identifier: &str) -> UrlResult<()> {
    let unsafe_id = || UrlError::UnsafeIdentifier(identifier.to_string());

    if identifier.is_empty() || identifier.starts_with('/') {
        return Err(unsafe_id());
    }

    if identifier.contains('\\') || identifier.contains('\0') {
        return Err(unsafe_id());
    }

    // Windows drive prefixes such as `C:`
    let bytes = identifier.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return Err(unsafe_id());
    }

    if identifier.split('/').any(|segment| segment == ".." || segment == ".") {
        return Err(unsafe_id());
    }

    Ok(())
}

/// Maps an identifier back to the path requested from the site
///
/// # Examples
///
/// ```
/// use sumi_mirror::url::request_path;
///
/// assert_eq!(request_path("index"), "/");
/// assert_eq!(request_path("blog/post-1"), "/blog/post-1");
/// ```
pub fn request_path(identifier: &str) -> String {
    if identifier == ROOT_IDENTIFIER {
        "/".to_string()
    } else {
        format!("/{}", identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_forms_map_to_index() {
        assert_eq!(normalize_identifier("/").unwrap(), "index");
        assert_eq!(normalize_identifier("").unwrap(), "index");
        assert_eq!(normalize_identifier("https://example.com").unwrap(), "index");
        assert_eq!(normalize_identifier("https://example.com/").unwrap(), "index");
    }

    #[test]
    fn test_strip_scheme_and_host() {
        let id = normalize_identifier("https://example.com/about").unwrap();
        assert_eq!(id, "about");
    }

    #[test]
    fn test_strip_slashes() {
        assert_eq!(normalize_identifier("/about/").unwrap(), "about");
        assert_eq!(normalize_identifier("/about//").unwrap(), "about");
        assert_eq!(normalize_identifier("/blog/post-1/").unwrap(), "blog/post-1");
    }

    #[test]
    fn test_drop_query_and_fragment() {
        assert_eq!(normalize_identifier("/search?q=rust#top").unwrap(), "search");
        assert_eq!(
            normalize_identifier("https://example.com/a/b?x=1").unwrap(),
            "a/b"
        );
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "/",
            "",
            "/about/",
            "https://example.com/blog/post-1",
            "/caf%C3%A9",
            "/with space",
            "index",
            "/notes:intro",
            "/http:foo",
            "/a/b:c/d",
        ] {
            let once = normalize_identifier(raw).unwrap();
            let twice = normalize_identifier(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_dot_segments_cannot_escape() {
        let id = normalize_identifier("/../../etc/passwd").unwrap();
        assert_eq!(id, "etc/passwd");

        let id = normalize_identifier("https://example.com/a/%2e%2e/%2e%2e/b").unwrap();
        assert_eq!(id, "b");
    }

    #[test]
    fn test_colon_segments_stay_paths() {
        assert_eq!(normalize_identifier("/notes:intro").unwrap(), "notes:intro");
        assert_eq!(normalize_identifier("notes:intro").unwrap(), "notes:intro");
        assert_eq!(normalize_identifier("http:foo").unwrap(), "http:foo");
        assert_eq!(normalize_identifier("HTTPS://Example.com/x").unwrap(), "x");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = normalize_identifier("ftp://example.com/file");
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("index").is_ok());
        assert!(validate_identifier("blog/post-1").is_ok());
        assert!(validate_identifier("v1.2/notes").is_ok());

        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("/etc/passwd").is_err());
        assert!(validate_identifier("../secret").is_err());
        assert!(validate_identifier("a/../../b").is_err());
        assert!(validate_identifier("a/./b").is_err());
        assert!(validate_identifier("a\\b").is_err());
        assert!(validate_identifier("C:/windows").is_err());
    }

    #[test]
    fn test_request_path_roundtrip() {
        for id in ["index", "about", "blog/post-1"] {
            assert_eq!(normalize_identifier(&request_path(id)).unwrap(), id);
        }
    }
}
