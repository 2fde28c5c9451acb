use url::Url;

/// Returns true if two URLs share scheme, host and port
///
/// Host comparison is case-insensitive because the `url` crate lowercases
/// hosts while parsing. Default ports are implied, so `https://a.com` and
/// `https://a.com:443` share an origin.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_mirror::url::same_origin;
///
/// let base = Url::parse("https://example.com").unwrap();
/// assert!(same_origin(&Url::parse("https://EXAMPLE.com/a").unwrap(), &base));
/// assert!(!same_origin(&Url::parse("http://example.com/a").unwrap(), &base));
/// assert!(!same_origin(&Url::parse("https://other.example.com/a").unwrap(), &base));
/// ```
pub fn same_origin(url: &Url, base: &Url) -> bool {
    url.origin() == base.origin()
}
