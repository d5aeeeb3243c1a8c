//! Reference normalization
//!
//! Turns a raw attribute or `url(...)` value into a root-relative path that can
//! be compared against the filesystem. The rules run in a fixed order:
//!
//! 1. trim whitespace, discard if empty
//! 2. discard `mailto:`, `tel:`, `javascript:` and in-page `#` anchors
//! 3. cut the fragment, then the query
//! 4. percent-decode
//! 5. reduce absolute `http(s)://` URLs to their path
//! 6. drop leading `/`
//! 7. drop any number of leading `./`

use std::borrow::Cow;

use tracing::trace;

use crate::types::Reference;

/// Values starting with one of these never point at a local resource
const IGNORED_PREFIXES: &[&str] = &["mailto:", "tel:", "javascript:", "#"];

const ABSOLUTE_SCHEMES: &[&str] = &["http://", "https://"];

/// Normalize a raw captured value, or `None` when it is not a resource reference.
///
/// Any value that survives the discard checks yields a reference, even an
/// empty one.
pub fn normalize(raw: &str) -> Option<Reference> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if IGNORED_PREFIXES.iter().any(|prefix| value.starts_with(prefix)) {
        trace!("Ignoring non-resource reference {:?}", value);
        return None;
    }

    let value = strip_fragment_and_query(value);
    let decoded = percent_decode(value);

    let path: Cow<'_, str> = if ABSOLUTE_SCHEMES.iter().any(|scheme| decoded.starts_with(scheme)) {
        Cow::Owned(url_path(&decoded))
    } else {
        Cow::Borrowed(decoded.as_str())
    };

    let mut path = path.trim_start_matches('/');
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }

    Some(Reference::new(path.to_string()))
}

fn strip_fragment_and_query(value: &str) -> &str {
    let value = value.split_once('#').map_or(value, |(head, _)| head);
    value.split_once('?').map_or(value, |(head, _)| head)
}

/// Decode `%XX` escapes; undecodable UTF-8 becomes U+FFFD
fn percent_decode(value: &str) -> String {
    let bytes = urlencoding::decode_binary(value.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Path component of an absolute URL, without leading slashes.
///
/// The host ends at the first `/`, `?` or `#`, the path at the first `?` or
/// `#`. Parameters (`;...`) on the last segment are dropped and tab, CR and LF
/// characters are ignored.
fn url_path(url: &str) -> String {
    let cleaned: String = url.chars().filter(|c| !matches!(c, '\t' | '\r' | '\n')).collect();
    let after_scheme = cleaned.split_once("://").map_or("", |(_, rest)| rest);

    let path_start = after_scheme.find(&['/', '?', '#'][..]).unwrap_or(after_scheme.len());
    let rest = &after_scheme[path_start..];
    let path_end = rest.find(&['?', '#'][..]).unwrap_or(rest.len());

    strip_params(&rest[..path_end]).trim_start_matches('/').to_string()
}

fn strip_params(path: &str) -> &str {
    let last_segment = path.rfind('/').unwrap_or(0);
    match path[last_segment..].find(';') {
        Some(offset) => &path[..last_segment + offset],
        None => path,
    }
}
