//! Request URL construction.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::form_urlencoded;

/// Appended to every location to address its REST endpoint.
pub const PATH_SUFFIX: &str = ".json";

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Build the query string carrying `auth` and `format`, in that order.
///
/// Returns an empty string when neither applies.
pub fn query_string(auth: Option<&str>, export: bool) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(token) = auth.filter(|token| !token.is_empty()) {
        serializer.append_pair("auth", token);
    }
    if export {
        serializer.append_pair("format", "export");
    }
    serializer.finish()
}

/// `base_url + ".json"`, followed by `?query` when there is one.
pub fn request_url(base_url: &str, auth: Option<&str>, export: bool) -> String {
    let mut url = format!("{}{}", base_url, PATH_SUFFIX);
    let query = query_string(auth, export);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}

/// Join a child path onto a location with exactly one slash between pieces.
///
/// Each `/`-separated piece of `segment` is percent-encoded as a key.
pub fn join(base_url: &str, segment: &str) -> String {
    let pieces: Vec<String> = segment
        .split('/')
        .filter(|piece| !piece.is_empty())
        .map(|piece| utf8_percent_encode(piece, SEGMENT).to_string())
        .collect();
    if pieces.is_empty() {
        return base_url.to_string();
    }
    format!("{}/{}", base_url.trim_end_matches('/'), pieces.join("/"))
}
