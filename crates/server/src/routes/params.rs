use std::borrow::Cow;

use axum::http::Uri;
use percent_encoding::percent_decode_str;

/// Path segment `index` (1-based, as in `/1/2/3`), percent-decoded lossily.
///
/// Names are opaque: bytes that are not UTF-8 become U+FFFD instead of a 400.
pub fn lossy_segment(uri: &Uri, index: usize) -> String {
    uri.path()
        .split('/')
        .nth(index)
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy())
        .unwrap_or(Cow::Borrowed(""))
        .into_owned()
}
