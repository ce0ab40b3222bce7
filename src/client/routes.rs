//! URLs of the resource API and of the search result pages.
//!
//! Path segments and query values come from markup attributes and user input,
//! so every one of them is percent-encoded. The `location` parameter is built
//! from numbers and keeps its literal comma (`location=51.5,-0.12`).

use std::fmt::Write as _;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::Coordinates;

/// Characters left as-is in a URI component, matching `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `value` as a single URI component.
///
/// ```
/// use place_actions::client::routes::encode_component;
///
/// assert_eq!(encode_component("fish & chips"), "fish%20%26%20chips");
/// ```
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `/places/{placeId}`
#[must_use]
pub fn place(place_id: &str) -> String {
    format!("/places/{}", encode_component(place_id))
}

/// `/places/{placeId}/comments/{commentId}`
#[must_use]
pub fn comment(place_id: &str, comment_id: &str) -> String {
    format!("{}/comments/{}", place(place_id), encode_component(comment_id))
}

/// `/places/nearby?location=<lat>,<lng>&radius=<r>&place_type=<t>[&page_cursor=<c>]`
#[must_use]
pub fn nearby(location: Coordinates, radius: &str, place_type: &str, cursor: Option<&str>) -> String {
    let mut url = format!(
        "/places/nearby?location={location}&radius={}&place_type={}",
        encode_component(radius),
        encode_component(place_type)
    );
    push_cursor(&mut url, cursor);
    url
}

/// `/places/search?location=<lat>,<lng>&radius=<r>&query=<q>[&page_cursor=<c>]`
#[must_use]
pub fn text_search(location: Coordinates, radius: &str, query: &str, cursor: Option<&str>) -> String {
    let mut url = format!(
        "/places/search?location={location}&radius={}&query={}",
        encode_component(radius),
        encode_component(query)
    );
    push_cursor(&mut url, cursor);
    url
}

fn push_cursor(url: &mut String, cursor: Option<&str>) {
    if let Some(cursor) = cursor {
        let _ = write!(url, "&page_cursor={}", encode_component(cursor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERE: Coordinates = Coordinates {
        latitude: 51.5,
        longitude: -0.12,
    };

    #[test]
    fn comment_route() {
        assert_eq!(comment("5", "9"), "/places/5/comments/9");
    }

    #[test]
    fn path_segments_cannot_escape_their_slot() {
        assert_eq!(comment("5/../admin", "9"), "/places/5%2F..%2Fadmin/comments/9");
    }

    #[test]
    fn nearby_route_without_cursor() {
        assert_eq!(
            nearby(HERE, "1500", "restaurant", None),
            "/places/nearby?location=51.5,-0.12&radius=1500&place_type=restaurant"
        );
    }

    #[test]
    fn text_route_encodes_query_and_cursor() {
        assert_eq!(
            text_search(HERE, "500", "tacos & beer #1", Some("abc=")),
            "/places/search?location=51.5,-0.12&radius=500&query=tacos%20%26%20beer%20%231&page_cursor=abc%3D"
        );
    }
}
