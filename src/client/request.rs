//! HTTP request/response model and the transport abstraction.
//!
//! The entity client describes requests as plain values and hands them to a
//! [`Transport`]. The browser host implements it with `fetch`; tests use a
//! scripted double. Response bodies are read lazily because the client only
//! needs the text of failed responses.

use std::fmt;

use futures_util::future::LocalBoxFuture;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::error::Result;

/// Header marking a request as issued by script rather than by a page navigation.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
/// Value of [`REQUESTED_WITH_HEADER`].
pub const REQUESTED_WITH_VALUE: &str = "fetch";
/// Content type of URL-encoded form bodies.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Bytes left unescaped by `application/x-www-form-urlencoded` serialization.
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b' ');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Delete,
    Post,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form body of a POST request.
///
/// The receiving endpoint decides which encoding it accepts; the caller must
/// pick the matching variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormBody {
    /// `application/x-www-form-urlencoded`
    UrlEncoded(Vec<(String, String)>),
    /// `multipart/form-data`; the transport supplies the boundary.
    Multipart(Vec<(String, String)>),
}

impl FormBody {
    /// Field pairs in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        match self {
            Self::UrlEncoded(fields) | Self::Multipart(fields) => fields,
        }
    }

    /// Explicit `Content-Type` header, `None` for multipart bodies.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::UrlEncoded(_) => Some(FORM_URLENCODED),
            Self::Multipart(_) => None,
        }
    }

    /// Serializes the fields as `application/x-www-form-urlencoded`.
    ///
    /// ```
    /// use place_actions::client::FormBody;
    ///
    /// let body = FormBody::UrlEncoded(vec![
    ///     ("visit_status".into(), "want to go".into()),
    ///     ("external_id".into(), "a&b".into()),
    /// ]);
    /// assert_eq!(body.to_urlencoded(), "visit_status=want+to+go&external_id=a%26b");
    /// ```
    #[must_use]
    pub fn to_urlencoded(&self) -> String {
        self.fields()
            .iter()
            .map(|(name, value)| format!("{}={}", encode_form(name), encode_form(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn encode_form(value: &str) -> String {
    utf8_percent_encode(value, FORM_VALUE).to_string().replace(' ', "+")
}

/// A programmatic request against the resource API.
///
/// Always sent with same-origin credentials and the
/// `X-Requested-With: fetch` marker, which lets the server answer with a short
/// redirect instead of a full page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<FormBody>,
}

impl Request {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>, body: Option<FormBody>) -> Self {
        let mut headers = vec![(
            REQUESTED_WITH_HEADER.to_string(),
            REQUESTED_WITH_VALUE.to_string(),
        )];
        if let Some(content_type) = body.as_ref().and_then(FormBody::content_type) {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }
        Self {
            method,
            url: url.into(),
            headers,
            body,
        }
    }

    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url, None)
    }

    #[must_use]
    pub fn post(url: impl Into<String>, body: FormBody) -> Self {
        Self::new(Method::Post, url, Some(body))
    }

    /// Looks up a header value, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

type BodyReader = Box<dyn FnOnce() -> LocalBoxFuture<'static, Result<String>>>;

enum Body {
    Text(String),
    Deferred(BodyReader),
}

/// Response delivered by a [`Transport`].
pub struct Response {
    pub status: u16,
    pub status_text: String,
    /// Whether the transport followed at least one redirect.
    pub redirected: bool,
    /// Final URL after redirects.
    pub url: String,
    body: Body,
}

impl Response {
    /// Builds a response whose body is already in memory.
    #[must_use]
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        url: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            redirected: false,
            url: url.into(),
            body: Body::Text(body.into()),
        }
    }

    /// Builds a response whose body is read on demand by `reader`.
    #[must_use]
    pub fn deferred(
        status: u16,
        status_text: impl Into<String>,
        redirected: bool,
        url: impl Into<String>,
        reader: impl FnOnce() -> LocalBoxFuture<'static, Result<String>> + 'static,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            redirected,
            url: url.into(),
            body: Body::Deferred(Box::new(reader)),
        }
    }

    /// Marks the response as the result of following a redirect.
    #[must_use]
    pub fn redirected(mut self) -> Self {
        self.redirected = true;
        self
    }

    /// Reads the whole body as text.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the body stream fails.
    pub async fn text(self) -> Result<String> {
        match self.body {
            Body::Text(text) => Ok(text),
            Body::Deferred(reader) => reader().await,
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("redirected", &self.redirected)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// Sends requests and yields responses.
///
/// Implementations follow redirects themselves and report the final URL, the
/// way `fetch` does. An `Err` means no response was obtained at all; HTTP
/// error statuses are successful transports.
pub trait Transport {
    fn send(&self, request: Request) -> LocalBoxFuture<'_, Result<Response>>;
}
