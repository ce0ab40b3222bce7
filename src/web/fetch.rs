//! [`Transport`] over the browser `fetch` API.

use futures_util::future::LocalBoxFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, RequestCredentials, RequestInit, Window};

use crate::client::{FormBody, Request, Response, Transport};
use crate::domain::error::{ActionError, Result};
use crate::web::describe;

/// Sends requests with `window.fetch`, same-origin credentials and the
/// request's headers. Redirects are followed by the browser.
#[derive(Debug, Clone)]
pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

fn host_error(err: &JsValue) -> ActionError {
    ActionError::Host(describe(err))
}

fn body_value(body: &FormBody) -> Result<JsValue> {
    match body {
        FormBody::UrlEncoded(_) => Ok(JsValue::from_str(&body.to_urlencoded())),
        FormBody::Multipart(fields) => {
            let form = FormData::new().map_err(|err| host_error(&err))?;
            for (name, value) in fields {
                form.set_with_str(name, value).map_err(|err| host_error(&err))?;
            }
            Ok(form.into())
        }
    }
}

impl Transport for FetchTransport {
    fn send(&self, request: Request) -> LocalBoxFuture<'_, Result<Response>> {
        Box::pin(async move {
            let init = RequestInit::new();
            init.set_method(request.method.as_str());
            init.set_credentials(RequestCredentials::SameOrigin);

            let headers = Headers::new().map_err(|err| host_error(&err))?;
            for (name, value) in &request.headers {
                headers.set(name, value).map_err(|err| host_error(&err))?;
            }
            init.set_headers(&headers);

            if let Some(body) = &request.body {
                init.set_body(&body_value(body)?);
            }

            let reply = JsFuture::from(self.window.fetch_with_str_and_init(&request.url, &init))
                .await
                .map_err(|err| ActionError::Transport(describe(&err)))?;
            let response: web_sys::Response = reply.dyn_into().map_err(|err| host_error(&err))?;

            let reader = Clone::clone(&response);
            Ok::<_, ActionError>(Response::deferred(
                response.status(),
                response.status_text(),
                response.redirected(),
                response.url(),
                move || {
                    Box::pin(async move {
                        let promise = reader.text().map_err(|err| host_error(&err))?;
                        let text = JsFuture::from(promise).await.map_err(|err| host_error(&err))?;
                        Ok::<_, ActionError>(text.as_string().unwrap_or_default())
                    })
                },
            ))
        })
    }
}
