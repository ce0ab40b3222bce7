//! Uniform DELETE/POST wrapper over the resource API.
//!
//! Every entity request follows the same contract: send it with the
//! programmatic request marker, then let [`EntityClient::handle_response`]
//! decide between navigating (successful redirect), doing nothing (successful
//! response without redirect) and reporting an error (`status >= 400`).
//! Transport failures are reported too, so no request fails silently.

use std::rc::Rc;

use crate::client::request::{FormBody, Request, Response, Transport};
use crate::client::routes;
use crate::domain::{DeleteCommentParams, RequestOutcome, SavePlaceParams};
use crate::host::{ErrorSink, RedirectSink};

/// First HTTP status classified as a failure.
const FIRST_ERROR_STATUS: u16 = 400;

/// `statusText` used when no HTTP response was obtained.
pub const NETWORK_ERROR: &str = "Network error";

/// Issues entity requests and applies their outcome to the page.
///
/// Cloning is cheap; clones share the transport and the sinks.
#[derive(Clone)]
pub struct EntityClient {
    transport: Rc<dyn Transport>,
    redirect: Rc<dyn RedirectSink>,
    errors: Rc<dyn ErrorSink>,
}

impl EntityClient {
    pub fn new(
        transport: Rc<dyn Transport>,
        redirect: Rc<dyn RedirectSink>,
        errors: Rc<dyn ErrorSink>,
    ) -> Self {
        Self {
            transport,
            redirect,
            errors,
        }
    }

    /// Issues `DELETE url` and handles the response.
    pub async fn delete_entity(&self, url: &str) -> RequestOutcome {
        self.execute(Request::delete(url)).await
    }

    /// Issues `POST url` with `body` and handles the response.
    ///
    /// The body encoding must be the one the endpoint accepts.
    pub async fn post_entity(&self, url: &str, body: FormBody) -> RequestOutcome {
        self.execute(Request::post(url, body)).await
    }

    /// Deletes a comment: `DELETE /places/{placeId}/comments/{commentId}`.
    pub async fn delete_comment(&self, params: &DeleteCommentParams) -> RequestOutcome {
        self.delete_entity(&routes::comment(&params.place_id, &params.comment_id))
            .await
    }

    /// Saves a place with a visit status: multipart `POST /places/{placeId}`.
    pub async fn save_place(&self, params: &SavePlaceParams) -> RequestOutcome {
        let body = FormBody::Multipart(vec![
            ("external_id".to_string(), params.external_id.clone()),
            ("visit_status".to_string(), params.visit_status.clone()),
        ]);
        self.post_entity(&routes::place(&params.place_id), body).await
    }

    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: Request) -> RequestOutcome {
        match self.transport.send(request).await {
            Ok(response) => self.handle_response(response).await,
            Err(err) => {
                tracing::error!(error = %err, "request failed before a response arrived");
                let outcome = RequestOutcome::Failed {
                    status_text: NETWORK_ERROR.to_string(),
                    body_text: transport_detail(&err),
                };
                self.apply(&outcome);
                outcome
            }
        }
    }

    /// Classifies `response` and invokes the matching sink.
    ///
    /// - `status < 400`, redirected: the redirect sink receives `response.url`.
    /// - `status < 400`, not redirected: nothing happens.
    /// - `status >= 400`: the body is read in full and the error sink receives
    ///   `"<statusText>: <bodyText>"`. A body that cannot be read is replaced
    ///   by the read error.
    ///
    /// The returned outcome has already been applied.
    pub async fn handle_response(&self, response: Response) -> RequestOutcome {
        let outcome = classify(response).await;
        self.apply(&outcome);
        outcome
    }

    fn apply(&self, outcome: &RequestOutcome) {
        match outcome {
            RequestOutcome::Redirected(url) => {
                tracing::debug!(url = %url, "following redirect");
                self.redirect.redirect(url);
            }
            RequestOutcome::Completed => tracing::debug!("request completed without redirect"),
            failed @ RequestOutcome::Failed { .. } => {
                if let Some(message) = failed.error_message() {
                    tracing::error!(message = %message, "entity request failed");
                    self.errors.report(&message);
                }
            }
        }
    }
}

async fn classify(response: Response) -> RequestOutcome {
    if response.status < FIRST_ERROR_STATUS {
        return if response.redirected {
            RequestOutcome::Redirected(response.url)
        } else {
            RequestOutcome::Completed
        };
    }
    let status_text = response.status_text.clone();
    let body_text = match response.text().await {
        Ok(text) => text,
        Err(err) => {
            tracing::error!(error = %err, "failed to read error response body");
            err.to_string()
        }
    };
    RequestOutcome::Failed {
        status_text,
        body_text,
    }
}

/// Detail of a transport error without the `Network error:` prefix its
/// `Display` already carries.
fn transport_detail(err: &crate::domain::ActionError) -> String {
    match err {
        crate::domain::ActionError::Transport(detail) => detail.clone(),
        other => other.to_string(),
    }
}
