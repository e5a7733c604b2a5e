//! HTTP client for the dashboard backend.

use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};

use arona_core::error::{DecodeError, ProtocolError, TransportError};
use arona_core::{ApiUrl, Error, Result, TokenService};

/// Error body shape the backend uses for non-success responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    message: Option<String>,
}

/// Low-level HTTP client bound to one backend origin.
///
/// Attaches the bearer token, when one is held, to every request. The
/// underlying client keeps a cookie jar for the legacy session cookie.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    api: ApiUrl,
    tokens: Option<TokenService>,
}

impl HttpClient {
    /// Create a client for `api`, reading bearer tokens from `tokens`.
    pub fn new(api: ApiUrl, tokens: Option<TokenService>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("arona/", env!("CARGO_PKG_VERSION")))
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::Setup {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api,
            tokens,
        })
    }

    /// Returns the backend origin this client talks to.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// GET `url` and decode the JSON body as `what`.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn get<R>(&self, url: &str, what: &'static str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!("GET");
        let request = self.authorize(self.client.get(url));
        let response = request.send().await.map_err(transport)?;
        self.handle_response(response, what).await
    }

    /// GET `url`, discarding the body.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn get_no_response(&self, url: &str) -> Result<()> {
        debug!("GET (no response)");
        let request = self.authorize(self.client.get(url));
        let response = request.send().await.map_err(transport)?;
        self.expect_success(response).await
    }

    /// POST `body` as JSON to `url`, discarding the response body.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn post_no_response<B>(&self, url: &str, body: &B) -> Result<()>
    where
        B: Serialize + std::fmt::Debug,
    {
        debug!("POST");
        trace!(?body, "request body");
        let request = self.authorize(self.client.post(url).json(body));
        let response = request.send().await.map_err(transport)?;
        self.expect_success(response).await
    }

    /// DELETE `url`.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn delete(&self, url: &str) -> Result<()> {
        debug!("DELETE");
        let request = self.authorize(self.client.delete(url));
        let response = request.send().await.map_err(transport)?;
        self.expect_success(response).await
    }

    /// Attach `Authorization: Bearer` if a token is held.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = match &self.tokens {
            Some(tokens) => tokens.get().unwrap_or_else(|e| {
                warn!(error = %e, "Token storage unreadable, sending without token");
                None
            }),
            None => None,
        };

        match token {
            Some(token) => {
                trace!("attaching bearer token");
                request.bearer_auth(token.as_str())
            }
            None => request,
        }
    }

    /// Decode a success body, or turn the response into a protocol error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: Response,
        what: &'static str,
    ) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.text().await.map_err(transport)?;
            serde_json::from_str(&body).map_err(|e| {
                Error::Decode(DecodeError::Schema {
                    what,
                    reason: e.to_string(),
                })
            })
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    async fn expect_success(&self, response: Response) -> Result<()> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    /// Build a [`ProtocolError`], keeping the raw body.
    async fn parse_error_response(&self, response: Response) -> ProtocolError {
        let status = response.status().as_u16();
        let body = response.text().await.ok().filter(|b| !b.is_empty());

        let message = body
            .as_deref()
            .and_then(|b| serde_json::from_str::<ErrorResponse>(b).ok())
            .and_then(|e| e.message.or(e.error));

        debug!(status, ?message, "backend returned an error");
        ProtocolError::new(status, message, body)
    }
}

/// Classify a reqwest failure.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
