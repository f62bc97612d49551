//! Backend API client: the HTTP collaborator of the session layer.
//!
//! A thin wrapper over `reqwest` that does exactly two session-related
//! things:
//!
//! 1. Attaches `Authorization: Bearer <token>` to every outgoing request
//!    while a valid session exists — and no such header otherwise. The
//!    decision is delegated to [`SessionManager::authorization`], which
//!    checks expiry against the live clock, so an expired token is never
//!    sent.
//! 2. Runs the sign-in flow: `POST /auth/login`, decode the
//!    [`SignInResponse`] bundle, establish the session.

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use towup_identity::{SignInRequest, SignInResponse};
use towup_session::{Notifier, Session, SessionManager, TracingNotifier};

use crate::TowupError;

/// Errors from talking to the backend REST API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, TLS,
    /// timeout) or the response body could not be decoded.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `message` is the
    /// backend's `{ "message": ... }` body when present, otherwise the
    /// status line.
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    /// The sign-in response carried a token that was already expired at
    /// the moment it arrived.
    #[error("sign-in returned an already-expired credential")]
    LapsedCredential,
}

/// Error body shape the backend uses for non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the TowUp backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    manager: SessionManager,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>, manager: SessionManager) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            manager,
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Routes user-facing messages (sign-in success) through `notifier`
    /// instead of the tracing log.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    // -- Auth flow --------------------------------------------------------

    /// Signs in against `POST /auth/login` and establishes the session
    /// from the returned bundle.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, TowupError> {
        let request = SignInRequest::new(email, password);
        let response = self.post("/auth/login", &request).await?;
        let bundle: SignInResponse =
            response.json().await.map_err(ApiError::Transport)?;

        self.manager.establish(bundle);
        // `establish` fails closed on a zero-lifetime bundle; a missing
        // session here means the credential was dead on arrival.
        let session = self
            .manager
            .current()
            .ok_or(ApiError::LapsedCredential)?;

        self.notifier
            .success("Welcome! You've signed in successfully!");
        Ok(session)
    }

    /// Signs out: clears the session and navigates to the sign-in route.
    pub fn sign_out(&self) {
        self.manager.terminate(None);
    }

    // -- Request helpers --------------------------------------------------

    /// `GET {base_url}{path}`.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let request = self.authorize(self.http.get(self.url(path)));
        Self::checked(request.send().await?).await
    }

    /// `POST {base_url}{path}` with a JSON body.
    pub async fn post<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.authorize(self.http.post(self.url(path)).json(body));
        Self::checked(request.send().await?).await
    }

    /// `PUT {base_url}{path}` with a JSON body.
    pub async fn put<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.authorize(self.http.put(self.url(path)).json(body));
        Self::checked(request.send().await?).await
    }

    /// `DELETE {base_url}{path}`.
    pub async fn delete(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let request = self.authorize(self.http.delete(self.url(path)));
        Self::checked(request.send().await?).await
    }

    // -- Internals --------------------------------------------------------

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.manager.authorization() {
            Some(value) => request.header(reqwest::header::AUTHORIZATION, value),
            None => request,
        }
    }

    /// Maps non-success statuses to [`ApiError::Status`], extracting the
    /// backend's error message when the body carries one.
    async fn checked(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.to_string());
        tracing::error!(status = status.as_u16(), %message, "API error");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

// =========================================================================
// Tests
// =========================================================================
