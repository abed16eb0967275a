//! `ApiClient`: one method per backend endpoint.
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | `POST`   | `/auth/register` | [`AuthResponse`] |
//! | `POST`   | `/auth/login` | [`AuthResponse`] |
//! | `GET`    | `/users/{id}` | [`User`] |
//! | `PUT`    | `/users/{id}` | [`User`] |
//! | `GET`    | `/projects` | `Vec<Project>`; filter fields as query params |
//! | `GET`    | `/projects/{id}` | [`Project`] |
//! | `POST`   | `/projects` | [`Project`] |
//! | `PUT`    | `/projects/{id}` | [`Project`] |
//! | `DELETE` | `/projects/{id}` | `()`; 204, no body |
//! | `POST`   | `/projects/{id}/apply` | [`ProjectMember`] |
//! | `POST`   | `/projects/{id}/accept/{user_id}` | [`ProjectMember`] |
//! | `GET`    | `/projects/{id}/messages` | `Vec<Message>` |
//! | `POST`   | `/projects/{id}/messages` | [`Message`] |

use std::{fmt, future::Future, sync::Arc};

use exchange_core::{
  project::{Message, NewMessage, NewProject, Project, ProjectMember, ProjectPatch},
  query::ProjectFilter,
  source::ProjectSource,
  user::{AuthResponse, Credentials, Registration, User, UserPatch},
};
use reqwest::{
  Client, Method, RequestBuilder, Response,
  header::{CONTENT_TYPE, HeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{ClientError, CredentialSource, Result, Settings};

/// Shape of an error body: `{"error": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
  error: Option<String>,
}

/// Async HTTP client for the project exchange API.
///
/// Cheap to clone; the inner [`reqwest::Client`] and the credential source
/// are both shared.
#[derive(Clone)]
pub struct ApiClient {
  http:        Client,
  base_url:    String,
  credentials: Arc<dyn CredentialSource>,
}

impl fmt::Debug for ApiClient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ApiClient")
      .field("base_url", &self.base_url)
      .finish_non_exhaustive()
  }
}

impl ApiClient {
  pub fn new(
    settings: &Settings,
    credentials: impl CredentialSource + 'static,
  ) -> Result<Self> {
    let http = Client::builder()
      .timeout(settings.timeout())
      .build()
      .map_err(ClientError::Build)?;
    Ok(Self {
      http,
      base_url: settings.base_url.trim_end_matches('/').to_string(),
      credentials: Arc::new(credentials),
    })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

  /// A JSON request for `path`, carrying the current bearer token if any.
  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    let req = self
      .http
      .request(method, self.url(path))
      .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    match self.credentials.bearer_token() {
      Some(token) if !token.is_empty() => req.bearer_auth(token),
      _ => req,
    }
  }

  /// Send `req` once. Non-success statuses become [`ClientError::Request`].
  async fn execute(&self, req: RequestBuilder) -> Result<Response> {
    let request = req.build().map_err(ClientError::Network)?;
    let method = request.method().clone();
    let url = request.url().clone();
    debug!(%method, %url, "sending request");

    let resp = self.http.execute(request).await.map_err(|e| {
      warn!(%method, %url, error = %e, "no response");
      ClientError::Network(e)
    })?;

    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }

    let err = rejection(resp).await;
    warn!(%method, %url, status = status.as_u16(), error = %err, "request rejected");
    Err(err)
  }

  /// Send `req` once and decode the JSON body.
  async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
    let body = self
      .execute(req)
      .await?
      .bytes()
      .await
      .map_err(ClientError::Network)?;
    serde_json::from_slice(&body).map_err(ClientError::Decode)
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  /// `POST /auth/register`
  pub async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
    self
      .fetch(self.request(Method::POST, "/auth/register").json(registration))
      .await
  }

  /// `POST /auth/login`
  pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
    self
      .fetch(self.request(Method::POST, "/auth/login").json(credentials))
      .await
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  /// `GET /users/{id}`
  pub async fn get_user(&self, id: u64) -> Result<User> {
    self
      .fetch(self.request(Method::GET, &format!("/users/{id}")))
      .await
  }

  /// `PUT /users/{id}`
  pub async fn update_user(&self, id: u64, patch: &UserPatch) -> Result<User> {
    self
      .fetch(self.request(Method::PUT, &format!("/users/{id}")).json(patch))
      .await
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  /// `GET /projects[?category=..][&level=..][&methodology=..][&duration=..][&involvement=..][&min_kpi=..]`
  pub async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>> {
    self
      .fetch(self.request(Method::GET, "/projects").query(filter))
      .await
  }

  /// `GET /projects/{id}`
  pub async fn get_project(&self, id: u64) -> Result<Project> {
    self
      .fetch(self.request(Method::GET, &format!("/projects/{id}")))
      .await
  }

  /// `POST /projects`
  pub async fn create_project(&self, project: &NewProject) -> Result<Project> {
    self
      .fetch(self.request(Method::POST, "/projects").json(project))
      .await
  }

  /// `PUT /projects/{id}`
  pub async fn update_project(&self, id: u64, patch: &ProjectPatch) -> Result<Project> {
    self
      .fetch(self.request(Method::PUT, &format!("/projects/{id}")).json(patch))
      .await
  }

  /// `DELETE /projects/{id}`. The backend answers 204 with no body.
  pub async fn delete_project(&self, id: u64) -> Result<()> {
    self
      .execute(self.request(Method::DELETE, &format!("/projects/{id}")))
      .await
      .map(|_| ())
  }

  // ── Membership ────────────────────────────────────────────────────────────

  /// `POST /projects/{id}/apply`: creates a pending membership for the
  /// authenticated user.
  pub async fn apply_to_project(&self, id: u64) -> Result<ProjectMember> {
    self
      .fetch(self.request(Method::POST, &format!("/projects/{id}/apply")))
      .await
  }

  /// `POST /projects/{id}/accept/{user_id}`: owner only.
  pub async fn accept_member(&self, id: u64, user_id: u64) -> Result<ProjectMember> {
    self
      .fetch(self.request(Method::POST, &format!("/projects/{id}/accept/{user_id}")))
      .await
  }

  // ── Messages ──────────────────────────────────────────────────────────────

  /// `GET /projects/{id}/messages`
  pub async fn list_messages(&self, id: u64) -> Result<Vec<Message>> {
    self
      .fetch(self.request(Method::GET, &format!("/projects/{id}/messages")))
      .await
  }

  /// `POST /projects/{id}/messages`
  pub async fn send_message(&self, id: u64, message: &NewMessage) -> Result<Message> {
    self
      .fetch(
        self
          .request(Method::POST, &format!("/projects/{id}/messages"))
          .json(message),
      )
      .await
  }
}

impl ProjectSource for ApiClient {
  type Error = ClientError;

  fn list_projects<'a>(
    &'a self,
    filter: &'a ProjectFilter,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + 'a {
    ApiClient::list_projects(self, filter)
  }
}

/// Build the error for a non-success response. Uses the body's `error` field
/// when it is a non-empty string, else a message derived from the status.
async fn rejection(resp: Response) -> ClientError {
  let status = resp.status();
  let message = resp
    .bytes()
    .await
    .ok()
    .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
    .and_then(|body| body.error)
    .filter(|m| !m.is_empty())
    .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
  ClientError::Request { status, message }
}
