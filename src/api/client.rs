//! REST Client
//!
//! Thin façade over `reqwest` that joins endpoints to the base URL,
//! attaches credentials and translates every failure into [`ApiError`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::Query;
use crate::config::Config;
use crate::error::{ApiError, Result};

// == Upload ==
/// A multipart upload: plain text fields plus one file sent as `file`.
#[derive(Debug, Clone)]
pub struct Upload {
    fields: Vec<(String, String)>,
    file: PathBuf,
}

impl Upload {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            fields: Vec::new(),
            file: file.into(),
        }
    }

    pub fn field(mut self, name: &str, value: impl ToString) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    async fn into_form(self) -> Result<Form> {
        let bytes = tokio::fs::read(&self.file).await?;
        let file_name = self
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let form = self
            .fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        Ok(form.part("file", Part::bytes(bytes).file_name(file_name)))
    }
}

// == Api Client ==
/// Client for the inventory REST API.
///
/// Cloning is cheap; clones share the connection pool and the session
/// cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    // == Constructors ==
    /// Creates a client for `base_url` with a 30 second timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, Duration::from_secs(30))
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::build(&config.base_url, config.request_timeout)?;
        Ok(match &config.api_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }

    fn build(base_url: &str, timeout: Duration) -> Result<Self> {
        // Without the trailing slash `Url::join` would drop the last segment
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url,
            token: None,
            http,
        })
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // == Verbs ==
    /// `GET endpoint?query`, decoding the JSON body as `T`.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &Query) -> Result<T> {
        let request = self.request(Method::GET, endpoint)?.query(query.pairs());
        Self::send_json(request).await
    }

    /// `POST endpoint` with a JSON body.
    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, endpoint)?.json(body);
        Self::send_json(request).await
    }

    /// `POST endpoint` with an empty JSON object, ignoring the response body.
    pub async fn post_empty(&self, endpoint: &str) -> Result<()> {
        let request = self
            .request(Method::POST, endpoint)?
            .json(&serde_json::json!({}));
        Self::send_no_content(request).await
    }

    /// `PUT endpoint` with a JSON body.
    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, endpoint)?.json(body);
        Self::send_json(request).await
    }

    /// `DELETE endpoint`, ignoring the response body.
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        let request = self.request(Method::DELETE, endpoint)?;
        Self::send_no_content(request).await
    }

    /// `POST endpoint` as multipart/form-data.
    pub async fn upload<T: DeserializeOwned>(&self, endpoint: &str, upload: Upload) -> Result<T> {
        let form = upload.into_form().await?;
        let request = self.request(Method::POST, endpoint)?.multipart(form);
        Self::send_json(request).await
    }

    // == Internals ==
    fn url(&self, endpoint: &str) -> Result<Url> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{endpoint}: {e}")))
    }

    fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        debug!(%method, %url, "Sending API request");

        let request = self.http.request(method, url);
        Ok(match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let body = Self::send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_no_content(request: RequestBuilder) -> Result<()> {
        Self::send(request).await.map(|_| ())
    }

    /// Sends the request and returns the body of a success response.
    async fn send(request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            debug!(%status, "API request failed");
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:8000/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8000/api/");
    }

    #[test]
    fn test_endpoint_join_has_no_double_slash() {
        let client = ApiClient::new("http://127.0.0.1:8000/api/").unwrap();

        let url = client.url("/grupos/4/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/grupos/4/");

        let url = client.url("talleres/1/stock").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/talleres/1/stock");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::new("not a url");
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_from_config_sets_token() {
        let config = Config {
            api_token: Some("secret".into()),
            ..Config::default()
        };
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.token.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_upload_of_missing_file_is_io_error() {
        let upload = Upload::new("/definitely/not/here.csv").field("taller_id", 1);
        assert!(matches!(upload.into_form().await, Err(ApiError::Io(_))));
    }
}
