use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    error::{ApiRejection, ErrorBody},
    protocol::{
        AuthenticateResponse, DeleteRequest, DeleteResponse, LogPage, LogsQuery, RegisterRequest,
        RegisterResponse,
    },
};
use tracing::debug;
use url::Url;

pub mod controller;
pub mod error;
pub mod events;
pub mod state;

pub use controller::ScreenController;
pub use error::ClientError;
pub use events::{Notification, NotificationKind, Operation, ScreenEvent};
pub use state::{LogView, ScreenState};

const REGISTER_PATH: &str = "register/";
const AUTHENTICATE_PATH: &str = "authenticate/";
const DELETE_PATH: &str = "delete/";
const LOGS_PATH: &str = "logs/";

/// The four backend calls the screen makes.
#[async_trait]
pub trait FaceAuthApi: Send + Sync {
    async fn register(&self, name: &str) -> Result<RegisterResponse, ClientError>;
    async fn authenticate(&self) -> Result<AuthenticateResponse, ClientError>;
    async fn delete(&self, name: &str) -> Result<DeleteResponse, ClientError>;
    async fn fetch_logs(&self, query: LogsQuery) -> Result<LogPage, ClientError>;
}

pub struct HttpFaceAuthApi {
    http: Client,
    base_url: Url,
}

impl HttpFaceAuthApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                source,
            })
    }
}

/// Parses the configured base address and guarantees a trailing slash so
/// endpoint paths join underneath it instead of replacing its last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|source| ClientError::InvalidBaseUrl {
        url: trimmed.to_string(),
        source,
    })
}

/// Non-success statuses become [`ApiRejection`] carrying the server's error
/// text when the body has one; success bodies must decode as `T`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        let body = serde_json::from_slice::<ErrorBody>(&bytes).ok();
        return Err(ApiRejection::new(status.as_u16(), body).into());
    }
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl FaceAuthApi for HttpFaceAuthApi {
    async fn register(&self, name: &str) -> Result<RegisterResponse, ClientError> {
        let url = self.endpoint(REGISTER_PATH)?;
        debug!(%url, "POST register");
        let response = self
            .http
            .post(url)
            .json(&RegisterRequest {
                name: name.to_string(),
            })
            .send()
            .await?;
        read_json(response).await
    }

    async fn authenticate(&self) -> Result<AuthenticateResponse, ClientError> {
        let url = self.endpoint(AUTHENTICATE_PATH)?;
        debug!(%url, "GET authenticate");
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    async fn delete(&self, name: &str) -> Result<DeleteResponse, ClientError> {
        let url = self.endpoint(DELETE_PATH)?;
        debug!(%url, "DELETE person");
        let response = self
            .http
            .delete(url)
            .json(&DeleteRequest {
                name: name.to_string(),
            })
            .send()
            .await?;
        read_json(response).await
    }

    async fn fetch_logs(&self, query: LogsQuery) -> Result<LogPage, ClientError> {
        let url = self.endpoint(LOGS_PATH)?;
        debug!(%url, page = query.page, "GET logs");
        let response = self.http.get(url).query(&query).send().await?;
        read_json(response).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
