use crate::notification::NotificationResponse;
use reqwest::StatusCode;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("authentication required")]
    AuthRequired,

    #[error("resource not found")]
    NotFound,

    #[error("forbidden")]
    Forbidden,

    #[error("transient fetch failure: {0}")]
    Transient(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transient(err.to_string())
    }
}

/// Bearer-authenticated client for the notification endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub async fn list_notifications(&self) -> Result<Vec<NotificationResponse>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/notifications", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Ok(check_status(response)?.json().await?)
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<NotificationResponse, ClientError> {
        let response = self
            .http
            .put(format!("{}/api/notifications/{}/read", self.base_url, id))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Ok(check_status(response)?.json().await?)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ClientError::AuthRequired),
        StatusCode::FORBIDDEN => Err(ClientError::Forbidden),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        status if !status.is_success() => {
            Err(ClientError::Transient(format!("server returned {}", status)))
        }
        _ => Ok(response),
    }
}
