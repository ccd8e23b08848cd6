// Repository trait for the dashboards backend
use crate::domain::dashboard::Dashboard;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("backend responded with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("dashboard {0} has no self link")]
    MissingLink(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Server-provided message if there is one, `fallback` otherwise
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Fetch the whole dashboard collection served at `url`
    async fn list_dashboards(&self, url: &str) -> Result<Vec<Dashboard>, ApiError>;

    /// Fetch dashboard `id` from the collection served at `url`
    async fn get_dashboard(&self, url: &str, id: &str) -> Result<Dashboard, ApiError>;

    /// Create a dashboard in the collection at `url`, returning the stored document
    async fn create_dashboard(&self, url: &str, dashboard: &Dashboard)
    -> Result<Dashboard, ApiError>;

    /// Replace the dashboard behind its self link
    async fn update_dashboard(&self, dashboard: &Dashboard) -> Result<Dashboard, ApiError>;

    async fn delete_dashboard(&self, self_link: &str) -> Result<(), ApiError>;
}
