// HTTP repository implementation for the /v2/dashboards API
use crate::application::dashboard_repository::{ApiError, DashboardRepository};
use crate::domain::dashboard::Dashboard;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDashboardRepository {
    client: reqwest::Client,
    host: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DashboardsResponse {
    #[serde(default)]
    dashboards: Vec<Dashboard>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpDashboardRepository {
    pub fn new(host: String, token: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Links served by the backend are host-relative
    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.host, url.trim_start_matches('/'))
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, self.resolve(url))
            .header("Accept", "application/json");
        match &self.token {
            Some(token) => request.header("Authorization", format!("Token {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                resource: resource.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            tracing::debug!("Backend answered {} for {}: {}", status, resource, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl DashboardRepository for HttpDashboardRepository {
    async fn list_dashboards(&self, url: &str) -> Result<Vec<Dashboard>, ApiError> {
        let response = self.send(self.request(Method::GET, url), url).await?;
        let data: DashboardsResponse = Self::decode(response).await?;
        Ok(data.dashboards)
    }

    async fn get_dashboard(&self, url: &str, id: &str) -> Result<Dashboard, ApiError> {
        let url = format!("{}/{}", url.trim_end_matches('/'), urlencoding::encode(id));
        let response = self
            .send(self.request(Method::GET, &url), &format!("dashboard {}", id))
            .await?;
        Self::decode(response).await
    }

    async fn create_dashboard(
        &self,
        url: &str,
        dashboard: &Dashboard,
    ) -> Result<Dashboard, ApiError> {
        let request = self.request(Method::POST, url).json(dashboard);
        let response = self.send(request, url).await?;
        Self::decode(response).await
    }

    async fn update_dashboard(&self, dashboard: &Dashboard) -> Result<Dashboard, ApiError> {
        let link = dashboard
            .self_link()
            .ok_or_else(|| ApiError::MissingLink(dashboard.id.clone()))?;
        let request = self.request(Method::PUT, link).json(dashboard);
        let response = self
            .send(request, &format!("dashboard {}", dashboard.id))
            .await?;
        Self::decode(response).await
    }

    async fn delete_dashboard(&self, self_link: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, self_link), self_link)
            .await?;
        Ok(())
    }
}
