// HTTP request handlers
use crate::application::notifications::Notification;
use crate::application::switcher_links::SwitcherLinks;
use crate::application::view_factory::{convert_view_to, create_view_of};
use crate::domain::dashboard::{Cell, Dashboard};
use crate::domain::view::{QueryLanguage, View, ViewKind};
use crate::presentation::app_state::AppState;
use crate::presentation::http_error::HttpError;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

type ApiResult<T> = Result<T, HttpError>;

#[derive(Deserialize)]
pub struct ConvertRequest {
    pub kind: String,
}

#[derive(Deserialize)]
pub struct QueryRequest {
    pub text: String,
    #[serde(default)]
    pub language: QueryLanguage,
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub value: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_dashboards(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Dashboard>>> {
    Ok(Json(state.dashboard_service.fetch_all().await?))
}

pub async fn get_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Dashboard>> {
    Ok(Json(state.dashboard_service.fetch_one(&id).await?))
}

pub async fn dashboard_links(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SwitcherLinks>> {
    Ok(Json(state.dashboard_service.switcher_links(&id).await?))
}

pub async fn create_dashboard(
    State(state): State<Arc<AppState>>,
    Json(dashboard): Json<Dashboard>,
) -> ApiResult<(StatusCode, Json<Dashboard>)> {
    let created = state.dashboard_service.create(dashboard).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut dashboard): Json<Dashboard>,
) -> ApiResult<Json<Dashboard>> {
    dashboard.id = id;
    if dashboard.self_link().is_none() {
        if let Some(local) = state.dashboard_service.dashboard(&dashboard.id).await {
            dashboard.links = local.links;
        }
    }
    Ok(Json(state.dashboard_service.update(dashboard).await?))
}

pub async fn delete_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.dashboard_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_cell(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<Cell>)> {
    let cell = state.dashboard_service.add_cell(&id).await?;
    Ok((StatusCode::CREATED, Json(cell)))
}

pub async fn update_cells(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(cells): Json<Vec<Cell>>,
) -> ApiResult<Json<Dashboard>> {
    Ok(Json(state.dashboard_service.update_cells(&id, cells).await?))
}

pub async fn delete_cell(
    Path((id, cell)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Dashboard>> {
    Ok(Json(state.dashboard_service.delete_cell(&id, &cell).await?))
}

pub async fn clone_cell(
    Path((id, cell)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<Cell>)> {
    let clone = state.dashboard_service.clone_cell(&id, &cell).await?;
    Ok((StatusCode::CREATED, Json(clone)))
}

pub async fn convert_cell_view(
    Path((id, cell)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConvertRequest>,
) -> ApiResult<Json<Cell>> {
    let kind: ViewKind = request.kind.parse()?;
    Ok(Json(
        state
            .dashboard_service
            .convert_cell_view(&id, &cell, kind)
            .await?,
    ))
}

/// Answers 204 when the cell's view takes no queries
pub async fn replace_cell_query(
    Path((id, cell)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<Response> {
    let replaced = state
        .dashboard_service
        .replace_cell_query(&id, &cell, &request.text, request.language)
        .await?;
    Ok(match replaced {
        Some(cell) => Json(cell).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn select_template_value(
    Path((id, template)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectRequest>,
) -> ApiResult<Json<Dashboard>> {
    Ok(Json(
        state
            .dashboard_service
            .select_template_value(&id, &template, &request.value)
            .await?,
    ))
}

pub async fn new_view(Path(kind): Path<String>) -> ApiResult<Json<View>> {
    Ok(Json(create_view_of(&kind)?))
}

pub async fn convert_view(
    Path(kind): Path<String>,
    Json(view): Json<View>,
) -> ApiResult<Json<View>> {
    Ok(Json(convert_view_to(&view, &kind)?))
}

pub async fn list_notifications(State(state): State<Arc<AppState>>) -> Json<Vec<Notification>> {
    Json(state.notifications.snapshot())
}
