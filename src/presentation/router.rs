// Route table of the console API
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_cell, clone_cell, convert_cell_view, convert_view, create_dashboard, dashboard_links,
    delete_cell, delete_dashboard, get_dashboard, health_check, list_dashboards,
    list_notifications, new_view, replace_cell_query, select_template_value, update_cells,
    update_dashboard,
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboards", get(list_dashboards).post(create_dashboard))
        .route(
            "/dashboards/:id",
            get(get_dashboard)
                .put(update_dashboard)
                .delete(delete_dashboard),
        )
        .route("/dashboards/:id/links", get(dashboard_links))
        .route("/dashboards/:id/cells", post(add_cell).put(update_cells))
        .route("/dashboards/:id/cells/:cell", delete(delete_cell))
        .route("/dashboards/:id/cells/:cell/clone", post(clone_cell))
        .route("/dashboards/:id/cells/:cell/view", put(convert_cell_view))
        .route("/dashboards/:id/cells/:cell/query", put(replace_cell_query))
        .route(
            "/dashboards/:id/templates/:template",
            put(select_template_value),
        )
        .route("/views/new/:kind", get(new_view))
        .route("/views/convert/:kind", post(convert_view))
        .route("/notifications", get(list_notifications))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
