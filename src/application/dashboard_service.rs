// Dashboard service - lifecycle operations against the backend
use crate::application::dashboard_repository::{ApiError, DashboardRepository};
use crate::application::dashboard_store::{DashboardEvent, DashboardStore, StoreError};
use crate::application::layout::{clone_cell, new_cell};
use crate::application::notifications::{Notification, Notifier};
use crate::application::switcher_links::{SwitcherLinks, switcher_links};
use crate::application::template_reconciler::{prepare_for_persist, restore_templates};
use crate::application::view_factory::{convert_view, create_view, replace_query};
use crate::domain::dashboard::{Cell, Dashboard};
use crate::domain::template::TemplateError;
use crate::domain::time_range::TimeRange;
use crate::domain::view::{QueryLanguage, ViewKind};
use std::sync::Arc;
use tokio::sync::Mutex;

const IMPORT_FALLBACK: &str = "Could not upload dashboard";
const DELETE_FALLBACK: &str = "Could not delete dashboard";
const UPDATE_FALLBACK: &str = "Could not save dashboard";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("dashboard {0} could not be found")]
    NotFound(String),
    #[error("dashboard {dashboard} has no cell {cell}")]
    UnknownCell { dashboard: String, cell: String },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn DashboardRepository>,
    notifier: Arc<dyn Notifier>,
    store: Arc<Mutex<DashboardStore>>,
    dashboards_url: String,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn DashboardRepository>,
        notifier: Arc<dyn Notifier>,
        dashboards_url: String,
    ) -> Self {
        Self {
            repository,
            notifier,
            store: Arc::new(Mutex::new(DashboardStore::new())),
            dashboards_url,
        }
    }

    pub async fn dashboards(&self) -> Vec<Dashboard> {
        self.store.lock().await.dashboards().to_vec()
    }

    pub async fn dashboard(&self, id: &str) -> Option<Dashboard> {
        self.store.lock().await.get(id).cloned()
    }

    pub async fn time_range(&self, dashboard_id: &str) -> TimeRange {
        self.store
            .lock()
            .await
            .time_range(dashboard_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn set_time_range(&self, dashboard_id: &str, range: TimeRange) {
        self.store.lock().await.apply(DashboardEvent::TimeRangeSet {
            dashboard_id: dashboard_id.to_string(),
            range,
        });
    }

    async fn current(&self, id: &str) -> Result<Dashboard, ServiceError> {
        self.store
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    pub async fn fetch_all(&self) -> Result<Vec<Dashboard>, ServiceError> {
        let dashboards = self
            .repository
            .list_dashboards(&self.dashboards_url)
            .await
            .inspect_err(|e| tracing::error!("Error fetching dashboards: {}", e))?;

        tracing::debug!("Loaded {} dashboards", dashboards.len());
        self.store
            .lock()
            .await
            .apply(DashboardEvent::Loaded(dashboards.clone()));
        Ok(dashboards)
    }

    /// Loads one dashboard; the caller redirects away on `NotFound`
    pub async fn fetch_one(&self, id: &str) -> Result<Dashboard, ServiceError> {
        match self.repository.get_dashboard(&self.dashboards_url, id).await {
            Ok(dashboard) => {
                self.store
                    .lock()
                    .await
                    .apply(DashboardEvent::LoadedOne(dashboard.clone()));
                Ok(dashboard)
            }
            Err(ApiError::NotFound { .. }) => {
                self.notifier.notify(Notification::dashboard_not_found(id));
                Err(ServiceError::NotFound(id.to_string()))
            }
            Err(e) => {
                tracing::error!("Error fetching dashboard {}: {}", id, e);
                Err(e.into())
            }
        }
    }

    /// Switcher links for the dashboard `active_id`, from a fresh server listing
    pub async fn switcher_links(&self, active_id: &str) -> Result<SwitcherLinks, ServiceError> {
        let active = self.current(active_id).await?;
        let dashboards = self
            .repository
            .list_dashboards(&self.dashboards_url)
            .await
            .inspect_err(|e| tracing::error!("Error loading dashboard links: {}", e))?;
        Ok(switcher_links(&dashboards, &active))
    }

    /// Creates `dashboard` on the server and reloads the collection
    pub async fn create(&self, dashboard: Dashboard) -> Result<Dashboard, ServiceError> {
        let result = self.persist_new(&dashboard).await;

        match result {
            Ok(created) => {
                self.notifier
                    .notify(Notification::dashboard_imported(&dashboard.name));
                Ok(created)
            }
            Err(e) => {
                tracing::error!("Error importing dashboard {}: {}", dashboard.name, e);
                let reason = match &e {
                    ServiceError::Api(api) => api.user_message(IMPORT_FALLBACK),
                    _ => IMPORT_FALLBACK.to_string(),
                };
                self.notifier
                    .notify(Notification::dashboard_import_failed(&reason));
                Err(e)
            }
        }
    }

    async fn persist_new(&self, dashboard: &Dashboard) -> Result<Dashboard, ServiceError> {
        let body = prepare_for_persist(dashboard);
        let stored = self
            .repository
            .create_dashboard(&self.dashboards_url, &body)
            .await?;
        let created = restore_templates(stored, &dashboard.templates);

        self.store
            .lock()
            .await
            .apply(DashboardEvent::Created(created.clone()));

        let dashboards = self.repository.list_dashboards(&self.dashboards_url).await?;
        let mut store = self.store.lock().await;
        store.apply(DashboardEvent::Loaded(dashboards));
        // the re-fetched copy only holds selected template values
        store.apply(DashboardEvent::Updated(created.clone()));

        Ok(created)
    }

    /// Saves `dashboard`, keeping its full template value lists locally
    pub async fn update(&self, dashboard: Dashboard) -> Result<Dashboard, ServiceError> {
        let body = prepare_for_persist(&dashboard);

        let stored = match self.repository.update_dashboard(&body).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Error updating dashboard {}: {}", dashboard.id, e);
                self.notifier.notify(Notification::dashboard_update_failed(
                    &dashboard.name,
                    &e.user_message(UPDATE_FALLBACK),
                ));
                return Err(e.into());
            }
        };

        let updated = restore_templates(stored, &dashboard.templates);
        self.store
            .lock()
            .await
            .apply(DashboardEvent::Updated(updated.clone()));
        Ok(updated)
    }

    /// Removes the dashboard right away and puts it back if the server refuses
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let pending = {
            let mut store = self.store.lock().await;
            let pending = store.begin_delete(id)?;
            store.apply(DashboardEvent::TimeRangeRemoved(id.to_string()));
            pending
        };
        let dashboard = pending.dashboard.clone();

        let result = match dashboard.self_link() {
            Some(link) => self.repository.delete_dashboard(link).await,
            None => Err(ApiError::MissingLink(dashboard.id.clone())),
        };

        match result {
            Ok(()) => {
                self.store.lock().await.commit_delete(pending);
                self.notifier
                    .notify(Notification::dashboard_deleted(&dashboard.name));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error deleting dashboard {}: {}", id, e);
                self.store.lock().await.revert_delete(pending);
                self.notifier.notify(Notification::dashboard_delete_failed(
                    &dashboard.name,
                    &e.user_message(DELETE_FALLBACK),
                ));
                Err(e.into())
            }
        }
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<Dashboard, ServiceError> {
        let mut dashboard = self.current(id).await?;
        dashboard.name = name.to_string();
        self.update(dashboard).await
    }

    pub async fn add_cell(&self, id: &str) -> Result<Cell, ServiceError> {
        let dashboard = self.current(id).await?;
        let cell = new_cell(&dashboard.cells);

        let mut cells = dashboard.cells.clone();
        cells.push(cell.clone());
        self.update(dashboard.with_cells(cells)).await?;
        Ok(cell)
    }

    /// Persists a repositioned cell sequence as given
    pub async fn update_cells(&self, id: &str, cells: Vec<Cell>) -> Result<Dashboard, ServiceError> {
        let dashboard = self.current(id).await?;
        self.update(dashboard.with_cells(cells)).await
    }

    pub async fn delete_cell(&self, id: &str, key: &str) -> Result<Dashboard, ServiceError> {
        let dashboard = self.current(id).await?;
        let removed = find_cell(&dashboard, key)?.clone();

        let cells = dashboard
            .cells
            .iter()
            .filter(|c| c.i != key)
            .cloned()
            .collect();
        let updated = self.update(dashboard.with_cells(cells)).await?;
        self.notifier.notify(Notification::cell_deleted(&removed.name));
        Ok(updated)
    }

    pub async fn clone_cell(&self, id: &str, key: &str) -> Result<Cell, ServiceError> {
        let dashboard = self.current(id).await?;
        let clone = clone_cell(&dashboard.cells, find_cell(&dashboard, key)?);

        let mut cells = dashboard.cells.clone();
        cells.push(clone.clone());
        self.update(dashboard.with_cells(cells)).await?;
        Ok(clone)
    }

    /// Switches the visualization kind of a cell's embedded view
    pub async fn convert_cell_view(
        &self,
        id: &str,
        key: &str,
        kind: ViewKind,
    ) -> Result<Cell, ServiceError> {
        let dashboard = self.current(id).await?;
        let mut cell = find_cell(&dashboard, key)?.clone();
        cell.view = Some(match &cell.view {
            Some(view) => convert_view(view, kind),
            None => create_view(kind),
        });
        // an embedded view replaces any referenced one
        cell.view_id = None;

        self.persist_cell(dashboard, &cell).await?;
        Ok(cell)
    }

    /// Sets a single query on the cell's view; `None` when the view takes no queries
    pub async fn replace_cell_query(
        &self,
        id: &str,
        key: &str,
        text: &str,
        language: QueryLanguage,
    ) -> Result<Option<Cell>, ServiceError> {
        let dashboard = self.current(id).await?;
        let mut cell = find_cell(&dashboard, key)?.clone();
        let Some(view) = cell.view.as_ref().and_then(|v| replace_query(v, text, language)) else {
            return Ok(None);
        };
        cell.view = Some(view);

        self.persist_cell(dashboard, &cell).await?;
        Ok(Some(cell))
    }

    async fn persist_cell(&self, dashboard: Dashboard, cell: &Cell) -> Result<(), ServiceError> {
        let cells = dashboard
            .cells
            .iter()
            .map(|c| if c.i == cell.i { cell.clone() } else { c.clone() })
            .collect();
        self.update(dashboard.with_cells(cells)).await?;
        Ok(())
    }

    /// Selects `value` for a template variable and saves the dashboard
    pub async fn select_template_value(
        &self,
        id: &str,
        template_id: &str,
        value: &str,
    ) -> Result<Dashboard, ServiceError> {
        let mut dashboard = self.current(id).await?;
        let template = dashboard
            .template_mut(template_id)
            .ok_or_else(|| TemplateError::UnknownTemplate(template_id.to_string()))?;
        template.select_local(value)?;
        template.commit_local_selection();

        self.update(dashboard).await
    }
}

fn find_cell<'a>(dashboard: &'a Dashboard, key: &str) -> Result<&'a Cell, ServiceError> {
    dashboard.cell(key).ok_or_else(|| ServiceError::UnknownCell {
        dashboard: dashboard.id.clone(),
        cell: key.to_string(),
    })
}
