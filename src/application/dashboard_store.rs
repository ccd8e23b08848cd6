// In-memory dashboard collection, changed only by applying events
use crate::domain::dashboard::Dashboard;
use crate::domain::time_range::TimeRange;
use std::collections::{HashMap, HashSet};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("dashboard {0} is not loaded")]
    UnknownDashboard(String),
    #[error("dashboard {0} is already being deleted")]
    DeleteInProgress(String),
}

/// State transitions following a server round trip
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Loaded(Vec<Dashboard>),
    LoadedOne(Dashboard),
    Created(Dashboard),
    Updated(Dashboard),
    Deleted(String),
    DeleteFailed(Dashboard),
    TimeRangeSet { dashboard_id: String, range: TimeRange },
    TimeRangeRemoved(String),
}

/// Dashboard tentatively removed from the store, awaiting the server's answer
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub dashboard: Dashboard,
    index: usize,
}

#[derive(Debug, Default)]
pub struct DashboardStore {
    dashboards: Vec<Dashboard>,
    ranges: HashMap<String, TimeRange>,
    pending: HashMap<String, usize>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dashboards(&self) -> &[Dashboard] {
        &self.dashboards
    }

    pub fn get(&self, id: &str) -> Option<&Dashboard> {
        self.dashboards.iter().find(|d| d.id == id)
    }

    pub fn time_range(&self, dashboard_id: &str) -> Option<&TimeRange> {
        self.ranges.get(dashboard_id)
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn apply(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Loaded(dashboards) => {
                // last fetch wins, but a tentative delete stays removed
                self.dashboards = dashboards
                    .into_iter()
                    .filter(|d| !self.pending.contains_key(&d.id))
                    .collect();
                let live: HashSet<&str> = self.dashboards.iter().map(|d| d.id.as_str()).collect();
                self.ranges
                    .retain(|id, _| live.contains(id.as_str()) || self.pending.contains_key(id));
            }
            DashboardEvent::LoadedOne(dashboard)
            | DashboardEvent::Created(dashboard)
            | DashboardEvent::Updated(dashboard) => self.upsert(dashboard),
            DashboardEvent::Deleted(id) => {
                self.pending.remove(&id);
                self.dashboards.retain(|d| d.id != id);
            }
            DashboardEvent::DeleteFailed(dashboard) => {
                let index = self
                    .pending
                    .remove(&dashboard.id)
                    .unwrap_or(self.dashboards.len());
                self.dashboards.retain(|d| d.id != dashboard.id);
                let index = index.min(self.dashboards.len());
                self.dashboards.insert(index, dashboard);
            }
            DashboardEvent::TimeRangeSet {
                dashboard_id,
                range,
            } => {
                self.ranges.insert(dashboard_id, range);
            }
            DashboardEvent::TimeRangeRemoved(dashboard_id) => {
                self.ranges.remove(&dashboard_id);
            }
        }
    }

    fn upsert(&mut self, dashboard: Dashboard) {
        match self.dashboards.iter_mut().find(|d| d.id == dashboard.id) {
            Some(existing) => *existing = dashboard,
            None => self.dashboards.push(dashboard),
        }
    }

    /// Removes the dashboard ahead of the server confirming the delete
    pub fn begin_delete(&mut self, id: &str) -> Result<PendingDelete, StoreError> {
        if self.pending.contains_key(id) {
            return Err(StoreError::DeleteInProgress(id.to_string()));
        }

        let index = self
            .dashboards
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| StoreError::UnknownDashboard(id.to_string()))?;
        let dashboard = self.dashboards.remove(index);
        self.pending.insert(id.to_string(), index);

        Ok(PendingDelete { dashboard, index })
    }

    pub fn commit_delete(&mut self, pending: PendingDelete) {
        self.apply(DashboardEvent::Deleted(pending.dashboard.id));
    }

    /// Puts the dashboard back where it was
    pub fn revert_delete(&mut self, pending: PendingDelete) {
        self.pending
            .insert(pending.dashboard.id.clone(), pending.index);
        self.apply(DashboardEvent::DeleteFailed(pending.dashboard));
    }
}
