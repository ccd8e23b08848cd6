// Dashboard domain model
use super::template::Template;
use super::view::View;
use serde::{Deserialize, Serialize};

/// Positioned container within a dashboard hosting one view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Key unique within the owning dashboard
    #[serde(alias = "ref")]
    pub i: String,
    #[serde(default)]
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    #[serde(rename = "viewID", default, skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
}

impl Cell {
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn overlaps(&self, other: &Cell) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub links: DashboardLinks,
}

impl Dashboard {
    pub fn new(name: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            organization: organization.into(),
            cells: Vec::new(),
            templates: Vec::new(),
            links: DashboardLinks::default(),
        }
    }

    pub fn cell(&self, key: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.i == key)
    }

    pub fn template_mut(&mut self, id: &str) -> Option<&mut Template> {
        self.templates.iter_mut().find(|t| t.id == id)
    }

    /// Copy of the dashboard with its cell sequence replaced wholesale
    pub fn with_cells(&self, cells: Vec<Cell>) -> Self {
        Self {
            cells,
            ..self.clone()
        }
    }

    pub fn self_link(&self) -> Option<&str> {
        if self.links.self_link.is_empty() {
            None
        } else {
            Some(&self.links.self_link)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(i: &str, x: i32, y: i32, w: i32, h: i32) -> Cell {
        Cell {
            i: i.to_string(),
            name: String::new(),
            x,
            y,
            w,
            h,
            view_id: None,
            view: None,
        }
    }

    #[test]
    fn test_overlaps() {
        let a = cell("a", 0, 0, 4, 4);
        assert!(a.overlaps(&cell("b", 3, 3, 4, 4)));
        assert!(!a.overlaps(&cell("c", 4, 0, 4, 4)));
        assert!(!a.overlaps(&cell("d", 0, 4, 4, 4)));
    }

    #[test]
    fn test_cell_accepts_ref_key() {
        let json = r#"{"ref": "news-feed", "x": 0, "y": 0, "w": 8, "h": 10}"#;
        let parsed: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.i, "news-feed");
        assert!(parsed.view.is_none());
    }

    #[test]
    fn test_dashboard_wire_format() {
        let json = r#"{
            "id": "020f755c3c082000",
            "name": "d1",
            "organization": "thebestorg",
            "cells": [{"i": "c1", "x": 0, "y": 0, "w": 4, "h": 4, "viewID": "v1"}],
            "links": {"self": "/v2/dashboards/020f755c3c082000"}
        }"#;
        let dashboard: Dashboard = serde_json::from_str(json).unwrap();
        assert_eq!(dashboard.self_link(), Some("/v2/dashboards/020f755c3c082000"));
        assert_eq!(dashboard.cell("c1").unwrap().view_id.as_deref(), Some("v1"));
        assert!(dashboard.templates.is_empty());
    }

    #[test]
    fn test_with_cells_replaces_sequence() {
        let mut dashboard = Dashboard::new("d1", "org");
        dashboard.cells = vec![cell("a", 0, 0, 4, 4)];
        let moved = dashboard.with_cells(vec![cell("a", 4, 0, 4, 4)]);
        assert_eq!(moved.cells[0].x, 4);
        assert_eq!(dashboard.cells[0].x, 0);
        assert_eq!(moved.name, "d1");
    }
}
