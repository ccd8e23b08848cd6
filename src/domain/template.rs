// Template variable domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template {template} has no value {value:?}")]
    UnknownValue { template: String, value: String },
    #[error("dashboard has no template {0}")]
    UnknownTemplate(String),
}

/// Kinds outside the listed ones, such as `text` or `autoGroup`, are kept
/// verbatim in `Other`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateType {
    Csv,
    Map,
    TagKeys,
    TagValues,
    Measurements,
    Databases,
    FieldKeys,
    Constant,
    #[serde(rename = "influxql")]
    InfluxQL,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influxql: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateValue {
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub selected: bool,
    /// Working selection of the UI, never relied upon by the server
    #[serde(default)]
    pub local_selected: bool,
}

impl TemplateValue {
    pub fn new(value: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            value_type: value_type.into(),
            selected: false,
            local_selected: false,
        }
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self.local_selected = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub temp_var: String,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<TemplateQuery>,
    #[serde(default)]
    pub values: Vec<TemplateValue>,
}

impl Template {
    /// CSV and map templates carry their full value list to the server
    pub fn keeps_all_values(&self) -> bool {
        matches!(self.template_type, TemplateType::Csv | TemplateType::Map)
    }

    pub fn selected_value(&self) -> Option<&TemplateValue> {
        self.values.iter().find(|v| v.selected)
    }

    /// Marks `value` as the only locally selected candidate
    pub fn select_local(&mut self, value: &str) -> Result<(), TemplateError> {
        if !self.values.iter().any(|v| v.value == value) {
            return Err(TemplateError::UnknownValue {
                template: self.temp_var.clone(),
                value: value.to_string(),
            });
        }

        for candidate in &mut self.values {
            candidate.local_selected = candidate.value == value;
        }
        Ok(())
    }

    /// Promotes the local selection to the persisted one
    pub fn commit_local_selection(&mut self) {
        let mut seen = false;
        for candidate in &mut self.values {
            candidate.selected = candidate.local_selected && !seen;
            seen |= candidate.selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_template() -> Template {
        Template {
            id: "1".to_string(),
            temp_var: ":region:".to_string(),
            template_type: TemplateType::TagKeys,
            label: "test query".to_string(),
            query: None,
            values: vec![
                TemplateValue::new("us-west", "tagKey"),
                TemplateValue::new("us-east", "tagKey").selected(),
                TemplateValue::new("us-mount", "tagKey"),
            ],
        }
    }

    #[test]
    fn test_select_local_then_commit() {
        let mut template = region_template();
        template.select_local("us-mount").unwrap();

        // persisted selection is untouched until commit
        assert_eq!(template.selected_value().unwrap().value, "us-east");

        template.commit_local_selection();
        let selected: Vec<&str> = template
            .values
            .iter()
            .filter(|v| v.selected)
            .map(|v| v.value.as_str())
            .collect();
        assert_eq!(selected, vec!["us-mount"]);
    }

    #[test]
    fn test_select_unknown_value() {
        let mut template = region_template();
        let err = template.select_local("eu-central").unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownValue {
                template: ":region:".to_string(),
                value: "eu-central".to_string(),
            }
        );
        assert_eq!(template, region_template());
    }

    #[test]
    fn test_keeps_all_values() {
        let mut template = region_template();
        assert!(!template.keeps_all_values());
        template.template_type = TemplateType::Csv;
        assert!(template.keeps_all_values());
        template.template_type = TemplateType::Map;
        assert!(template.keeps_all_values());
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "id": "2", "tempVar": ":host:", "type": "tagValues",
            "values": [{"value": "a", "type": "tagValue", "selected": true}]
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.template_type, TemplateType::TagValues);
        assert!(template.values[0].selected);
        assert!(!template.values[0].local_selected);
    }

    #[test]
    fn test_unlisted_kind_is_kept() {
        let json = r#"{
            "id": "3", "tempVar": ":note:", "type": "text",
            "values": [{"value": "hello", "type": "text", "selected": true}]
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.template_type, TemplateType::Other("text".to_string()));
        assert!(!template.keeps_all_values());

        let wire = serde_json::to_value(&template).unwrap();
        assert_eq!(wire["type"], "text");
    }

    #[test]
    fn test_dashboard_with_unlisted_kind_decodes() {
        let json = r#"{
            "id": "1", "name": "d", "organization": "o", "cells": [],
            "templates": [{"id": "t", "tempVar": ":interval:", "type": "autoGroup", "values": []}],
            "links": {"self": "/v2/dashboards/1"}
        }"#;
        let dashboard: crate::domain::dashboard::Dashboard = serde_json::from_str(json).unwrap();
        assert_eq!(
            dashboard.templates[0].template_type,
            TemplateType::Other("autoGroup".to_string())
        );
    }
}
