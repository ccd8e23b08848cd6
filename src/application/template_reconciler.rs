// Template reconciler - what the server stores vs. what the console keeps
use crate::domain::dashboard::Dashboard;
use crate::domain::template::Template;

/// Templates reduced to their selected value, as sent in persist requests.
///
/// CSV and map templates pass through untouched.
pub fn strip_to_selected(dashboard: &Dashboard) -> Vec<Template> {
    dashboard
        .templates
        .iter()
        .map(|template| {
            if template.keeps_all_values() {
                return template.clone();
            }

            Template {
                values: template.selected_value().cloned().into_iter().collect(),
                ..template.clone()
            }
        })
        .collect()
}

/// Request body for create and update calls
pub fn prepare_for_persist(dashboard: &Dashboard) -> Dashboard {
    Dashboard {
        templates: strip_to_selected(dashboard),
        ..dashboard.clone()
    }
}

/// Merges a server response with the full template lists kept locally
pub fn restore_templates(persisted: Dashboard, original: &[Template]) -> Dashboard {
    Dashboard {
        templates: original.to_vec(),
        ..persisted
    }
}
