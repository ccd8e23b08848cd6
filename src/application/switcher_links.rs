// Dashboard switcher - links to every dashboard, the open one marked active
use crate::domain::dashboard::Dashboard;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitcherLink {
    pub key: String,
    pub text: String,
    pub to: String,
}

impl SwitcherLink {
    fn of(dashboard: &Dashboard) -> Self {
        Self {
            key: dashboard.id.clone(),
            text: dashboard.name.clone(),
            to: format!("/dashboards/{}", dashboard.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SwitcherLinks {
    pub active: Option<SwitcherLink>,
    pub links: Vec<SwitcherLink>,
}

/// One link per dashboard in server order, the entry for `active` taking
/// its name from `active` rather than the listing
pub fn switcher_links(dashboards: &[Dashboard], active: &Dashboard) -> SwitcherLinks {
    let mut links: Vec<SwitcherLink> = dashboards.iter().map(SwitcherLink::of).collect();

    let current = SwitcherLink::of(active);
    let found = links.iter_mut().find(|link| link.key == current.key);
    let active = found.map(|link| {
        *link = current.clone();
        current
    });

    SwitcherLinks { active, links }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard(id: &str, name: &str) -> Dashboard {
        let mut d = Dashboard::new(name, "thebestorg");
        d.id = id.to_string();
        d
    }

    #[test]
    fn test_links_mark_active() {
        let all = vec![dashboard("1", "cpu"), dashboard("2", "disk")];
        let links = switcher_links(&all, &all[1]);

        assert_eq!(links.links.len(), 2);
        assert_eq!(links.links[0].to, "/dashboards/1");
        assert_eq!(
            links.active,
            Some(SwitcherLink {
                key: "2".to_string(),
                text: "disk".to_string(),
                to: "/dashboards/2".to_string(),
            })
        );
    }

    #[test]
    fn test_active_name_overrides_listing() {
        let all = vec![dashboard("1", "cpu"), dashboard("2", "disk")];
        let renamed = dashboard("1", "cpu (prod)");
        let links = switcher_links(&all, &renamed);

        assert_eq!(links.links[0].text, "cpu (prod)");
        assert_eq!(links.active.unwrap().text, "cpu (prod)");
    }

    #[test]
    fn test_unlisted_active_has_no_entry() {
        let all = vec![dashboard("1", "cpu")];
        let links = switcher_links(&all, &dashboard("9", "gone"));
        assert!(links.active.is_none());
        assert_eq!(links.links.len(), 1);
    }
}
