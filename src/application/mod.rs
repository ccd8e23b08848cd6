// Application layer - use cases over the dashboard model
pub mod dashboard_repository;
pub mod dashboard_service;
pub mod dashboard_store;
pub mod layout;
pub mod notifications;
pub mod switcher_links;
pub mod template_reconciler;
pub mod view_factory;
