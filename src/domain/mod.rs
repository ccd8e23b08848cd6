// Domain layer - dashboard documents and their parts
pub mod dashboard;
pub mod template;
pub mod time_range;
pub mod view;
