pub mod application;
pub mod config;
pub mod domain;
pub mod event_dispatch;
pub mod infrastructure;
pub mod metrics;
