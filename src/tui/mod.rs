pub mod app;
pub mod event;
pub mod ui;
