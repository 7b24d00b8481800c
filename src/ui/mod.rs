pub mod app;
pub mod form;
pub mod list;
pub mod render;
