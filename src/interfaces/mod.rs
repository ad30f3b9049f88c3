pub mod components;
pub mod dashboard;
pub mod design_system;
pub mod detail_view;
pub mod ui;
pub mod ui_components;
pub mod view_models;
