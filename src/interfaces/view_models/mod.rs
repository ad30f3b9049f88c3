pub mod catcher_view_model;
