pub mod coin_detail_view;
pub mod coin_table;
pub mod components;
pub mod design_system;
pub mod header;
pub mod highlights_panel;
pub mod ui;
pub mod view_models;
