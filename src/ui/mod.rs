//! FLTK front-end.
//!
//! Widgets live here; every decision about tabs, files and text is made by
//! [`crate::app::state::AppState`].

pub mod app_window;
pub mod dialogs;
pub mod file_dialogs;
pub mod main_window;
pub mod menu;
pub mod split_window;
pub mod tab_bar;
pub mod text_store;
pub mod theme;
