//! TabPad: a small tabbed plain-text editor.
//!
//! The document core under [`app`] has no toolkit dependency. The FLTK
//! front-end lives in `ui` behind the `gui` feature.

pub mod app;

#[cfg(feature = "gui")]
pub mod ui;
