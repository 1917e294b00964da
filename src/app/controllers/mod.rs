//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that own state across user actions:
//! - Tab management
//! - Auto-save scheduling
//! - The split-screen viewer

pub mod autosave;
pub mod split_view;
pub mod tabs;
