//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, Settings, Messages)
//! - `controllers/` - State kept across user actions (tabs, auto-save, split view)
//! - `services/` - Stateless operations (search, line numbers, themes, export, highlighting)
//! - `infrastructure/` - Errors
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::tabs::TabManager;
pub use domain::{AppSettings, Document, DocumentId, Message, PlainBuffer, TextStore, Theme};
pub use infrastructure::error::{AppError, Result};
pub use services::export::ExportFormat;
pub use state::{AppState, SaveOutcome};
