//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - The `TextStore` abstraction over a tab's text buffer
//! - Document and DocumentId
//! - Application settings
//! - Message types for the event system

pub mod buffer;
pub mod document;
pub mod messages;
pub mod settings;

pub use buffer::{PlainBuffer, TextStore};
pub use document::{Document, DocumentId};
pub use messages::Message;
pub use settings::{AppSettings, Theme};
