//! Services layer - business operations and utilities.
//!
//! This module contains stateless operations over document text:
//! - Search, replace and small text helpers
//! - Line numbering
//! - Theme palettes
//! - Exporters (text, script, PDF)
//! - Syntax highlight overlays

pub mod export;
pub mod highlight;
pub mod line_numbers;
pub mod text_ops;
pub mod theme;
