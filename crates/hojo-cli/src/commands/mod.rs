//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (settings, input reading, option merging)
//! - `criteria` - Rubric and bonus table listing
//! - `export` - JSON/CSV export of a scoring result
//! - `extract` - Extracted document fields as JSON
//! - `score` - Scoring with a terminal or JSON report

pub mod core;
pub mod criteria;
pub mod export;
pub mod extract;
pub mod score;

// Re-export command functions for main.rs
pub use core::*;
pub use criteria::*;
pub use export::*;
pub use extract::*;
pub use score::*;
