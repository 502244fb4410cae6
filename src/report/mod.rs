//! Report rendering
//!
//! Formats generated series as labeled tables and assembles them, interleaved
//! with static fragments, into an HTML document written in append mode.

pub mod html;
pub mod table;

pub use html::{Document, Fragment};
pub use table::{Column, Table};
