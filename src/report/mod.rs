//! Report generation
//!
//! [`ReportDocument`] is the append-only Markdown builder. `markdown` and
//! `console` render the same [`Analysis`](crate::analysis::Analysis) records
//! for the file and the terminal; `json` serializes them for scripts.

pub mod console;
pub mod document;
pub mod json;
pub mod markdown;

pub use document::{DocumentState, ReportDocument, ReportError};
pub use markdown::{generate_markdown, generate_timing_markdown};
