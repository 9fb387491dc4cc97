//! Inspection reports for templates and their style profiles.

mod compare;
mod json;
mod text;

pub use compare::{compare, compare_text, ProfileDifference};
pub use json::{serialize, to_json, JsonFormat};
pub use text::{paragraphs_text, summary_text, to_text};
