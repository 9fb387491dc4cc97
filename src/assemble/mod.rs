//! Document assembly.
//!
//! A [`Template`] is loaded once; [`DocumentAssembler`] and
//! [`CoverLetterAssembler`] write content into clones of it. Only the
//! flowing paragraphs and tables of the main body are replaced. Every other
//! part of the package is copied byte for byte.

mod document;
mod emit;
mod letter;
mod options;
mod result;
mod template;
mod text;

pub use document::DocumentAssembler;
pub use emit::ParagraphEmitter;
pub use letter::CoverLetterAssembler;
pub use options::AssembleOptions;
pub use result::{AssembleResult, AssemblyStats};
pub use template::{Template, TemplateSummary};
pub use text::TextPreparer;
