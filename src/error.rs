//! Error types for cvforge library.

use std::io;
use thiserror::Error;

/// Result type alias for cvforge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while fingerprinting templates or assembling documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The template is not a readable word-processing package, or a required part is missing.
    #[error("Unreadable template: {0}")]
    UnreadableTemplate(String),

    /// Clone-and-replace assembly failed. No output is produced.
    #[error("Assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    /// A block kind has no entry in the resolution table.
    ///
    /// Unreachable with the current `Block` variants: every block resolves,
    /// with `Paragraph` as the fallback target.
    #[error("Unsupported block: {0}")]
    UnsupportedBlock(String),

    /// The content payload does not have the expected structural shape.
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Error while rendering a report (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// Underlying cause of an [`Error::Assembly`].
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// A part the assembler needs is absent from the template package.
    #[error("missing template part: {0}")]
    MissingPart(String),

    /// A template part could not be parsed while splicing new content.
    #[error("malformed template part {part}: {reason}")]
    MalformedPart {
        /// Package path of the part.
        part: String,
        /// Parser message.
        reason: String,
    },

    /// Block text contains a character that cannot be stored in the document.
    #[error("cannot encode character {} in {context}", code_point(.character))]
    Unencodable {
        /// The offending character.
        character: char,
        /// Where the text came from (block position or letter line).
        context: String,
    },

    /// The output package could not be written.
    #[error("zip error: {0}")]
    Zip(String),

    /// I/O failure while writing the output package.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn code_point(c: &char) -> String {
    format!("U+{:04X}", u32::from(*c))
}

impl From<zip::result::ZipError> for AssemblyError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => AssemblyError::Io(e),
            other => AssemblyError::Zip(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidContent(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnreadableTemplate("not a zip archive".to_string());
        assert_eq!(err.to_string(), "Unreadable template: not a zip archive");

        let err = Error::Assembly(AssemblyError::Unencodable {
            character: '\u{1}',
            context: "block 3".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Assembly failed: cannot encode character U+0001 in block 3"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_assembly_error_wraps_cause() {
        let err: Error = AssemblyError::MissingPart("word/document.xml".to_string()).into();
        match err {
            Error::Assembly(AssemblyError::MissingPart(part)) => {
                assert_eq!(part, "word/document.xml")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: AssemblyError = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, AssemblyError::Zip(_)));
    }
}
