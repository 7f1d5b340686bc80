use crate::syntax::SyntaxKind;
use thiserror::Error;

/// Construction-time failures raised by the tree factories, the list builder
/// and the writer bridges.
///
/// Content problems found in parsed input are not errors; they are
/// [`Diagnostic`](crate::syntax::Diagnostic) values attached to nodes.
#[derive(Error, Debug)]
pub enum SyntaxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Argument out of range: {param} = {value} (limit {limit})")]
    ArgumentOutOfRange {
        param: &'static str,
        value: u64,
        limit: u64,
    },

    #[error("Unexpected kind for {param}: expected {expected}, found {found}")]
    UnexpectedKind {
        param: &'static str,
        expected: String,
        found: String,
    },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Empty collection: {0} requires at least one element")]
    EmptyCollection(&'static str),
}

impl SyntaxError {
    pub(crate) fn unexpected_kind(
        param: &'static str,
        expected: impl Into<String>,
        found: SyntaxKind,
    ) -> Self {
        SyntaxError::UnexpectedKind {
            param,
            expected: expected.into(),
            found: format!("{found:?}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyntaxError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_argument_out_of_range_names_parameter() {
        let error = SyntaxError::ArgumentOutOfRange {
            param: "offset",
            value: 7,
            limit: 3,
        };
        assert_eq!(
            error.to_string(),
            "Argument out of range: offset = 7 (limit 3)"
        );
    }

    #[test]
    fn test_unexpected_kind_display() {
        let error = SyntaxError::unexpected_kind("token", "NumericLiteralToken", SyntaxKind::NameToken);
        let msg = error.to_string();
        assert!(msg.contains("token"));
        assert!(msg.contains("NumericLiteralToken"));
        assert!(msg.contains("NameToken"));
    }

    #[test]
    fn test_empty_collection_display() {
        let error = SyntaxError::EmptyCollection("subsections");
        assert_eq!(
            error.to_string(),
            "Empty collection: subsections requires at least one element"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_error = IoError::new(ErrorKind::WriteZero, "sink closed");
        match SyntaxError::from(io_error) {
            SyntaxError::Io(ref err) => assert_eq!(err.kind(), ErrorKind::WriteZero),
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyntaxError>();
    }
}
