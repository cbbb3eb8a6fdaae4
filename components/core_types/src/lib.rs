//! Core types shared by the TDOP parser components.
//!
//! This crate provides the foundational vocabulary used across the workspace:
//! source location tracking and the parse error taxonomy.
//!
//! # Overview
//!
//! - [`SourcePosition`] - Source code location of a lexeme
//! - [`ErrorKind`] - Category of a parse failure
//! - [`ParseError`] - An unrecoverable parse failure with its offending lexeme
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, ParseError, SourcePosition};
//!
//! let error = ParseError::new(
//!     ErrorKind::BadLvalue,
//!     "Bad lvalue",
//!     "=",
//!     SourcePosition::new(1, 3, 2),
//! );
//! assert_eq!(error.kind, ErrorKind::BadLvalue);
//! assert_eq!(error.to_string(), "Bad lvalue at 1:3 (near '=')");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{ErrorKind, ParseError, ParseResult};
pub use source::SourcePosition;
