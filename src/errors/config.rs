// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Problems found while validating a declarative provider tree.
///
/// Validation accumulates every problem it finds, so a tree file with several
/// mistakes reports all of them at once.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// An identifier is empty or contains characters the protocol does not allow
    InvalidIdentifier {
        /// Identifier path of the parent the element would be registered under
        parent: String,
        /// The offending identifier
        identifier: String,
    },
    /// Two siblings claim the same slot number
    DuplicateSlot {
        /// Identifier path of the parent node
        parent: String,
        /// The slot claimed twice
        number: i32,
    },
    /// An enum parameter declares no values
    EmptyEnumeration {
        /// Identifier path of the parameter
        element: String,
    },
    /// A ranged parameter declares minimum greater than maximum
    InvertedRange {
        element: String,
    },
    /// A ranged parameter starts outside its own range
    ValueOutOfRange {
        element: String,
    },
    /// A blind-source matrix has no blind source name
    MissingBlindSource {
        element: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidIdentifier { parent, identifier } => {
                write!(f, "Invalid identifier '{}' under '{}'", identifier, parent)
            }
            ValidationError::DuplicateSlot { parent, number } => {
                write!(f, "Slot {} is used more than once under '{}'", number, parent)
            }
            ValidationError::EmptyEnumeration { element } => {
                write!(f, "Enum parameter '{}' declares no values", element)
            }
            ValidationError::InvertedRange { element } => {
                write!(f, "Parameter '{}' has minimum greater than maximum", element)
            }
            ValidationError::ValueOutOfRange { element } => {
                write!(f, "Parameter '{}' has an initial value outside its range", element)
            }
            ValidationError::MissingBlindSource { element } => {
                write!(f, "Blind-source matrix '{}' needs a blind_source name", element)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
