// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Construction-time errors for the provider tree.
//!
//! These are contract violations by the hosting application (bad identifiers,
//! clashing slots, broken tree files). Builders return them instead of panicking
//! so the host decides whether a malformed tree aborts startup.

use thiserror::Error;

use super::ValidationError;

#[derive(Error, Debug)]
pub enum TreeError {
    /// Identifier is empty or uses characters outside the allowed set.
    #[error("Invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier {
        identifier: String,
        reason: &'static str,
    },

    /// A child was registered under a slot that is already taken.
    #[error("Slot {number} under '{parent}' is already occupied by '{existing}'")]
    DuplicateSlot {
        parent: String,
        number: i32,
        existing: String,
    },

    /// A builder addressed a parent path that does not lead to a node.
    #[error("No node at path '{path}'")]
    UnknownParent { path: String },

    /// Tree file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tree file is not valid YAML for a provider tree.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Tree file is not valid TOML for a provider tree.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Tree file parsed but failed validation.
    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
