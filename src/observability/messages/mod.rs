// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `tree` - element registration, tree building, unresolved requests
//! * `parameter` - remote set acceptance/rejection, local updates
//! * `matrix` - connect/disconnect outcomes, dynamic crosspoint gain
//! * `function` - invocation start, completion, failure

use tracing::Span;

pub mod function;
pub mod matrix;
pub mod parameter;
pub mod tree;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Open a span carrying the same fields as the event.
    fn span(&self, name: &str) -> Span;
}

/// Render a numeric path the way peers see it, e.g. `1.2.0`.
pub(crate) fn dotted(path: &[i32]) -> String {
    path.iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
