// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while invoking a tree function.

use thiserror::Error;

use crate::model::ParameterType;

/// Invocation failures surfaced to the caller of `Function::invoke`.
///
/// They mean a peer sent a call that does not fit the declared signature, or the
/// bound callback broke its own contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvocationError {
    #[error("Function '{function}' declares arguments but was invoked without an invocation")]
    MissingArguments { function: String },

    #[error("Function '{function}' rejected its arguments: {reason}")]
    ArgumentMismatch {
        function: String,
        reason: ValueMismatch,
    },

    #[error("Function '{function}' has a result but was invoked without an invocation id")]
    MissingInvocationId { function: String },

    #[error("Function '{function}' produced a result that does not match its signature: {reason}")]
    ResultMismatch {
        function: String,
        reason: ValueMismatch,
    },
}

/// How a value list differs from its tuple descriptors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueMismatch {
    #[error("expected {expected} values, got {actual}")]
    Count { expected: usize, actual: usize },

    #[error("value {index} ('{name}') should be {expected}, got {actual}")]
    Type {
        index: usize,
        name: String,
        expected: ParameterType,
        actual: ParameterType,
    },
}
