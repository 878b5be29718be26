// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod invocation;
mod tree;

pub use config::ValidationError;
pub use invocation::{InvocationError, ValueMismatch};
pub use tree::TreeError;
