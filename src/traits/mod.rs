// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Seams between the tree model and its collaborators.

pub mod dispatcher;
pub mod dynamic_path;
pub mod function_handler;

pub use dispatcher::{Client, Dispatcher};
pub use dynamic_path::DynamicPathHandler;
pub use function_handler::{from_fn, FnHandler, FunctionHandler};
