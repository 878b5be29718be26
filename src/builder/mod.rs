// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Tree construction.
//!
//! Trees are built in code through builder operations on [`Node`](crate::model::Node)
//! (`add_sub_node`, `add_*_parameter`, `add_function`, `add_matrix`), or from a
//! declarative tree file through [`TreeBuilder`]. Both paths run the same
//! operations, so a tree file builds exactly the structure the equivalent code
//! would.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use emberplus_provider::builder::MatrixSpec;
//! use emberplus_provider::model::{Node, ParameterSpec};
//! use emberplus_provider::traits::Dispatcher;
//! # use emberplus_provider::model::Value;
//! # struct Quiet;
//! # impl Dispatcher for Quiet {
//! #     fn notify_parameter_value_changed(&self, _: &[i32], _: &Value) {}
//! # }
//!
//! let mut root = Node::root(Arc::new(Quiet));
//! let device = root.add_sub_node(1, "device")?;
//! device.add_integer_parameter(1, "gain", ParameterSpec::new(0).writable().range(-20, 20))?;
//! device.add_matrix(2, "router", MatrixSpec::one_to_n(["Out"], ["In 1", "In 2"]))?;
//!
//! assert!(root.resolve(&[1, 2, 2]).unwrap().as_matrix().is_some());
//! # Ok::<(), emberplus_provider::errors::TreeError>(())
//! ```

mod matrix;
mod node;

pub use crate::config::TreeBuilder;
pub use matrix::{MatrixSpec, MatrixVariant, SignalNames};
