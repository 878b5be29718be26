// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The provider tree: elements, typed parameters, routing matrices and functions.
//!
//! The tree is built once at startup (see [`crate::builder`] and
//! [`crate::config`]) and then served through [`crate::provider::Provider`].
//! Structural invariants hold from construction on:
//!
//! * every element's path is its parent's path plus its own slot number
//! * slot numbers are unique among siblings
//! * identifiers are validated before anything is bound
//!
//! The tree is never restructured after startup. Mutation through `&mut`
//! covers parameter values, matrix connections and crosspoint gains.

mod dynamic_matrix;
mod element;
mod enum_parameter;
mod function;
mod matrix;
mod node;
mod parameter;
mod signal;
mod value;

pub use dynamic_matrix::{
    XpointParams, XpointTable, CONNECTIONS_SLOT, GAIN_IDENTIFIER, GAIN_SLOT, MAXIMUM_GAIN,
    MINIMUM_GAIN, PARAMETERS_SUB_IDENTIFIER,
};
pub use element::{assert_identifier_valid, Element, ElementHeader};
pub use enum_parameter::EnumParameter;
pub use function::{Function, TupleItem};
pub(crate) use matrix::MatrixLayout;
pub use matrix::{ConnectOperation, Matrix, MatrixKind, RemoteConnector};
pub use node::Node;
pub use parameter::{
    BooleanParameter, IntegerParameter, Parameter, ParameterElement, ParameterSpec,
    RealParameter, RemoteSetter, StringParameter, TreeParameter,
};
pub use signal::Signal;
pub use value::{ParameterType, ParameterValue, Value};
