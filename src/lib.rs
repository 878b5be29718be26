// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // dispatcher and client implementations
pub mod builder;       // tree construction
pub mod config;        // tree files + validation
pub mod errors;        // error handling
pub mod glow;          // request and response shapes
pub mod model;         // elements of the provider tree
pub mod observability;
pub mod provider;      // request surface
pub mod traits;        // collaborator seams

pub use provider::Provider;
