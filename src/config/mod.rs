// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod runtime;
mod validation;

pub mod consts;

pub use loader::{
    load_and_validate_config, load_config, BooleanParameterConfig, ElementConfig,
    EnumParameterConfig, IntegerParameterConfig, MatrixConfig, MatrixKindConfig, NodeConfig,
    ProviderConfig, RealParameterConfig, SignalNamesConfig, StringParameterConfig,
};
pub use runtime::TreeBuilder;
pub use validation::validate_provider_config;
