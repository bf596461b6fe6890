// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod catalog_key;
mod node;
mod pipeline;
mod validation;

#[cfg(test)]
mod integration_tests;

pub use catalog_key::{CatalogKey, PARAMETER_PREFIX};
pub use node::Node;
pub use pipeline::Pipeline;
pub use validation::validate_wiring;
