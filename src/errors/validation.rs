// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for pipeline wiring validation.

use thiserror::Error;

/// Errors that can occur while validating a pipeline's wiring.
///
/// All variants carry catalog keys in their string contract form
/// (datasets plain, parameters with the `params:` prefix), so error
/// messages match the names an external catalog would be asked to
/// resolve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The dataset dependency graph contains a cycle
    #[error("Cyclic dependency detected: {}", .cycle.join(" -> "))]
    CyclicDependency {
        /// The node-name path showing the circular dependency
        cycle: Vec<String>,
    },

    /// A node consumes a dataset key that no node in the pipeline produces
    #[error("Node '{node}' consumes '{key}' which is not produced by any node in the pipeline")]
    UnresolvedInput {
        /// The node with the unresolved input
        node: String,
        /// The dataset key that couldn't be resolved
        key: String,
    },

    /// Two nodes share the same name
    #[error("Duplicate node name: '{node}'")]
    DuplicateNodeName {
        /// The duplicated node name
        node: String,
    },

    /// A dataset key is declared as an output more than once
    #[error("Node '{node}' produces '{key}' which is already produced elsewhere in the pipeline")]
    DuplicateOutputKey {
        /// The node declaring the duplicate output
        node: String,
        /// The dataset key produced twice
        key: String,
    },

    /// A parameter key appears in a node's outputs
    #[error("Node '{node}' declares parameter '{key}' as an output; parameters are read-only")]
    ParameterOutput {
        /// The offending node
        node: String,
        /// The parameter key (with `params:` prefix)
        key: String,
    },
}
