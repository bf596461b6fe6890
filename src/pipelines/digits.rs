// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The digits model experiment pipeline.
//!
//! A fixed linear chain of four steps: acquire the dataset, split it into
//! train/test subsets, fit a model, and predict on the held-out split.
//! The step routines (`get_dataset`, `split_dataset`, `fit_model`,
//! `predict_data`) live in the external engine's registry; this module
//! only declares the wiring between them.

use crate::graph::{Node, Pipeline};
use std::collections::HashMap;

/// Assemble the digits experiment pipeline.
///
/// The assembler accepts a map of options for interface compatibility with
/// assemblers that are configurable, but ignores every entry: the returned
/// pipeline is the same four steps, in the same order, on every call.
///
/// Catalog keys referenced (the string contract with the external store):
/// `raw_data`, `X_train`, `X_test`, `y_train`, `y_test`, `model`,
/// `y_predict`, and the parameters `params:test_size`, `params:epochs`,
/// `params:batch_size`.
pub fn create_pipeline(options: &HashMap<String, serde_yaml::Value>) -> Pipeline {
    if !options.is_empty() {
        tracing::debug!(
            ignored = options.len(),
            "digits assembler takes no options"
        );
    }

    let nodes = vec![
        Node::source("acquire data", "get_dataset", ["raw_data"]),
        Node::new(
            "split data",
            "split_dataset",
            ["raw_data", "params:test_size"],
            ["X_train", "X_test", "y_train", "y_test"],
        ),
        Node::new(
            "fit model",
            "fit_model",
            ["X_train", "y_train", "params:epochs", "params:batch_size"],
            ["model"],
        ),
        Node::new(
            "predict",
            "predict_data",
            ["model", "X_test", "params:batch_size"],
            ["y_predict"],
        ),
    ];

    Pipeline::new(nodes).expect("digits pipeline wiring is statically valid")
}
