// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::graph::CatalogKey;
use serde::{Deserialize, Serialize};

/// Declaration of a single processing step in a pipeline.
///
/// A node is purely descriptive: it names an external routine and the
/// catalog keys that routine consumes and produces. Nothing here is ever
/// invoked; the external engine resolves `function` against its registry
/// and the keys against its catalog at execution time.
///
/// # Fields
/// * `name` - Unique human-readable label for this step
/// * `function` - Name of the external routine the engine will run
/// * `inputs` - Ordered catalog keys consumed (empty for source nodes)
/// * `outputs` - Ordered catalog keys produced
///
/// # Example
/// ```
/// use trellis::graph::Node;
///
/// let split = Node::new(
///     "split data",
///     "split_dataset",
///     ["raw_data", "params:test_size"],
///     ["X_train", "X_test", "y_train", "y_test"],
/// );
///
/// assert_eq!(split.inputs.len(), 2);
/// assert!(split.inputs[1].is_parameter());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub function: String,
    #[serde(default)]
    pub inputs: Vec<CatalogKey>,
    #[serde(default)]
    pub outputs: Vec<CatalogKey>,
}

impl Node {
    /// Declare a node from its function reference and catalog keys.
    ///
    /// Keys may be given in the string contract form (`params:` prefix for
    /// parameters) or as [`CatalogKey`] values; order is preserved.
    pub fn new<I, O>(name: &str, function: &str, inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<CatalogKey>,
        O: IntoIterator,
        O::Item: Into<CatalogKey>,
    {
        Node {
            name: name.to_string(),
            function: function.to_string(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Declare a node with no inputs, the entry point of a chain.
    pub fn source<O>(name: &str, function: &str, outputs: O) -> Self
    where
        O: IntoIterator,
        O::Item: Into<CatalogKey>,
    {
        Node::new(name, function, Vec::<CatalogKey>::new(), outputs)
    }

    /// The non-parameter inputs, the keys that must be produced by some
    /// other node in the same pipeline.
    pub fn dataset_inputs(&self) -> impl Iterator<Item = &CatalogKey> {
        self.inputs.iter().filter(|key| !key.is_parameter())
    }
}
