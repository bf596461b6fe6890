// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ValidationError;
use crate::graph::validation::{topological_order, validate_wiring};
use crate::graph::{CatalogKey, Node};
use serde::Serialize;

/// An ordered, acyclic chain of processing steps.
///
/// A pipeline owns its node declarations in a valid topological order:
/// every dataset key a node consumes is produced by a node earlier in the
/// sequence, and every parameter key resolves against the external store.
/// Both properties are checked at construction, so an external engine can
/// walk [`Pipeline::nodes`] front to back without re-validating.
///
/// The pipeline is purely descriptive. It holds no state, performs no I/O,
/// and is handed to the engine fresh from each assembly call.
///
/// # Example
/// ```
/// use trellis::graph::{Node, Pipeline};
///
/// let pipeline = Pipeline::new(vec![
///     Node::source("acquire", "get_dataset", ["raw_data"]),
///     Node::new("normalize", "normalize", ["raw_data", "params:scale"], ["clean_data"]),
/// ])
/// .unwrap();
///
/// assert_eq!(pipeline.len(), 2);
/// assert_eq!(pipeline.nodes()[0].name, "acquire");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Pipeline {
    nodes: Vec<Node>,
}

impl Pipeline {
    /// Assemble a pipeline from node declarations given in any order.
    ///
    /// The wiring is validated and the nodes are sorted topologically by
    /// their data dependencies, with declaration order preserved among
    /// unconstrained nodes so the result is deterministic.
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - a validly ordered pipeline
    /// * `Err(Vec<ValidationError>)` - every wiring problem found
    pub fn new(nodes: Vec<Node>) -> Result<Self, Vec<ValidationError>> {
        if let Err(errors) = validate_wiring(&nodes) {
            tracing::error!(errors = errors.len(), "pipeline wiring rejected");
            return Err(errors);
        }

        // Infallible here: validate_wiring already ran cycle detection.
        let order = topological_order(&nodes).map_err(|error| vec![error])?;
        let mut slots: Vec<Option<Node>> = nodes.into_iter().map(Some).collect();
        let nodes: Vec<Node> = order
            .into_iter()
            .map(|index| slots[index].take().unwrap())
            .collect();

        tracing::debug!(
            node_count = nodes.len(),
            edge_count = nodes.iter().map(|n| n.dataset_inputs().count()).sum::<usize>(),
            "pipeline assembled"
        );

        Ok(Pipeline { nodes })
    }

    /// The steps in execution order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the steps in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Every dataset key produced by this pipeline, in execution order.
    pub fn produced_keys(&self) -> Vec<&CatalogKey> {
        self.nodes
            .iter()
            .flat_map(|node| node.outputs.iter())
            .filter(|key| !key.is_parameter())
            .collect()
    }

    /// The consumed keys this pipeline does not produce itself.
    ///
    /// Given the construction-time wiring rules these are exactly the
    /// parameter keys, the entries the external store must supply.
    /// Duplicates are dropped; first occurrence wins.
    pub fn free_inputs(&self) -> Vec<&CatalogKey> {
        let produced: std::collections::HashSet<&str> = self
            .produced_keys()
            .iter()
            .map(|key| key.name())
            .collect();
        let mut seen = std::collections::HashSet::new();
        self.nodes
            .iter()
            .flat_map(|node| node.inputs.iter())
            .filter(|key| key.is_parameter() || !produced.contains(key.name()))
            .filter(|key| seen.insert(key.to_string()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
