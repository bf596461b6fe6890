// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Construction-time validation of pipeline wiring.
//!
//! A pipeline is a list of node declarations whose data dependencies are
//! implied by shared catalog keys: the node producing `raw_data` must run
//! before every node consuming it. Rather than handing a broken wiring to
//! the external engine and failing at execution time, the checks here run
//! when the [`Pipeline`](crate::graph::Pipeline) is assembled.
//!
//! # Validation Pipeline
//!
//! The checks run in a fixed order:
//!
//! 1. **Name uniqueness** - node names are the primary key for error
//!    reporting and must not repeat
//! 2. **Output key integrity** - each dataset key has exactly one producer,
//!    and parameters never appear as outputs
//! 3. **Input resolution** - every consumed dataset key is produced by some
//!    node; parameter inputs are exempt, the external store resolves them
//! 4. **Acyclicity** - the implied dependency graph admits a topological
//!    order
//!
//! The first three checks accumulate so a caller sees every problem at
//! once. Cycle detection only runs on a structurally sound graph, since it
//! relies on a well-formed producer map.
//!
//! # Algorithms
//!
//! Ordering uses **Kahn's algorithm** over the implied node graph, with a
//! min-heap on declaration index so unconstrained nodes keep their declared
//! order and assembly is deterministic. When Kahn's algorithm stalls, a
//! **DFS with recursion-stack tracking** over the leftover nodes recovers
//! the actual cycle path for the error message.

use crate::errors::ValidationError;
use crate::graph::Node;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Validates a node list's wiring for structural integrity.
///
/// This is the entry point used by `Pipeline::new`; it is public so
/// callers can check a wiring without committing to pipeline assembly.
///
/// # Arguments
///
/// * `nodes` - The node declarations, in any order
///
/// # Returns
///
/// * `Ok(())` - Wiring is sound and admits a topological order
/// * `Err(Vec<ValidationError>)` - All problems found
pub fn validate_wiring(nodes: &[Node]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(name_errors) = validate_unique_node_names(nodes) {
        errors.extend(name_errors);
    }

    if let Err(output_errors) = validate_output_keys(nodes) {
        errors.extend(output_errors);
    }

    if let Err(input_errors) = validate_input_resolution(nodes) {
        errors.extend(input_errors);
    }

    // Cycle detection needs a well-formed producer map, so it only runs
    // once the structural checks pass.
    if errors.is_empty() {
        if let Err(cycle_error) = topological_order(nodes) {
            errors.push(cycle_error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates that all node names are unique within the pipeline.
fn validate_unique_node_names(nodes: &[Node]) -> Result<(), Vec<ValidationError>> {
    let mut seen_names = HashSet::new();
    let mut errors = Vec::new();

    for node in nodes {
        if !seen_names.insert(node.name.as_str()) {
            errors.push(ValidationError::DuplicateNodeName {
                node: node.name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates that every dataset key has a single producer and that no
/// parameter key is declared as an output.
///
/// A dataset key with two producers would make the implied dependency
/// graph ambiguous, and a parameter output would ask the engine to write
/// into the read-only parameter store.
fn validate_output_keys(nodes: &[Node]) -> Result<(), Vec<ValidationError>> {
    let mut produced = HashSet::new();
    let mut errors = Vec::new();

    for node in nodes {
        for key in &node.outputs {
            if key.is_parameter() {
                errors.push(ValidationError::ParameterOutput {
                    node: node.name.clone(),
                    key: key.to_string(),
                });
            } else if !produced.insert(key.name()) {
                errors.push(ValidationError::DuplicateOutputKey {
                    node: node.name.clone(),
                    key: key.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates that every consumed dataset key is produced by some node in
/// the pipeline.
///
/// Parameter inputs are skipped: they resolve against the external
/// parameter store and carry no intra-pipeline dependency.
fn validate_input_resolution(nodes: &[Node]) -> Result<(), Vec<ValidationError>> {
    let produced: HashSet<&str> = nodes
        .iter()
        .flat_map(|node| node.outputs.iter())
        .filter(|key| !key.is_parameter())
        .map(|key| key.name())
        .collect();
    let mut errors = Vec::new();

    for node in nodes {
        for key in node.dataset_inputs() {
            if !produced.contains(key.name()) {
                errors.push(ValidationError::UnresolvedInput {
                    node: node.name.clone(),
                    key: key.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Computes a topological order over the implied node dependency graph.
///
/// Returns declaration indices in execution order. Kahn's algorithm with a
/// min-heap on declaration index keeps ties in declared order, so the same
/// node list always yields the same plan. On a cycle, a DFS over the
/// nodes Kahn's algorithm could not place extracts the cycle path.
///
/// Precondition: output keys are unique (checked by [`validate_wiring`]).
pub(crate) fn topological_order(nodes: &[Node]) -> Result<Vec<usize>, ValidationError> {
    // dataset key -> declaration index of its producer
    let mut producer: HashMap<&str, usize> = HashMap::new();
    for (index, node) in nodes.iter().enumerate() {
        for key in &node.outputs {
            if !key.is_parameter() {
                producer.insert(key.name(), index);
            }
        }
    }

    // Edges run producer -> consumer, one per consumed dataset key.
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut in_degree: Vec<usize> = vec![0; nodes.len()];
    for (index, node) in nodes.iter().enumerate() {
        for key in node.dataset_inputs() {
            if let Some(&source) = producer.get(key.name()) {
                dependents[source].push(index);
                in_degree[index] += 1;
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(index, _)| Reverse(index))
        .collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(Reverse(index)) = ready.pop() {
        order.push(index);
        for &dependent in &dependents[index] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    if order.len() == nodes.len() {
        Ok(order)
    } else {
        Err(ValidationError::CyclicDependency {
            cycle: extract_cycle(nodes, &dependents, &order),
        })
    }
}

/// Recovers a cycle path from the nodes Kahn's algorithm left unplaced.
fn extract_cycle(nodes: &[Node], dependents: &[Vec<usize>], placed: &[usize]) -> Vec<String> {
    let placed: HashSet<usize> = placed.iter().copied().collect();
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for start in 0..nodes.len() {
        if placed.contains(&start) || visited.contains(&start) {
            continue;
        }
        if let Some(cycle) = dfs_cycle_detection(
            start,
            dependents,
            &placed,
            &mut visited,
            &mut rec_stack,
            &mut path,
        ) {
            return cycle.into_iter().map(|index| nodes[index].name.clone()).collect();
        }
    }

    Vec::new()
}

/// Depth-first search with recursion-stack tracking.
///
/// If a neighbor is already on the recursion stack we have found a back
/// edge; the cycle is the path segment from that neighbor to the current
/// node, closed by the back edge.
fn dfs_cycle_detection(
    node: usize,
    dependents: &[Vec<usize>],
    placed: &HashSet<usize>,
    visited: &mut HashSet<usize>,
    rec_stack: &mut HashSet<usize>,
    path: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    for &neighbor in &dependents[node] {
        if placed.contains(&neighbor) {
            continue;
        }
        if !visited.contains(&neighbor) {
            if let Some(cycle) =
                dfs_cycle_detection(neighbor, dependents, placed, visited, rec_stack, path)
            {
                return Some(cycle);
            }
        } else if rec_stack.contains(&neighbor) {
            let cycle_start = path.iter().position(|&index| index == neighbor).unwrap();
            let mut cycle = path[cycle_start..].to_vec();
            cycle.push(neighbor); // Close the cycle
            return Some(cycle);
        }
    }

    rec_stack.remove(&node);
    path.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_empty_wiring() {
        assert!(validate_wiring(&[]).is_ok());
    }

    #[test]
    fn test_valid_linear_chain() {
        let nodes = vec![
            Node::source("a", "fn_a", ["a_out"]),
            Node::new("b", "fn_b", ["a_out"], ["b_out"]),
            Node::new("c", "fn_c", ["b_out", "params:knob"], ["c_out"]),
        ];

        assert!(validate_wiring(&nodes).is_ok());
    }

    #[test]
    fn test_valid_diamond_wiring() {
        let nodes = vec![
            Node::source("a", "fn_a", ["a_out"]),
            Node::new("b", "fn_b", ["a_out"], ["b_out"]),
            Node::new("c", "fn_c", ["a_out"], ["c_out"]),
            Node::new("d", "fn_d", ["b_out", "c_out"], ["d_out"]),
        ];

        assert!(validate_wiring(&nodes).is_ok());
    }

    #[test]
    fn test_duplicate_node_names() {
        let nodes = vec![
            Node::source("a", "fn_a", ["a_out"]),
            Node::source("a", "fn_other", ["other_out"]), // Duplicate
        ];

        let errors = validate_wiring(&nodes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::DuplicateNodeName { .. }));
    }

    #[test]
    fn test_duplicate_output_key() {
        let nodes = vec![
            Node::source("a", "fn_a", ["shared"]),
            Node::source("b", "fn_b", ["shared"]),
        ];

        let errors = validate_wiring(&nodes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::DuplicateOutputKey { .. }
        ));
    }

    #[test]
    fn test_parameter_as_output() {
        let nodes = vec![Node::source("a", "fn_a", ["params:test_size"])];

        let errors = validate_wiring(&nodes).unwrap_err();
        assert!(matches!(errors[0], ValidationError::ParameterOutput { .. }));
    }

    #[test]
    fn test_unresolved_input() {
        let nodes = vec![
            Node::source("a", "fn_a", ["a_out"]),
            Node::new("b", "fn_b", ["nonexistent"], ["b_out"]),
        ];

        let errors = validate_wiring(&nodes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::UnresolvedInput { .. }
        ));
    }

    #[test]
    fn test_parameter_inputs_are_exempt() {
        // No node produces "test_size"; the params: prefix makes that fine.
        let nodes = vec![Node::new("a", "fn_a", ["params:test_size"], ["a_out"])];

        assert!(validate_wiring(&nodes).is_ok());
    }

    #[test]
    fn test_simple_cycle() {
        let nodes = vec![
            Node::new("a", "fn_a", ["b_out"], ["a_out"]),
            Node::new("b", "fn_b", ["a_out"], ["b_out"]),
        ];

        let errors = validate_wiring(&nodes).unwrap_err();
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ValidationError::CyclicDependency { cycle } => {
                assert_eq!(cycle.first(), cycle.last());
                assert_eq!(cycle.len(), 3);
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_self_dependency_cycle() {
        let nodes = vec![Node::new("a", "fn_a", ["a_out"], ["a_out"])];

        let errors = validate_wiring(&nodes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::CyclicDependency { .. }
        ));
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let nodes = vec![
            Node::new("a", "fn_a", ["missing"], ["a_out"]),
            Node::source("a", "fn_dup", ["params:oops"]), // Duplicate name, parameter output
        ];

        let errors = validate_wiring(&nodes).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_topological_order_sorts_shuffled_declarations() {
        let nodes = vec![
            Node::new("c", "fn_c", ["b_out"], ["c_out"]),
            Node::new("b", "fn_b", ["a_out"], ["b_out"]),
            Node::source("a", "fn_a", ["a_out"]),
        ];

        let order = topological_order(&nodes).unwrap();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_topological_order_keeps_declaration_order_for_unrelated_nodes() {
        let nodes = vec![
            Node::source("first", "fn_first", ["first_out"]),
            Node::source("second", "fn_second", ["second_out"]),
            Node::source("third", "fn_third", ["third_out"]),
        ];

        let order = topological_order(&nodes).unwrap();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
