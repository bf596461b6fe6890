// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::graph::{Node, Pipeline};
    use crate::pipelines::digits::create_pipeline;
    use std::collections::{HashMap, HashSet};

    /// Surfaces assembly debug events when RUST_LOG is set.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    /// Every non-parameter input of a step must be produced by an earlier
    /// step, walking the ordered sequence front to back.
    #[test]
    fn test_digits_chain_wiring_is_self_consistent() {
        init_tracing();
        let pipeline = create_pipeline(&HashMap::new());
        let mut available: HashSet<&str> = HashSet::new();

        for node in &pipeline {
            for key in node.dataset_inputs() {
                assert!(
                    available.contains(key.name()),
                    "step '{}' consumes '{}' before it is produced",
                    node.name,
                    key
                );
            }
            for key in &node.outputs {
                available.insert(key.name());
            }
        }
    }

    /// The serialized plan carries the exact catalog key names an external
    /// engine resolves, parameters with their `params:` prefix included.
    #[test]
    fn test_pipeline_plan_serializes_for_external_engine() {
        let pipeline = create_pipeline(&HashMap::new());
        let plan = serde_yaml::to_string(&pipeline).unwrap();

        for key in [
            "raw_data",
            "X_train",
            "X_test",
            "y_train",
            "y_test",
            "model",
            "y_predict",
            "params:test_size",
            "params:epochs",
            "params:batch_size",
        ] {
            assert!(plan.contains(key), "plan is missing catalog key '{key}'");
        }
        for function in ["get_dataset", "split_dataset", "fit_model", "predict_data"] {
            assert!(plan.contains(function), "plan is missing function '{function}'");
        }
    }

    /// Declaring the digits steps back to front yields the same pipeline
    /// the assembler builds, because assembly orders by data dependencies.
    #[test]
    fn test_shuffled_declaration_matches_assembler_output() {
        init_tracing();
        let mut nodes: Vec<Node> = create_pipeline(&HashMap::new()).nodes().to_vec();
        nodes.reverse();

        let pipeline = Pipeline::new(nodes).unwrap();
        assert_eq!(pipeline, create_pipeline(&HashMap::new()));
    }

    /// Node declarations round-trip through serde, so plans can be read
    /// back for inspection.
    #[test]
    fn test_node_declarations_round_trip() {
        let node = Node::new(
            "split data",
            "split_dataset",
            ["raw_data", "params:test_size"],
            ["X_train", "X_test", "y_train", "y_test"],
        );

        let yaml = serde_yaml::to_string(&node).unwrap();
        let parsed: Node = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, node);
    }
}
