// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod errors;    // error handling
pub mod graph;     // pipeline graph model + wiring validation
pub mod pipelines; // concrete pipeline definitions
