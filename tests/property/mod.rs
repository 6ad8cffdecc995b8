// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Invariants of the reconciliation engine checked over generated
//! inventories.

mod engine_invariants;
