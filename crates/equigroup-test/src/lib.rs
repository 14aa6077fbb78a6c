//! Shared test fixtures for equigroup crates.
//!
//! This crate provides small hand-written datasets with known answers and a
//! seeded generator for larger populations.
//!
//! - [`scenario`] - fixed datasets for the partition and selection scenarios
//! - [`synthetic`] - reproducible random populations
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! equigroup-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use equigroup_test::scenario::{color_pairs, perfect_match};
//! use equigroup_test::synthetic::synthetic_population;
//! ```

pub mod scenario;
pub mod synthetic;

pub use scenario::{candidate_pool, color_pairs, perfect_match, scenario_a, SelectionFixture};
pub use synthetic::synthetic_population;
