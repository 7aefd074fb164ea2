//! # Quark Bench
//!
//! Workloads and measurement helpers shared by the Quark benchmarks.

pub mod throughput;
pub mod workload;
