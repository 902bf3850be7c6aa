//! Use cases

pub mod run_debate;
