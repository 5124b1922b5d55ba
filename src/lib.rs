//! # Preparar: Job Flow Compiler
//!
//! Preparar validates flat (task, phase) parameter sets and compiles them
//! into the nested YAML job flow documents a nakala classification pipeline
//! executes. A job flow names a collection reader, a collection analyzer,
//! and the data stores results are written to; the pipeline instantiates
//! each component reflectively from its `class_name`.
//!
//! ## Architecture
//!
//! - **params**: Task/phase vocabulary and the flat parameter set
//! - **rules**: Per-(task, phase) validation rules and the validator
//! - **flow**: Component tree construction and YAML emission
//! - **cli**: Command-line argument parsing

pub mod cli;
pub mod flow;
pub mod params;
pub mod rules;

pub mod error;

// Re-export commonly used types
pub use error::{Error, Result};
pub use flow::{compile, render, save, FlowSpec};
pub use params::{ParamSet, ParamValue, Phase, Task};
pub use rules::validate;
