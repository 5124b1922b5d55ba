//! Job flow document compilation
//!
//! This module turns a validated flat parameter set into the nested
//! component tree the job runner executes, and serializes it as YAML.
//!
//! # Example
//!
//! ```yaml
//! collection_reader:
//!   class_name: com.groupon.nakala.db.TsvCategorizedTextCollectionReader
//!   parameters:
//!     file_name: training.tsv
//!     separator: \t
//!     id_field: 0
//!     text_field: 1
//!     label_field: 2
//!
//! collection_analyzer:
//!   class_name: com.groupon.nakala.analysis.BnsWeightCalculator
//!   parameters:
//!     min_df: 3
//!     use_absolute_values: true
//!
//! data_stores:
//! - class_name: com.groupon.nakala.db.FlatFileStore
//!   parameters:
//!     file_name: features.tsv
//! ```

mod component;
mod compile;
mod emit;


pub use compile::{compile, OutputStem};
pub use component::{Component, ComponentClass, ConfigValue, FlowSpec, Params};
pub use emit::{render, save};
