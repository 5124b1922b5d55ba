//! Task/phase identifiers and the flat parameter mapping.
//!
//! A [`ParamSet`] is what the CLI hands to [`validate`](crate::rules::validate)
//! and [`compile`](crate::flow::compile): a flat map from a fixed key
//! vocabulary to scalar or list values. Keys the caller did not supply are
//! simply absent, never present-with-null.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Parameter key vocabulary shared by the validator and the compiler.
pub mod keys {
    pub const TASK: &str = "task";
    pub const PHASE: &str = "phase";

    // Collection reader
    pub const INPUT_FILE: &str = "input_file";
    pub const ID_FIELD: &str = "id_field";
    pub const LABEL_FIELD: &str = "label_field";
    pub const TEXT_FIELD: &str = "text_field";

    // Collection analyzer
    pub const NUMBER_OF_THREADS: &str = "number_of_threads";
    pub const TARGET_CLASS: &str = "target_class";
    pub const MAX_FEATURE_SIZE: &str = "max_feature_size";
    pub const MIN_FEATURE_WEIGHT: &str = "min_feature_weight";
    pub const SAMPLE: &str = "sample";
    pub const FEATURE_FILE: &str = "feature_file";
    pub const SVM_OUTPUT_STEM: &str = "svm_output_stem";
    pub const QUIET_MODEL: &str = "quiet_model";
    pub const INDEX_DIR: &str = "index_dir";

    // Data store
    pub const DATA_STORE: &str = "data_store";
}

/// Classification task being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// LibSVM pipeline driven by feature-file/output-stem pairs.
    Svm,
    /// QuIET query-extraction pipeline driven by named model files.
    Quiet,
}

impl Task {
    pub const ALL: [Task; 2] = [Task::Svm, Task::Quiet];

    /// Wire name as it appears in the parameter set.
    pub const fn name(self) -> &'static str {
        match self {
            Task::Svm => "svm",
            Task::Quiet => "quiet",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = String;

    // Exact lowercase match: the validator treats anything else as unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svm" => Ok(Task::Svm),
            "quiet" => Ok(Task::Quiet),
            _ => Err(format!("Unknown task: {s}. Valid tasks: svm, quiet")),
        }
    }
}

/// Pipeline stage being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Feature extraction
    Feature,
    /// Model learning
    Learn,
    /// Evaluation on a test set
    Evaluate,
    /// Batch classification of new data
    Classify,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Feature, Phase::Learn, Phase::Evaluate, Phase::Classify];

    /// Wire name as it appears in the parameter set.
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Feature => "feature",
            Phase::Learn => "learn",
            Phase::Evaluate => "evaluate",
            Phase::Classify => "classify",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feature" => Ok(Phase::Feature),
            "learn" => Ok(Phase::Learn),
            "evaluate" => Ok(Phase::Evaluate),
            "classify" => Ok(Phase::Classify),
            _ => Err(format!(
                "Unknown phase: {s}. Valid phases: feature, learn, evaluate, classify"
            )),
        }
    }
}

/// A single caller-supplied parameter value.
///
/// Multi-valued flags (`feature_file`, `svm_output_stem`, `quiet_model`)
/// accumulate into `List`; everything else is a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
}

impl ParamValue {
    /// String payload, if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// List payload, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(String::from).collect())
    }
}

/// Flat parameter mapping for one invocation.
///
/// Keys are drawn from the [`keys`] vocabulary; unknown keys are legal here
/// and rejected later by validation's unclaimed-keys check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Chaining form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Supplied keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Length of the list at `key`; `None` when absent or not a list.
    pub fn list_len(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(ParamValue::as_list).map(<[String]>::len)
    }

    /// The task identifier, when present and recognized.
    pub fn task(&self) -> Option<Task> {
        self.get(keys::TASK)?.as_str()?.parse().ok()
    }

    /// The phase identifier, when present and recognized.
    pub fn phase(&self) -> Option<Phase> {
        self.get(keys::PHASE)?.as_str()?.parse().ok()
    }
}
