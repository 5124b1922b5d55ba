//! Descriptor tree for the emitted job flow document.
//!
//! The downstream job runner instantiates each component reflectively from
//! its `class_name` and feeds it the `parameters` mapping, so the type of a
//! descriptor is the class reference itself. Everything here serializes
//! through serde into the block-style YAML the runner's parser expects.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::params::ParamValue;

/// Fully qualified class of an instantiable pipeline component.
///
/// The variants enumerate every component the compiler can emit. Keeping
/// them in one place means a typo in a class path is a compile error here
/// instead of a reflection failure in the job runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentClass {
    TsvIdentifiableTextCollectionReader,
    TsvCategorizedTextCollectionReader,
    FlatFileStore,
    SerializationStore,
    BnsWeightCalculator,
    RegexpTokenizerStream,
    Features,
    ResourceReader,
    TfFeatureWeightTextRepresenter,
    MarkupRemover,
    CaseNormalizer,
    NumberNormalizer,
    QueryExtractorCollectionAnalyzer,
    HummingBirdAnalyzer,
    HummingBirdModelLoader,
    QuietCollectionAnalyzer,
    ClassifierEvaluator,
    ClassifierCollectionAnalyzer,
    LibSvmTrainer,
    LibSvmTextClassifier,
    MultiModelClassifier,
    ValueScaler,
}

impl ComponentClass {
    /// Class path exactly as the job runner's class loader expects it.
    pub const fn qualified_name(self) -> &'static str {
        match self {
            Self::TsvIdentifiableTextCollectionReader => {
                "com.groupon.nakala.db.TsvIdentifiableTextCollectionReader"
            }
            Self::TsvCategorizedTextCollectionReader => {
                "com.groupon.nakala.db.TsvCategorizedTextCollectionReader"
            }
            Self::FlatFileStore => "com.groupon.nakala.db.FlatFileStore",
            Self::SerializationStore => "com.groupon.nakala.db.SerializationStore",
            Self::BnsWeightCalculator => "com.groupon.nakala.analysis.BnsWeightCalculator",
            Self::RegexpTokenizerStream => "com.groupon.nakala.core.RegexpTokenizerStream",
            Self::Features => "com.groupon.nakala.core.Features",
            Self::ResourceReader => "com.groupon.nakala.core.ResourceReader",
            Self::TfFeatureWeightTextRepresenter => {
                "com.groupon.nakala.core.TfFeatureWeightTextRepresenter"
            }
            Self::MarkupRemover => "com.groupon.nakala.normalization.MarkupRemover",
            Self::CaseNormalizer => "com.groupon.nakala.normalization.CaseNormalizer",
            Self::NumberNormalizer => "com.groupon.nakala.normalization.NumberNormalizer",
            Self::QueryExtractorCollectionAnalyzer => {
                "com.groupon.ml.quiet.QueryExtractorCollectionAnalyzer"
            }
            Self::HummingBirdAnalyzer => "com.groupon.ml.quiet.HummingBirdAnalyzer",
            Self::HummingBirdModelLoader => "com.groupon.ml.quiet.HummingBirdModelLoader",
            Self::QuietCollectionAnalyzer => "com.groupon.ml.quiet.QuietCollectionAnalyzer",
            Self::ClassifierEvaluator => "com.groupon.ml.ClassifierEvaluator",
            Self::ClassifierCollectionAnalyzer => "com.groupon.ml.ClassifierCollectionAnalyzer",
            Self::LibSvmTrainer => "com.groupon.ml.svm.LibSvmTrainer",
            Self::LibSvmTextClassifier => "com.groupon.ml.svm.LibSvmTextClassifier",
            Self::MultiModelClassifier => "com.groupon.ml.svm.MultiModelClassifier",
            Self::ValueScaler => "com.groupon.ml.svm.ValueScaler",
        }
    }
}

impl fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

impl Serialize for ComponentClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.qualified_name())
    }
}

/// A parameter value inside a component descriptor.
///
/// Serialized untagged: scalars stay scalars, nested components become
/// nested mappings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Strings(Vec<String>),
    Component(Box<Component>),
    Components(Vec<Component>),
}

impl From<ParamValue> for ConfigValue {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Str(s) => ConfigValue::Str(s),
            ParamValue::Int(i) => ConfigValue::Int(i),
            ParamValue::Float(f) => ConfigValue::Float(f),
            ParamValue::Bool(b) => ConfigValue::Bool(b),
            ParamValue::List(items) => ConfigValue::Strings(items),
        }
    }
}

impl From<&ParamValue> for ConfigValue {
    fn from(value: &ParamValue) -> Self {
        value.clone().into()
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Str(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Str(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        ConfigValue::Strings(value)
    }
}

impl From<Component> for ConfigValue {
    fn from(value: Component) -> Self {
        ConfigValue::Component(Box::new(value))
    }
}

impl From<Vec<Component>> for ConfigValue {
    fn from(value: Vec<Component>) -> Self {
        ConfigValue::Components(value)
    }
}

/// Ordered parameter map of a component.
///
/// Keys keep their insertion order so the emitted document reads the same
/// way the compiler built it. The runner treats the mapping as unordered,
/// so order is purely for human readers and stable diffs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params {
    entries: Vec<(&'static str, ConfigValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter. Callers are expected to set each key once.
    pub fn set(&mut self, key: &'static str, value: impl Into<ConfigValue>) {
        self.entries.push((key, value.into()));
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: &'static str, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One instantiable component: a class reference plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub class_name: ComponentClass,
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub parameters: Params,
}

impl Component {
    pub fn new(class_name: ComponentClass, parameters: Params) -> Self {
        Self {
            class_name,
            parameters,
        }
    }

    /// A component whose constructor takes no parameters. The `parameters`
    /// key is omitted from the document entirely.
    pub fn bare(class_name: ComponentClass) -> Self {
        Self {
            class_name,
            parameters: Params::new(),
        }
    }
}

/// Root document handed to the job runner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSpec {
    pub collection_reader: Component,
    pub collection_analyzer: Component,
    pub data_stores: Vec<Component>,
}
