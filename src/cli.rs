//! CLI argument parsing
//!
//! This module provides the command-line interface for compiling job flow
//! documents.
//!
//! # Usage
//!
//! ```bash
//! preparar -t svm -p feature --input-file training.tsv --id-field 0 \
//!     --text-field 1 --label-field 2 --data-store features.tsv
//! preparar -t quiet -p classify --input-file batch.tsv --id-field 0 \
//!     --text-field 1 --quiet-model m1.bin m2.bin --data-store results.tsv \
//!     -o flow.yaml
//! ```

use clap::Parser;

use crate::params::{keys, ParamSet, Phase, Task};

/// Preparar: job flow compiler for nakala classification pipelines
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "preparar")]
#[command(author = "PAIML")]
#[command(version)]
#[command(
    about = "Compiles flat task parameters into the YAML job flow a nakala classification pipeline runs"
)]
pub struct Cli {
    /// Task type; 'svm' for website classification, 'quiet' for name
    /// classification and service identification
    #[arg(short, long)]
    pub task: Task,

    /// Task phase; 'feature' for feature extraction, 'learn' for learning,
    /// 'evaluate' for evaluation on test data, 'classify' for batch
    /// classification of new data
    #[arg(short, long)]
    pub phase: Phase,

    /// Output YAML file name. Omit or use '-' for stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Path to training/test file
    #[arg(long, value_name = "FILE")]
    pub input_file: String,

    /// 0-based index of the record id in training/test data
    #[arg(long, value_name = "N")]
    pub id_field: i64,

    /// 0-based index of comma-separated true labels in training/test data
    #[arg(long, value_name = "N")]
    pub label_field: Option<i64>,

    /// 0-based index of the input text in training/test data
    #[arg(long, value_name = "N")]
    pub text_field: i64,

    /// Number of threads used by the collection analyzer
    #[arg(long, value_name = "N")]
    pub number_of_threads: Option<i64>,

    /// Target class to train/test for in case of a multiclass corpus.
    /// Not needed if the corpus is already binary
    #[arg(long, value_name = "CLASS")]
    pub target_class: Option<String>,

    /// Maximum feature size for feature selection
    #[arg(long, value_name = "N")]
    pub max_feature_size: Option<i64>,

    /// Minimum feature weight to include in the feature set
    #[arg(long, value_name = "WEIGHT")]
    pub min_feature_weight: Option<f64>,

    /// Path to a lucene index directory. If unspecified, an in-memory
    /// index is used
    #[arg(long, value_name = "DIR")]
    pub index_dir: Option<String>,

    /// Proportion of training data to sample in parameter optimization
    /// (e.g., 0.2 for a 20% sample)
    #[arg(long, value_name = "FRACTION")]
    pub sample: Option<f64>,

    /// Path to TSV feature file(s); one per model in multimodel batch
    /// classification
    #[arg(long, value_name = "FILE", num_args = 1..)]
    pub feature_file: Option<Vec<String>>,

    /// Path to trained SVM output file stem(s); paired positionally with
    /// feature files
    #[arg(long, value_name = "STEM", num_args = 1..)]
    pub svm_output_stem: Option<Vec<String>>,

    /// Path to QuIET model(s); one per model in multimodel batch
    /// classification
    #[arg(long, value_name = "FILE", num_args = 1..)]
    pub quiet_model: Option<Vec<String>>,

    /// Path the job flow writes its results to
    #[arg(long, value_name = "FILE")]
    pub data_store: String,

    /// Validate and compile but write nothing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet_output: bool,
}

impl Cli {
    /// Collects the supplied flags into the flat parameter set the
    /// validator and compiler consume. The output destination is handled
    /// by the writer and never enters the set.
    pub fn to_params(&self) -> ParamSet {
        let mut params = ParamSet::new()
            .with(keys::TASK, self.task.name())
            .with(keys::PHASE, self.phase.name())
            .with(keys::INPUT_FILE, self.input_file.clone())
            .with(keys::ID_FIELD, self.id_field)
            .with(keys::TEXT_FIELD, self.text_field)
            .with(keys::DATA_STORE, self.data_store.clone());
        if let Some(label_field) = self.label_field {
            params.set(keys::LABEL_FIELD, label_field);
        }
        if let Some(number_of_threads) = self.number_of_threads {
            params.set(keys::NUMBER_OF_THREADS, number_of_threads);
        }
        if let Some(target_class) = &self.target_class {
            params.set(keys::TARGET_CLASS, target_class.clone());
        }
        if let Some(max_feature_size) = self.max_feature_size {
            params.set(keys::MAX_FEATURE_SIZE, max_feature_size);
        }
        if let Some(min_feature_weight) = self.min_feature_weight {
            params.set(keys::MIN_FEATURE_WEIGHT, min_feature_weight);
        }
        if let Some(index_dir) = &self.index_dir {
            params.set(keys::INDEX_DIR, index_dir.clone());
        }
        if let Some(sample) = self.sample {
            params.set(keys::SAMPLE, sample);
        }
        if let Some(feature_file) = &self.feature_file {
            params.set(keys::FEATURE_FILE, feature_file.clone());
        }
        if let Some(svm_output_stem) = &self.svm_output_stem {
            params.set(keys::SVM_OUTPUT_STEM, svm_output_stem.clone());
        }
        if let Some(quiet_model) = &self.quiet_model {
            params.set(keys::QUIET_MODEL, quiet_model.clone());
        }
        params
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
