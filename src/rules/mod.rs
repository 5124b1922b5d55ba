//! Per-(task, phase) validation rules.
//!
//! One static [`ValidationRule`] exists for each of the eight (task, phase)
//! combinations; [`rule_for`] is a total lookup over them. Rules are pure
//! data and never change at runtime: [`validate`] walks the matched rule and
//! accumulates every violation instead of stopping at the first.

mod validate;


pub use validate::{validate, ClaimedKeys, RuleViolation, ValidationFailure};

use crate::params::{keys, Phase, Task};

/// Structural constraint on list-valued parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// The value must be a list of exactly this length.
    LengthEquals(&'static str, usize),
    /// Both values must be lists of equal length.
    LengthsMatch(&'static str, &'static str),
}

/// Which parameters one (task, phase) combination accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRule {
    /// Keys that must be present, in error-reporting order.
    pub required: &'static [&'static str],
    /// Keys that may be present; absence is never an error.
    pub optional: &'static [&'static str],
    pub constraints: &'static [Constraint],
}

/// Look up the rule for a recognized (task, phase) pair.
pub const fn rule_for(task: Task, phase: Phase) -> &'static ValidationRule {
    match (task, phase) {
        (Task::Quiet, Phase::Feature) => &QUIET_FEATURE,
        (Task::Quiet, Phase::Learn) => &QUIET_LEARN,
        (Task::Quiet, Phase::Evaluate) => &QUIET_EVALUATE,
        (Task::Quiet, Phase::Classify) => &QUIET_CLASSIFY,
        (Task::Svm, Phase::Feature) => &SVM_FEATURE,
        (Task::Svm, Phase::Learn) => &SVM_LEARN,
        (Task::Svm, Phase::Evaluate) => &SVM_EVALUATE,
        (Task::Svm, Phase::Classify) => &SVM_CLASSIFY,
    }
}

static QUIET_FEATURE: ValidationRule = ValidationRule {
    required: &[
        keys::INPUT_FILE,
        keys::ID_FIELD,
        keys::TEXT_FIELD,
        keys::LABEL_FIELD,
        keys::DATA_STORE,
    ],
    optional: &[
        keys::TARGET_CLASS,
        keys::MAX_FEATURE_SIZE,
        keys::MIN_FEATURE_WEIGHT,
    ],
    constraints: &[],
};

static QUIET_LEARN: ValidationRule = ValidationRule {
    required: &[
        keys::INPUT_FILE,
        keys::ID_FIELD,
        keys::TEXT_FIELD,
        keys::LABEL_FIELD,
        keys::FEATURE_FILE,
        keys::DATA_STORE,
        keys::TARGET_CLASS,
    ],
    optional: &[keys::NUMBER_OF_THREADS, keys::INDEX_DIR, keys::SAMPLE],
    constraints: &[],
};

static QUIET_EVALUATE: ValidationRule = ValidationRule {
    required: &[
        keys::INPUT_FILE,
        keys::ID_FIELD,
        keys::TEXT_FIELD,
        keys::LABEL_FIELD,
        keys::QUIET_MODEL,
        keys::DATA_STORE,
    ],
    optional: &[keys::TARGET_CLASS],
    constraints: &[Constraint::LengthEquals(keys::QUIET_MODEL, 1)],
};

static QUIET_CLASSIFY: ValidationRule = ValidationRule {
    required: &[
        keys::INPUT_FILE,
        keys::ID_FIELD,
        keys::TEXT_FIELD,
        keys::QUIET_MODEL,
        keys::DATA_STORE,
    ],
    optional: &[keys::NUMBER_OF_THREADS],
    constraints: &[],
};

static SVM_FEATURE: ValidationRule = ValidationRule {
    required: &[
        keys::INPUT_FILE,
        keys::ID_FIELD,
        keys::TEXT_FIELD,
        keys::LABEL_FIELD,
        keys::DATA_STORE,
    ],
    optional: &[
        keys::TARGET_CLASS,
        keys::MAX_FEATURE_SIZE,
        keys::MIN_FEATURE_WEIGHT,
    ],
    constraints: &[],
};

static SVM_LEARN: ValidationRule = ValidationRule {
    required: &[
        keys::INPUT_FILE,
        keys::ID_FIELD,
        keys::TEXT_FIELD,
        keys::LABEL_FIELD,
        keys::FEATURE_FILE,
        keys::DATA_STORE,
    ],
    optional: &[keys::TARGET_CLASS, keys::NUMBER_OF_THREADS, keys::SAMPLE],
    constraints: &[],
};

static SVM_EVALUATE: ValidationRule = ValidationRule {
    required: &[
        keys::INPUT_FILE,
        keys::ID_FIELD,
        keys::TEXT_FIELD,
        keys::LABEL_FIELD,
        keys::FEATURE_FILE,
        keys::SVM_OUTPUT_STEM,
        keys::DATA_STORE,
    ],
    optional: &[keys::TARGET_CLASS],
    constraints: &[
        Constraint::LengthEquals(keys::FEATURE_FILE, 1),
        Constraint::LengthEquals(keys::SVM_OUTPUT_STEM, 1),
    ],
};

static SVM_CLASSIFY: ValidationRule = ValidationRule {
    required: &[
        keys::INPUT_FILE,
        keys::ID_FIELD,
        keys::TEXT_FIELD,
        keys::FEATURE_FILE,
        keys::SVM_OUTPUT_STEM,
        keys::DATA_STORE,
    ],
    optional: &[keys::NUMBER_OF_THREADS],
    constraints: &[Constraint::LengthsMatch(
        keys::FEATURE_FILE,
        keys::SVM_OUTPUT_STEM,
    )],
};
