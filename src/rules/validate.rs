//! Parameter validation against the rule table.

use std::collections::BTreeSet;

use thiserror::Error;

use super::{rule_for, Constraint};
use crate::params::{keys, ParamSet};

/// Keys a successful validation claimed (always the full supplied set).
pub type ClaimedKeys = BTreeSet<String>;

/// A single validation finding.
///
/// The display strings are wire-stable: downstream tooling greps for them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("Task unknown or not specified.")]
    UnknownTask,

    #[error("Phase unknown or not specified.")]
    UnknownPhase,

    #[error("{0} not specified.")]
    MissingKey(&'static str),

    #[error("Length of {key} must be {expected}.")]
    WrongLength { key: &'static str, expected: usize },

    #[error("Lengths of {left} and {right} are not equal.")]
    MismatchedLengths {
        left: &'static str,
        right: &'static str,
    },

    #[error("Don't know what to do with option(s) [{0}]")]
    UnclaimedKeys(String),
}

/// Everything wrong with one parameter set, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", joined(.violations))]
pub struct ValidationFailure {
    /// Violations in reporting order: task, phase, required keys in rule
    /// order, constraints in rule order, the unclaimed aggregate last.
    pub violations: Vec<RuleViolation>,
}

fn joined(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// What one check contributes: the keys it claims and the violations it found.
#[derive(Debug, Default)]
struct CheckOutcome {
    claimed: Vec<&'static str>,
    violations: Vec<RuleViolation>,
}

impl CheckOutcome {
    fn merge(mut self, other: CheckOutcome) -> Self {
        self.claimed.extend(other.claimed);
        self.violations.extend(other.violations);
        self
    }
}

/// Validate a parameter set against the rule for its (task, phase) pair.
///
/// Every check runs; nothing short-circuits, so one pass reports everything
/// wrong with the set. On success the returned set holds every claimed key,
/// which is exactly the supplied key set since an unclaimed key is itself a
/// violation. The input is never mutated.
pub fn validate(params: &ParamSet) -> Result<ClaimedKeys, ValidationFailure> {
    let task = params.task();
    let phase = params.phase();

    let mut outcome = CheckOutcome::default();
    match task {
        Some(_) => outcome.claimed.push(keys::TASK),
        None => outcome.violations.push(RuleViolation::UnknownTask),
    }
    match phase {
        Some(_) => outcome.claimed.push(keys::PHASE),
        None => outcome.violations.push(RuleViolation::UnknownPhase),
    }

    // Rule checks only run for a recognized pair. With an unknown task or
    // phase the per-rule keys stay unclaimed rather than guessing a rule.
    if let (Some(task), Some(phase)) = (task, phase) {
        let rule = rule_for(task, phase);
        outcome = outcome
            .merge(check_required(params, rule.required))
            .merge(check_optional(params, rule.optional))
            .merge(check_constraints(params, rule.constraints));
    }

    let claimed: BTreeSet<&str> = outcome.claimed.iter().copied().collect();
    if let Some(violation) = check_unclaimed(params, &claimed) {
        outcome.violations.push(violation);
    }

    if outcome.violations.is_empty() {
        Ok(claimed.into_iter().map(String::from).collect())
    } else {
        Err(ValidationFailure {
            violations: outcome.violations,
        })
    }
}

fn check_required(params: &ParamSet, required: &'static [&'static str]) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    for &key in required {
        if params.contains(key) {
            outcome.claimed.push(key);
        } else {
            outcome.violations.push(RuleViolation::MissingKey(key));
        }
    }
    outcome
}

fn check_optional(params: &ParamSet, optional: &'static [&'static str]) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    for &key in optional {
        if params.contains(key) {
            outcome.claimed.push(key);
        }
    }
    outcome
}

fn check_constraints(params: &ParamSet, constraints: &'static [Constraint]) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    for constraint in constraints {
        if let Some(violation) = check_constraint(params, constraint) {
            outcome.violations.push(violation);
        }
    }
    outcome
}

// A missing or non-list value violates length constraints too; a required
// list that was never supplied therefore reports both findings.
fn check_constraint(params: &ParamSet, constraint: &Constraint) -> Option<RuleViolation> {
    match *constraint {
        Constraint::LengthEquals(key, expected) => match params.list_len(key) {
            Some(len) if len == expected => None,
            _ => Some(RuleViolation::WrongLength { key, expected }),
        },
        Constraint::LengthsMatch(left, right) => {
            match (params.list_len(left), params.list_len(right)) {
                (Some(a), Some(b)) if a == b => None,
                _ => Some(RuleViolation::MismatchedLengths { left, right }),
            }
        }
    }
}

fn check_unclaimed(params: &ParamSet, claimed: &BTreeSet<&str>) -> Option<RuleViolation> {
    let unclaimed: Vec<&str> = params.keys().filter(|key| !claimed.contains(key)).collect();
    if unclaimed.is_empty() {
        None
    } else {
        // ParamSet iterates sorted, so the aggregate lists keys sorted.
        Some(RuleViolation::UnclaimedKeys(unclaimed.join(",")))
    }
}
