//! Input validation for the two sequence fields.
//!
//! Each field is checked against three rules, in order:
//! 1. it must not be empty,
//! 2. every character must be one of the 20 amino acid letters (any case)
//!    or the gap symbol `-`,
//! 3. it must have the same length as the other field.
//!
//! Only the first failing rule is reported per field. A pair that passes
//! is uppercased into a [`SequencePair`], the only input the comparator
//! ever sees from the UI.

use thiserror::Error;

use crate::compare::{compare, ColumnPair, CompareError};
use crate::residue::is_accepted;

/// Message shown for characters outside the residue alphabet.
pub const ALPHABET_HINT: &str = "only the amino acid letters A, R, N, D, C, E, Q, G, H, I, L, K, M, F, P, S, T, W, Y, V and the symbol - are allowed";

/// One violated rule on one field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required")]
    EmptyInput,

    #[error("Invalid character '{ch}' at position {position}: {hint}", hint = ALPHABET_HINT)]
    InvalidCharacter { ch: char, position: usize },

    #[error("Sequences must have the same length ({len} vs {other_len})")]
    LengthMismatch { len: usize, other_len: usize },
}

/// The two input fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    First,
    Second,
}

impl Field {
    pub fn other(self) -> Field {
        match self {
            Field::First => Field::Second,
            Field::Second => Field::First,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::First => "First sequence",
            Field::Second => "Second sequence",
        }
    }
}

/// Per-field errors of a rejected submission.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("{}", describe(.first, .second))]
pub struct PairErrors {
    pub first: Option<ValidationError>,
    pub second: Option<ValidationError>,
}

impl PairErrors {
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        match field {
            Field::First => self.first.as_ref(),
            Field::Second => self.second.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }

    /// One `label: message` line per failing field.
    pub fn messages(&self) -> Vec<String> {
        [Field::First, Field::Second]
            .into_iter()
            .filter_map(|f| self.get(f).map(|e| format!("{}: {}", f.label(), e)))
            .collect()
    }
}

fn describe(first: &Option<ValidationError>, second: &Option<ValidationError>) -> String {
    PairErrors {
        first: first.clone(),
        second: second.clone(),
    }
    .messages()
    .join("; ")
}

/// Checks a single field against the validation rules.
///
/// `other` is the raw content of the other field, used by the length rule.
pub fn validate_field(value: &str, other: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if let Some((idx, ch)) = value.chars().enumerate().find(|(_, c)| !is_accepted(*c)) {
        return Err(ValidationError::InvalidCharacter {
            ch,
            position: idx + 1,
        });
    }

    let len = value.chars().count();
    let other_len = other.chars().count();
    if len != other_len {
        return Err(ValidationError::LengthMismatch { len, other_len });
    }

    Ok(())
}

/// Validates both fields and returns the normalized pair.
pub fn validate_pair(first: &str, second: &str) -> Result<SequencePair, PairErrors> {
    let errors = PairErrors {
        first: validate_field(first, second).err(),
        second: validate_field(second, first).err(),
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SequencePair {
        top: first.to_ascii_uppercase(),
        bottom: second.to_ascii_uppercase(),
    })
}

/// Two validated, uppercased sequences of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    top: String,
    bottom: String,
}

impl SequencePair {
    pub fn top(&self) -> &str {
        &self.top
    }

    pub fn bottom(&self) -> &str {
        &self.bottom
    }

    pub fn len(&self) -> usize {
        self.top.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    /// Runs the comparator on this pair.
    pub fn compare(&self) -> Result<Vec<ColumnPair>, CompareError> {
        compare(&self.top, &self.bottom)
    }
}
