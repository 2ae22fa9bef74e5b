//! Domain models held by the record store and rendered by the TUI. Records are
//! immutable once built: fields stay private and the only way in is through
//! the validating constructors, so every `Patient` has a positive age and
//! every `Medicine` a non-negative stock.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::store::RecordError;

/// Closed set of genders offered by the patient form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    /// Every variant in the order the form cycles through them.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Step forward through the fixed set, wrapping after `Other`.
    pub fn next(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Other,
            Gender::Other => Gender::Male,
        }
    }

    /// Step backward through the fixed set, wrapping before `Male`.
    pub fn previous(self) -> Self {
        match self {
            Gender::Male => Gender::Other,
            Gender::Female => Gender::Male,
            Gender::Other => Gender::Female,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name one of the three genders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender `{0}`; expected Male, Female or Other")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseGenderError(s.to_string()))
    }
}

/// Numeric form input that may arrive either as raw text from a field or as an
/// integer from code. Text is parsed exactly as given, without trimming.
pub trait CountInput {
    /// The candidate integer, or `None` when the input is not numeric.
    fn to_count(&self) -> Option<i64>;
}

impl CountInput for str {
    fn to_count(&self) -> Option<i64> {
        self.parse::<i64>().ok()
    }
}

impl CountInput for String {
    fn to_count(&self) -> Option<i64> {
        self.as_str().to_count()
    }
}

impl CountInput for i32 {
    fn to_count(&self) -> Option<i64> {
        Some(i64::from(*self))
    }
}

impl CountInput for i64 {
    fn to_count(&self) -> Option<i64> {
        Some(*self)
    }
}

impl CountInput for u32 {
    fn to_count(&self) -> Option<i64> {
        Some(i64::from(*self))
    }
}

impl<T: CountInput + ?Sized> CountInput for &T {
    fn to_count(&self) -> Option<i64> {
        (**self).to_count()
    }
}

/// Narrow a candidate count to a non-negative value that fits a signed 32-bit
/// integer, the range the form has always accepted.
fn bounded_count(input: impl CountInput) -> Option<u32> {
    input
        .to_count()
        .and_then(|value| i32::try_from(value).ok())
        .and_then(|value| u32::try_from(value).ok())
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A registered patient. The disease text is what ties the patient to
/// medicines in the report, so it is kept verbatim.
pub struct Patient {
    name: String,
    /// Always greater than zero.
    age: u32,
    disease: String,
    gender: Gender,
    doctor_name: String,
}

impl Patient {
    /// Build a patient, rejecting ages that are not numeric or not positive.
    pub fn new(
        name: &str,
        age: impl CountInput,
        disease: &str,
        gender: Gender,
        doctor_name: &str,
    ) -> Result<Self, RecordError> {
        let age = bounded_count(age)
            .filter(|value| *value > 0)
            .ok_or(RecordError::InvalidAge)?;

        Ok(Self {
            name: name.to_string(),
            age,
            disease: disease.to_string(),
            gender,
            doctor_name: doctor_name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn disease(&self) -> &str {
        &self.disease
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn doctor_name(&self) -> &str {
        &self.doctor_name
    }
}

impl fmt::Display for Patient {
    /// Single-line summary used by the patient list view.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Age: {} | Disease: {} | Gender: {} | Doctor: {}",
            self.name, self.age, self.disease, self.gender, self.doctor_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A medicine in stock, tagged with the disease it treats.
pub struct Medicine {
    name: String,
    stock: u32,
    disease: String,
}

impl Medicine {
    /// Build a medicine, rejecting stock that is not numeric or is negative.
    pub fn new(name: &str, stock: impl CountInput, disease: &str) -> Result<Self, RecordError> {
        let stock = bounded_count(stock).ok_or(RecordError::InvalidStock)?;

        Ok(Self {
            name: name.to_string(),
            stock,
            disease: disease.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn disease(&self) -> &str {
        &self.disease
    }

    /// Whether this medicine treats the given disease. Comparison folds case
    /// per character and otherwise compares the text exactly.
    pub fn treats(&self, disease: &str) -> bool {
        disease_matches(&self.disease, disease)
    }
}

impl fmt::Display for Medicine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | Quantity: {}", self.name, self.stock)
    }
}

/// Case-insensitive exact equality of two disease names. Both names must have
/// the same number of characters; no trimming and no partial matches.
pub fn disease_matches(left: &str, right: &str) -> bool {
    let mut left = left.chars();
    let mut right = right.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if chars_match_ignoring_case(a, b) => {}
            _ => return false,
        }
    }
}

/// Two characters match when they are equal or share an uppercase or a
/// lowercase form, so final sigma `ς` matches `Σ` and `σ`.
fn chars_match_ignoring_case(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase()) || a.to_lowercase().eq(b.to_lowercase())
}
