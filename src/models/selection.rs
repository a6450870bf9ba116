use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display pattern for visit dates, e.g. `05/03/2026`.
pub const DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";

pub fn format_visit_date(date: &NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Monument,
    VisitDate,
    Slot,
    Nationality,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Monument,
        Field::VisitDate,
        Field::Slot,
        Field::Nationality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Monument => "monument",
            Field::VisitDate => "visitDate",
            Field::Slot => "slot",
            Field::Nationality => "nationality",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monument" => Some(Field::Monument),
            "visitDate" | "visit_date" | "date" => Some(Field::VisitDate),
            "slot" => Some(Field::Slot),
            "nationality" => Some(Field::Nationality),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    Incomplete,
    Ready,
}

impl FormState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormState::Incomplete => "incomplete",
            FormState::Ready => "ready",
        }
    }
}

/// The in-progress choice of monument, date, slot and nationality.
///
/// `None` means the field has not been selected yet.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSelection {
    pub monument: Option<String>,
    pub visit_date: Option<NaiveDate>,
    pub visit_date_display: Option<String>,
    pub slot: Option<String>,
    pub nationality: Option<String>,
}

impl BookingSelection {
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.is_set(*field))
            .collect()
    }

    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Monument => self.monument.is_some(),
            Field::VisitDate => self.visit_date.is_some(),
            Field::Slot => self.slot.is_some(),
            Field::Nationality => self.nationality.is_some(),
        }
    }

    pub fn state(&self) -> FormState {
        if Field::ALL.into_iter().all(|field| self.is_set(field)) {
            FormState::Ready
        } else {
            FormState::Incomplete
        }
    }
}

/// A booking attempt built from a complete selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub monument: String,
    pub visit_date: String,
    pub slot: String,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{value:?} is not a valid {field}")]
    InvalidSelection { field: Field, value: String },

    #[error("Please select today or a future date")]
    PastDateSelected { date: NaiveDate, today: NaiveDate },

    #[error("Please complete the booking form, missing: {}", join_fields(.missing))]
    IncompleteForm { missing: Vec<Field> },
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
