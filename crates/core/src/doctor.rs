//! Doctor records and payload normalization
//!
//! The directory endpoint serves a loosely-typed JSON array. Every element is
//! normalized here, once, into a fully-defaulted [`DoctorRecord`]: absent,
//! null or wrongly-typed fields become their empty value, so nothing
//! downstream ever has to handle a missing field.
//!
//! Fees and experience arrive either as numbers or as descriptive text
//! ("₹ 500", "10 Years of experience"). They are parsed at this boundary into
//! [`Fee`] and [`Experience`], which keep the source text for display next to
//! the numeric value used for sorting.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error type for payload normalization
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("expected a JSON array of doctors, got {0}")]
    NotAnArray(&'static str),
}

/// A named medical specialization
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Speciality {
    pub name: String,
}

/// Clinic address
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub locality: String,
    pub city: String,
    pub address_line1: String,
    pub location: String,
    pub logo_url: String,
}

/// Clinic the doctor practices at
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Clinic {
    pub name: String,
    pub address: Address,
}

/// Consultation fee as shown by the source, plus its numeric value
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Fee {
    pub raw: String,
    pub numeric: Option<f64>,
}

impl Fee {
    /// Parse a free-form fee string such as "₹ 500"
    ///
    /// Every character that is not an ASCII digit or a decimal point is
    /// stripped, then the longest leading float is read ("1.2.3" reads as 1.2).
    pub fn parse(raw: &str) -> Self {
        static RE_NOT_NUMERIC: OnceLock<Regex> = OnceLock::new();
        static RE_FLOAT_PREFIX: OnceLock<Regex> = OnceLock::new();
        let re_not_numeric = RE_NOT_NUMERIC.get_or_init(|| Regex::new(r"[^0-9.]").unwrap());
        let re_float_prefix =
            RE_FLOAT_PREFIX.get_or_init(|| Regex::new(r"^[0-9]*\.?[0-9]*").unwrap());

        let cleaned = re_not_numeric.replace_all(raw, "");
        let numeric = re_float_prefix
            .find(&cleaned)
            .and_then(|prefix| prefix.as_str().parse::<f64>().ok());

        Self {
            raw: raw.to_string(),
            numeric,
        }
    }

    /// Value used for ordering; unparsable fees count as zero
    pub fn amount(&self) -> f64 {
        self.numeric.unwrap_or(0.0)
    }
}

/// Years of experience as shown by the source, plus its numeric value
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Experience {
    pub raw: String,
    pub numeric: Option<f64>,
}

impl Experience {
    /// Parse a free-form experience string
    ///
    /// Takes the first run of ASCII digits, so "Over 10 years, 2 at this
    /// clinic" reads as 10.
    pub fn parse(raw: &str) -> Self {
        static RE_DIGITS: OnceLock<Regex> = OnceLock::new();
        let re_digits = RE_DIGITS.get_or_init(|| Regex::new(r"[0-9]+").unwrap());

        let numeric = re_digits
            .find(raw)
            .and_then(|run| run.as_str().parse::<f64>().ok());

        Self {
            raw: raw.to_string(),
            numeric,
        }
    }

    /// Value used for ordering; unparsable experience counts as zero
    pub fn years(&self) -> f64 {
        self.numeric.unwrap_or(0.0)
    }

    /// Whole years for display; fractions truncate and negatives clamp to zero
    pub fn whole_years(&self) -> u32 {
        self.years().max(0.0).min(u32::MAX as f64) as u32
    }
}

/// One practitioner's public profile
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DoctorRecord {
    pub id: String,
    pub name: String,
    pub name_initials: String,
    pub photo: String,
    pub doctor_introduction: String,
    pub specialities: Vec<Speciality>,
    pub fees: Fee,
    pub experience: Experience,
    pub languages: Vec<String>,
    pub clinic: Clinic,
    pub video_consult: bool,
    pub in_clinic: bool,
}

impl DoctorRecord {
    /// The first listed speciality, if any
    pub fn primary_speciality(&self) -> Option<&Speciality> {
        self.specialities.first()
    }
}

/// Normalize the whole endpoint payload
///
/// The payload must be a JSON array. Elements that are not objects become
/// all-default records rather than errors.
pub fn normalize_doctors(payload: &Value) -> Result<Vec<DoctorRecord>, NormalizeError> {
    match payload {
        Value::Array(items) => Ok(items.iter().map(normalize_doctor).collect()),
        other => Err(NormalizeError::NotAnArray(json_kind(other))),
    }
}

/// Normalize a single loosely-typed doctor object
pub fn normalize_doctor(item: &Value) -> DoctorRecord {
    let empty = Map::new();
    let fields = item.as_object().unwrap_or(&empty);

    DoctorRecord {
        id: text(fields, "id"),
        name: text(fields, "name"),
        name_initials: text(fields, "name_initials"),
        photo: text(fields, "photo"),
        doctor_introduction: text(fields, "doctor_introduction"),
        specialities: specialities(fields),
        fees: fee(fields),
        experience: experience(fields),
        languages: strings(fields, "languages"),
        clinic: clinic(fields),
        video_consult: flag(fields, "video_consult"),
        in_clinic: flag(fields, "in_clinic"),
    }
}

fn clinic(fields: &Map<String, Value>) -> Clinic {
    let empty = Map::new();
    let clinic = fields
        .get("clinic")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let address = clinic
        .get("address")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    Clinic {
        name: text(clinic, "name"),
        address: Address {
            locality: text(address, "locality"),
            city: text(address, "city"),
            address_line1: text(address, "address_line1"),
            location: text(address, "location"),
            logo_url: text(address, "logo_url"),
        },
    }
}

fn specialities(fields: &Map<String, Value>) -> Vec<Speciality> {
    let Some(Value::Array(entries)) = fields.get("specialities") else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| entry.get("name").and_then(Value::as_str))
        .map(|name| Speciality {
            name: name.to_string(),
        })
        .collect()
}

fn fee(fields: &Map<String, Value>) -> Fee {
    match fields.get("fees") {
        Some(Value::String(raw)) => Fee::parse(raw),
        Some(Value::Number(n)) => Fee {
            raw: n.to_string(),
            numeric: n.as_f64(),
        },
        _ => Fee::default(),
    }
}

fn experience(fields: &Map<String, Value>) -> Experience {
    match fields.get("experience") {
        Some(Value::String(raw)) => Experience::parse(raw),
        Some(Value::Number(n)) => Experience {
            raw: n.to_string(),
            numeric: n.as_f64(),
        },
        _ => Experience::default(),
    }
}

/// String field; numbers are accepted and rendered, anything else is empty
fn text(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn flag(fields: &Map<String, Value>, key: &str) -> bool {
    fields.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn strings(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
