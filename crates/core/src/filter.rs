//! Filter state and the inclusion predicate

use serde::{Deserialize, Serialize};

use crate::doctor::DoctorRecord;

/// How the patient wants to consult
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationMode {
    #[serde(rename = "Video Consult")]
    Video,
    #[serde(rename = "In Clinic")]
    Clinic,
}

impl ConsultationMode {
    /// Label used in URLs and on badges
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationMode::Video => "Video Consult",
            ConsultationMode::Clinic => "In Clinic",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Video Consult" => Some(ConsultationMode::Video),
            "In Clinic" => Some(ConsultationMode::Clinic),
            _ => None,
        }
    }
}

/// Ordering applied to the filtered list
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Fees, low to high
    Fees,
    /// Experience, high to low
    Experience,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Fees => "fees",
            SortKey::Experience => "experience",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "fees" => Some(SortKey::Fees),
            "experience" => Some(SortKey::Experience),
            _ => None,
        }
    }
}

/// Everything the user selected for the current view
///
/// `specialties` keeps selection order for display; matching treats it as a set.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub consultation_mode: Option<ConsultationMode>,
    pub specialties: Vec<String>,
    pub sort_by: Option<SortKey>,
}

impl FilterState {
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Select a specialty, or deselect it when already selected
    pub fn toggle_specialty(&mut self, specialty: &str) {
        if let Some(pos) = self.specialties.iter().position(|s| s == specialty) {
            self.specialties.remove(pos);
        } else {
            self.specialties.push(specialty.to_string());
        }
    }

    /// Select a mode, or clear it when it is already the active one
    pub fn toggle_consultation_mode(&mut self, mode: ConsultationMode) {
        self.consultation_mode = if self.consultation_mode == Some(mode) {
            None
        } else {
            Some(mode)
        };
    }

    /// Select a sort key, or clear it when it is already the active one
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort_by = if self.sort_by == Some(key) {
            None
        } else {
            Some(key)
        };
    }

    /// Drop selected specialties that no loaded doctor has
    ///
    /// Returns the names that were removed.
    pub fn retain_known_specialties(&mut self, known: &[String]) -> Vec<String> {
        let (kept, dropped): (Vec<String>, Vec<String>) = std::mem::take(&mut self.specialties)
            .into_iter()
            .partition(|s| known.contains(s));
        self.specialties = kept;
        dropped
    }
}

/// Decide whether a doctor belongs in the filtered view
///
/// All active constraints must pass: name contains the search query
/// (case-insensitive), the consultation mode is offered, and at least one of
/// the doctor's specialities is selected.
pub fn matches(doctor: &DoctorRecord, filters: &FilterState) -> bool {
    if !filters.search_query.is_empty()
        && !doctor
            .name
            .to_lowercase()
            .contains(&filters.search_query.to_lowercase())
    {
        return false;
    }

    match filters.consultation_mode {
        Some(ConsultationMode::Video) if !doctor.video_consult => return false,
        Some(ConsultationMode::Clinic) if !doctor.in_clinic => return false,
        _ => {}
    }

    if !filters.specialties.is_empty()
        && !doctor
            .specialities
            .iter()
            .any(|speciality| filters.specialties.contains(&speciality.name))
    {
        return false;
    }

    true
}

/// Keep the doctors that match, in their original order
pub fn apply_filters<'a>(
    doctors: &'a [DoctorRecord],
    filters: &FilterState,
) -> Vec<&'a DoctorRecord> {
    doctors.iter().filter(|d| matches(d, filters)).collect()
}
