//! Listing pipeline: filter, sort, and shape records into cards
//!
//! This is what the results page shows: a heading with the match count, one
//! card per matching doctor, and the query string that reproduces the view.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::doctor::DoctorRecord;
use crate::filter::{apply_filters, ConsultationMode, FilterState};
use crate::query::encode_query;
use crate::sort::sort_doctors;

/// Shown when a doctor has no photo
pub const PLACEHOLDER_PHOTO: &str = "/placeholder.svg";

/// Display data for one doctor in the results list
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DoctorCard {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub primary_specialty: Option<String>,
    pub experience_years: u32,
    pub clinic_name: Option<String>,
    pub locality: Option<String>,
    pub fees: String,
    pub badges: Vec<String>,
    pub languages: Vec<String>,
}

impl From<&DoctorRecord> for DoctorCard {
    fn from(doctor: &DoctorRecord) -> Self {
        let mut badges = Vec::new();
        if doctor.video_consult {
            badges.push(ConsultationMode::Video.as_str().to_string());
        }
        if doctor.in_clinic {
            badges.push(ConsultationMode::Clinic.as_str().to_string());
        }

        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
            photo: non_empty(&doctor.photo).unwrap_or_else(|| PLACEHOLDER_PHOTO.to_string()),
            primary_specialty: doctor.primary_speciality().map(|s| s.name.clone()),
            experience_years: doctor.experience.whole_years(),
            clinic_name: non_empty(&doctor.clinic.name),
            locality: non_empty(&doctor.clinic.address.locality),
            fees: doctor.fees.raw.clone(),
            badges,
            languages: doctor.languages.clone(),
        }
    }
}

/// Complete results page
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ListingOutput {
    pub heading: String,
    pub total: usize,
    pub doctors: Vec<DoctorCard>,
    pub filters: FilterState,
    pub query: String,
}

/// Specialty name with the number of loaded doctors that list it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SpecialtyCount {
    pub name: String,
    pub doctors: usize,
}

/// Run the filter and sort pipeline and shape the result into cards
pub fn build_listing(doctors: &[DoctorRecord], filters: &FilterState) -> ListingOutput {
    let mut matching = apply_filters(doctors, filters);
    sort_doctors(&mut matching, filters.sort_by);

    let cards: Vec<DoctorCard> = matching.into_iter().map(DoctorCard::from).collect();

    ListingOutput {
        heading: results_heading(cards.len()),
        total: cards.len(),
        doctors: cards,
        filters: filters.clone(),
        query: encode_query(filters),
    }
}

/// "1 Doctor Found" / "N Doctors Found"
pub fn results_heading(count: usize) -> String {
    if count == 1 {
        "1 Doctor Found".to_string()
    } else {
        format!("{count} Doctors Found")
    }
}

/// Every specialty name seen across the records, sorted and unique
pub fn collect_specialties(doctors: &[DoctorRecord]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(|doctor| doctor.specialities.iter())
        .map(|speciality| speciality.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Specialty catalog with how many doctors list each one
///
/// A doctor listing the same specialty twice is counted once.
pub fn specialty_counts(doctors: &[DoctorRecord]) -> Vec<SpecialtyCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for doctor in doctors {
        let names: BTreeSet<&str> = doctor
            .specialities
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        for name in names {
            *counts.entry(name).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(name, doctors)| SpecialtyCount {
            name: name.to_string(),
            doctors,
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctor::normalize_doctors;
    use crate::filter::SortKey;
    use serde_json::json;

    fn fixture_doctors() -> Vec<DoctorRecord> {
        normalize_doctors(&json!([
            {
                "id": "d1",
                "name": "Dr. Kavya Reddy",
                "photo": "https://example.com/kavya.jpg",
                "specialities": [{"name": "Dermatologist"}, {"name": "Cosmetologist"}],
                "fees": "₹ 800",
                "experience": "12 Years of experience",
                "languages": ["English", "Telugu"],
                "clinic": {
                    "name": "Skin First",
                    "address": {"locality": "Jubilee Hills", "city": "Hyderabad"}
                },
                "video_consult": true,
                "in_clinic": true
            },
            {
                "id": "d2",
                "name": "Dr. Rahul Verma",
                "specialities": [{"name": "Dentist"}],
                "fees": "₹ 300",
                "experience": 4,
                "in_clinic": true
            },
            {
                "id": "d3",
                "name": "Dr. Kiran Das",
                "specialities": null,
                "fees": "₹ 500",
                "experience": "20 Years of experience",
                "video_consult": true
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_build_listing_no_filters() {
        let listing = build_listing(&fixture_doctors(), &FilterState::default());

        assert_eq!(listing.total, 3);
        assert_eq!(listing.heading, "3 Doctors Found");
        assert_eq!(listing.query, "");
        let ids: Vec<&str> = listing.doctors.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3"]);
    }

    #[test]
    fn test_build_listing_filters_and_sorts() {
        let filters = FilterState {
            consultation_mode: Some(ConsultationMode::Video),
            sort_by: Some(SortKey::Fees),
            ..Default::default()
        };

        let listing = build_listing(&fixture_doctors(), &filters);

        let ids: Vec<&str> = listing.doctors.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["d3", "d1"]);
        assert_eq!(listing.query, "mode=Video%20Consult&sort=fees");
        assert_eq!(listing.filters, filters);
    }

    #[test]
    fn test_build_listing_experience_sort() {
        let filters = FilterState {
            sort_by: Some(SortKey::Experience),
            ..Default::default()
        };

        let listing = build_listing(&fixture_doctors(), &filters);

        let years: Vec<u32> = listing.doctors.iter().map(|c| c.experience_years).collect();
        assert_eq!(years, vec![20, 12, 4]);
    }

    #[test]
    fn test_build_listing_single_result_heading() {
        let filters = FilterState {
            specialties: vec!["Dentist".to_string()],
            ..Default::default()
        };

        let listing = build_listing(&fixture_doctors(), &filters);

        assert_eq!(listing.heading, "1 Doctor Found");
        assert_eq!(listing.doctors[0].name, "Dr. Rahul Verma");
    }

    #[test]
    fn test_build_listing_empty_source() {
        let listing = build_listing(&[], &FilterState::default());

        assert_eq!(listing.total, 0);
        assert_eq!(listing.heading, "0 Doctors Found");
        assert!(listing.doctors.is_empty());
    }

    #[test]
    fn test_doctor_card_full() {
        let doctors = fixture_doctors();
        let card = DoctorCard::from(&doctors[0]);

        assert_eq!(card.primary_specialty.as_deref(), Some("Dermatologist"));
        assert_eq!(card.experience_years, 12);
        assert_eq!(card.clinic_name.as_deref(), Some("Skin First"));
        assert_eq!(card.locality.as_deref(), Some("Jubilee Hills"));
        assert_eq!(card.fees, "₹ 800");
        assert_eq!(card.badges, vec!["Video Consult", "In Clinic"]);
        assert_eq!(card.languages, vec!["English", "Telugu"]);
        assert_eq!(card.photo, "https://example.com/kavya.jpg");
    }

    #[test]
    fn test_doctor_card_defaults() {
        let doctors = fixture_doctors();
        let card = DoctorCard::from(&doctors[2]);

        assert_eq!(card.primary_specialty, None);
        assert_eq!(card.clinic_name, None);
        assert_eq!(card.locality, None);
        assert_eq!(card.photo, PLACEHOLDER_PHOTO);
        assert_eq!(card.badges, vec!["Video Consult"]);
        assert!(card.languages.is_empty());
    }

    #[test]
    fn test_collect_specialties_sorted_unique() {
        let mut doctors = fixture_doctors();
        doctors.push(doctors[1].clone());

        assert_eq!(
            collect_specialties(&doctors),
            vec!["Cosmetologist", "Dentist", "Dermatologist"]
        );
    }

    #[test]
    fn test_specialty_counts() {
        let mut doctors = fixture_doctors();
        doctors.push(doctors[1].clone());

        let counts = specialty_counts(&doctors);

        assert_eq!(counts.len(), 3);
        assert_eq!(
            counts[1],
            SpecialtyCount {
                name: "Dentist".to_string(),
                doctors: 2,
            }
        );
    }

    #[test]
    fn test_results_heading() {
        assert_eq!(results_heading(0), "0 Doctors Found");
        assert_eq!(results_heading(1), "1 Doctor Found");
        assert_eq!(results_heading(42), "42 Doctors Found");
    }
}
