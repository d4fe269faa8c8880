//! Ordering of the filtered doctor list

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::doctor::DoctorRecord;
use crate::filter::SortKey;

/// Compare two doctors for the selected sort key
///
/// Fees sort ascending, experience descending. With no key every pair is
/// `Equal`, so a stable sort keeps the fetch order.
pub fn compare(a: &DoctorRecord, b: &DoctorRecord, sort_by: Option<SortKey>) -> Ordering {
    match sort_by {
        Some(SortKey::Fees) => a.fees.amount().total_cmp(&b.fees.amount()),
        Some(SortKey::Experience) => b.experience.years().total_cmp(&a.experience.years()),
        None => Ordering::Equal,
    }
}

/// Stable sort in place; ties keep their relative order
pub fn sort_doctors<T: Borrow<DoctorRecord>>(doctors: &mut [T], sort_by: Option<SortKey>) {
    doctors.sort_by(|a, b| {
        compare(
            Borrow::<DoctorRecord>::borrow(a),
            Borrow::<DoctorRecord>::borrow(b),
            sort_by,
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctor::{normalize_doctor, Experience, Fee};
    use serde_json::json;

    fn with_fee(id: &str, fee: &str) -> DoctorRecord {
        DoctorRecord {
            id: id.to_string(),
            fees: Fee::parse(fee),
            ..Default::default()
        }
    }

    fn with_experience(id: &str, experience: &str) -> DoctorRecord {
        DoctorRecord {
            id: id.to_string(),
            experience: Experience::parse(experience),
            ..Default::default()
        }
    }

    fn ids(doctors: &[DoctorRecord]) -> Vec<&str> {
        doctors.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_compare_fees_ascending() {
        let mut doctors = vec![with_fee("b", "₹ 1000"), with_fee("a", "₹ 500")];
        sort_doctors(&mut doctors, Some(SortKey::Fees));

        let amounts: Vec<f64> = doctors.iter().map(|d| d.fees.amount()).collect();
        assert_eq!(amounts, vec![500.0, 1000.0]);
    }

    #[test]
    fn test_compare_experience_descending_mixed_types() {
        let mut doctors = vec![
            normalize_doctor(&json!({"id": "five", "experience": "5 Years of experience"})),
            normalize_doctor(&json!({"id": "ten", "experience": 10})),
        ];
        sort_doctors(&mut doctors, Some(SortKey::Experience));

        let years: Vec<f64> = doctors.iter().map(|d| d.experience.years()).collect();
        assert_eq!(years, vec![10.0, 5.0]);
    }

    #[test]
    fn test_fractional_experience_ranks_above_whole() {
        let mut doctors = vec![
            normalize_doctor(&json!({"id": "seven", "experience": 7})),
            normalize_doctor(&json!({"id": "seven_half", "experience": 7.5})),
        ];
        sort_doctors(&mut doctors, Some(SortKey::Experience));
        assert_eq!(ids(&doctors), vec!["seven_half", "seven"]);
    }

    #[test]
    fn test_long_experience_digit_run_sorts_first() {
        let mut doctors = vec![
            with_experience("ten", "10 Years of experience"),
            with_experience("huge", "Over 99999999999 years"),
        ];
        sort_doctors(&mut doctors, Some(SortKey::Experience));
        assert_eq!(ids(&doctors), vec!["huge", "ten"]);
    }

    #[test]
    fn test_unparsable_fee_sorts_as_zero() {
        let mut doctors = vec![with_fee("paid", "₹ 200"), with_fee("free", "Free")];
        sort_doctors(&mut doctors, Some(SortKey::Fees));
        assert_eq!(ids(&doctors), vec!["free", "paid"]);
    }

    #[test]
    fn test_missing_experience_sorts_last() {
        let mut doctors = vec![
            DoctorRecord {
                id: "unknown".to_string(),
                ..Default::default()
            },
            with_experience("veteran", "22 Years of experience"),
        ];
        sort_doctors(&mut doctors, Some(SortKey::Experience));
        assert_eq!(ids(&doctors), vec!["veteran", "unknown"]);
    }

    #[test]
    fn test_no_sort_keeps_fetch_order() {
        let mut doctors = vec![
            with_fee("c", "₹ 900"),
            with_fee("a", "₹ 100"),
            with_fee("b", "₹ 500"),
        ];
        sort_doctors(&mut doctors, None);
        assert_eq!(ids(&doctors), vec!["c", "a", "b"]);
        assert_eq!(compare(&doctors[0], &doctors[1], None), Ordering::Equal);
    }

    #[test]
    fn test_ties_are_stable() {
        let mut doctors = vec![
            with_fee("first", "₹ 300"),
            with_fee("cheap", "₹ 100"),
            with_fee("second", "300"),
        ];
        sort_doctors(&mut doctors, Some(SortKey::Fees));
        assert_eq!(ids(&doctors), vec!["cheap", "first", "second"]);
    }

    #[test]
    fn test_fee_sort_non_decreasing() {
        let fees = ["₹ 700", "₹ 50", "", "Rs 1,200", "₹ 450.5", "₹ 450", "n/a"];
        let mut doctors: Vec<DoctorRecord> = fees
            .iter()
            .enumerate()
            .map(|(i, fee)| with_fee(&i.to_string(), fee))
            .collect();
        sort_doctors(&mut doctors, Some(SortKey::Fees));

        assert!(doctors
            .windows(2)
            .all(|pair| pair[0].fees.amount() <= pair[1].fees.amount()));
        assert_eq!(doctors.last().unwrap().fees.amount(), 1200.0);
    }

    #[test]
    fn test_experience_sort_non_increasing() {
        let values = ["3 years", "", "15 Years of experience", "7", "none", "15"];
        let mut doctors: Vec<DoctorRecord> = values
            .iter()
            .enumerate()
            .map(|(i, exp)| with_experience(&i.to_string(), exp))
            .collect();
        sort_doctors(&mut doctors, Some(SortKey::Experience));

        assert!(doctors
            .windows(2)
            .all(|pair| pair[0].experience.years() >= pair[1].experience.years()));
    }

    #[test]
    fn test_sort_borrowed_records() {
        let owned = vec![with_fee("b", "₹ 20"), with_fee("a", "₹ 10")];
        let mut borrowed: Vec<&DoctorRecord> = owned.iter().collect();
        sort_doctors(&mut borrowed, Some(SortKey::Fees));
        assert_eq!(borrowed[0].id, "a");
    }
}
