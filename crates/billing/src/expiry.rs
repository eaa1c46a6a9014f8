//! Expiry month handling.
//!
//! New input is validated against the canonical `MM-YYYY` form. Historical
//! records may still carry the legacy `MM-YY` form, so parsing accepts both
//! (two-digit years map into the 2000s) — rejecting old data would orphan
//! every lot it describes.

use chrono::{Datelike, NaiveDate};

/// A parsed expiry month, floored to the first of the month for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExpiryDate(NaiveDate);

impl ExpiryDate {
    /// Parse `MM-YYYY` or legacy `MM-YY`. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (month_part, year_part) = raw.split_once('-')?;
        if month_part.len() != 2 || !month_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let month: u32 = month_part.parse().ok()?;

        let year: i32 = match year_part.len() {
            4 if year_part.bytes().all(|b| b.is_ascii_digit()) => year_part.parse().ok()?,
            2 if year_part.bytes().all(|b| b.is_ascii_digit()) => {
                2000 + year_part.parse::<i32>().ok()?
            }
            _ => return None,
        };

        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Whether `raw` is in the canonical `MM-YYYY` form (and a real month).
    pub fn is_canonical(raw: &str) -> bool {
        let raw = raw.trim();
        raw.len() == 7
            && matches!(raw.split_once('-'), Some((m, y))
                if m.len() == 2 && y.len() == 4)
            && Self::parse(raw).is_some()
    }

    pub fn first_of_month(&self) -> NaiveDate {
        self.0
    }
}

impl core::fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}-{}", self.0.month(), self.0.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_form() {
        let expiry = ExpiryDate::parse("05-2025").unwrap();
        assert_eq!(
            expiry.first_of_month(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
        );
    }

    #[test]
    fn parses_legacy_two_digit_year() {
        let expiry = ExpiryDate::parse("05-25").unwrap();
        assert_eq!(
            expiry.first_of_month(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in ["", "13-2025", "00-2025", "5-2025", "05/2025", "05-20251", "ab-cdef"] {
            assert!(ExpiryDate::parse(raw).is_none(), "parsed {raw:?}");
        }
    }

    #[test]
    fn canonical_check_rejects_legacy_form() {
        assert!(ExpiryDate::is_canonical("05-2025"));
        assert!(ExpiryDate::is_canonical(" 05-2025 "));
        assert!(!ExpiryDate::is_canonical("05-25"));
        assert!(!ExpiryDate::is_canonical("13-2025"));
    }

    #[test]
    fn orders_by_month_then_year() {
        let early = ExpiryDate::parse("01-2025").unwrap();
        let later = ExpiryDate::parse("12-2025").unwrap();
        let next_year = ExpiryDate::parse("01-2026").unwrap();
        assert!(early < later);
        assert!(later < next_year);
    }

    #[test]
    fn displays_in_canonical_form() {
        assert_eq!(ExpiryDate::parse("05-25").unwrap().to_string(), "05-2025");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: canonical strings survive a parse/display round trip.
            #[test]
            fn canonical_round_trips(month in 1u32..=12, year in 1000i32..=9999) {
                let raw = format!("{month:02}-{year}");
                prop_assert!(ExpiryDate::is_canonical(&raw));
                let parsed = ExpiryDate::parse(&raw).unwrap();
                prop_assert_eq!(parsed.to_string(), raw);
            }

            /// Property: legacy two-digit years mean the same month in the 2000s.
            #[test]
            fn legacy_years_map_into_the_2000s(month in 1u32..=12, year in 0i32..=99) {
                let legacy = ExpiryDate::parse(&format!("{month:02}-{year:02}")).unwrap();
                let canonical = ExpiryDate::parse(&format!("{month:02}-{}", 2000 + year)).unwrap();
                prop_assert_eq!(legacy, canonical);
            }
        }
    }
}
