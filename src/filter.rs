//! Turns optional, user-supplied query parameters into booking predicates.
//!
//! A [`Filter`] is a conjunction of [`Clause`]s. An empty filter matches every
//! record. Text clauses are case-insensitive regular expressions matched
//! anywhere in the field; date clauses compare `YYYY-MM-DD` strings
//! byte-wise, which orders zero-padded dates correctly.

use regex::{Regex, RegexBuilder};

use crate::error::{StoreError, StoreResult};
use crate::models::{Booking, BookingField};

#[derive(Debug, Clone)]
pub enum Clause {
    Matches {
        field: BookingField,
        pattern: String,
        regex: Regex,
    },
    Gte {
        field: BookingField,
        value: String,
    },
    Lte {
        field: BookingField,
        value: String,
    },
    Eq {
        field: BookingField,
        value: String,
    },
}

impl Clause {
    pub fn matches_pattern(field: BookingField, pattern: &str) -> StoreResult<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| StoreError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Clause::Matches {
            field,
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn field(&self) -> BookingField {
        match self {
            Clause::Matches { field, .. }
            | Clause::Gte { field, .. }
            | Clause::Lte { field, .. }
            | Clause::Eq { field, .. } => *field,
        }
    }

    /// A clause on an absent field never matches.
    pub fn matches(&self, booking: &Booking) -> bool {
        let Some(actual) = booking.field(self.field()) else {
            return false;
        };
        match self {
            Clause::Matches { regex, .. } => regex.is_match(actual),
            Clause::Gte { value, .. } => actual >= value.as_str(),
            Clause::Lte { value, .. } => actual <= value.as_str(),
            Clause::Eq { value, .. } => actual == value,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    /// The empty conjunction; matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.clauses.iter().all(|clause| clause.matches(booking))
    }
}

/// Drops null, empty, and whitespace-only values.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Status containment filter. `None` on blank input: callers return an empty
/// result rather than the unfiltered set.
pub fn by_status(status: Option<&str>) -> StoreResult<Option<Filter>> {
    single_text(BookingField::Status, status)
}

/// Hotel-name containment filter, with the same blank handling as [`by_status`].
pub fn by_hotel(hotel: Option<&str>) -> StoreResult<Option<Filter>> {
    single_text(BookingField::HotelName, hotel)
}

fn single_text(field: BookingField, value: Option<&str>) -> StoreResult<Option<Filter>> {
    match non_blank(value) {
        Some(pattern) => Ok(Some(Filter::all().and(Clause::matches_pattern(field, pattern)?))),
        None => Ok(None),
    }
}

/// Inclusive `createdAt` bounds. Only null or empty bounds are dropped; a
/// whitespace bound is kept as literal text.
pub fn date_range(from: Option<&str>, to: Option<&str>) -> Filter {
    let mut filter = Filter::all();
    if let Some(from) = non_empty(from) {
        filter = filter.and(Clause::Gte {
            field: BookingField::CreatedAt,
            value: from.to_string(),
        });
    }
    if let Some(to) = non_empty(to) {
        filter = filter.and(Clause::Lte {
            field: BookingField::CreatedAt,
            value: to.to_string(),
        });
    }
    filter
}

/// Exact `createdAt` day. `None` on null or empty input.
pub fn particular_day(date: Option<&str>) -> Option<Filter> {
    non_empty(date).map(|day| {
        Filter::all().and(Clause::Eq {
            field: BookingField::CreatedAt,
            value: day.to_string(),
        })
    })
}

/// Check-ins on or after `today`.
pub fn upcoming(today: &str) -> Filter {
    Filter::all().and(Clause::Gte {
        field: BookingField::CheckInDate,
        value: today.to_string(),
    })
}

/// AND of every non-blank parameter; blank parameters are omitted.
pub fn combined(
    status: Option<&str>,
    hotel: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> StoreResult<Filter> {
    let mut filter = Filter::all();
    if let Some(status) = non_blank(status) {
        filter = filter.and(Clause::matches_pattern(BookingField::Status, status)?);
    }
    if let Some(hotel) = non_blank(hotel) {
        filter = filter.and(Clause::matches_pattern(BookingField::HotelName, hotel)?);
    }
    if let Some(from) = non_blank(from) {
        filter = filter.and(Clause::Gte {
            field: BookingField::CreatedAt,
            value: from.to_string(),
        });
    }
    if let Some(to) = non_blank(to) {
        filter = filter.and(Clause::Lte {
            field: BookingField::CreatedAt,
            value: to.to_string(),
        });
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: &str, hotel: &str, created_at: &str) -> Booking {
        Booking {
            status: Some(status.to_string()),
            hotel_name: Some(hotel.to_string()),
            created_at: Some(created_at.to_string()),
            ..Booking::default()
        }
    }

    #[test]
    fn blank_single_field_filters_short_circuit() {
        for input in [None, Some(""), Some("   "), Some("\t\n")] {
            assert!(by_status(input).unwrap().is_none());
            assert!(by_hotel(input).unwrap().is_none());
        }
    }

    #[test]
    fn text_filters_are_case_insensitive_containment() {
        let filter = by_hotel(Some("rOyA")).unwrap().unwrap();
        assert!(filter.matches(&booking("Pending", "Hotel Royal", "2026-01-01")));
        assert!(!filter.matches(&booking("Pending", "Hotel Taj", "2026-01-01")));

        let filter = by_status(Some("confirm")).unwrap().unwrap();
        assert!(filter.matches(&booking("Confirmed", "Hotel Taj", "2026-01-01")));
    }

    #[test]
    fn text_filter_skips_records_missing_the_field() {
        let filter = by_status(Some("Pending")).unwrap().unwrap();
        assert!(!filter.matches(&Booking::default()));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = by_status(Some("(")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPattern { .. }));
        assert!(combined(None, Some("[a-"), None, None).is_err());
    }

    #[test]
    fn date_range_bounds_are_inclusive_and_independent() {
        let both = date_range(Some("2026-01-02"), Some("2026-01-04"));
        assert!(!both.matches(&booking("Pending", "Hotel Taj", "2026-01-01")));
        assert!(both.matches(&booking("Pending", "Hotel Taj", "2026-01-02")));
        assert!(both.matches(&booking("Pending", "Hotel Taj", "2026-01-04")));
        assert!(!both.matches(&booking("Pending", "Hotel Taj", "2026-01-05")));

        let lower = date_range(Some("2026-01-02"), None);
        assert_eq!(lower.clauses().len(), 1);
        assert!(lower.matches(&booking("Pending", "Hotel Taj", "2030-12-31")));

        assert!(date_range(None, Some("")).is_empty());
    }

    #[test]
    fn date_range_keeps_whitespace_bounds_literally() {
        assert_eq!(date_range(Some(" "), None).clauses().len(), 1);
        assert!(combined(None, None, Some(" "), None).unwrap().is_empty());
    }

    #[test]
    fn particular_day_needs_exact_date() {
        assert!(particular_day(None).is_none());
        assert!(particular_day(Some("")).is_none());

        let filter = particular_day(Some("2026-03-01")).unwrap();
        assert!(filter.matches(&booking("Pending", "Hotel Taj", "2026-03-01")));
        assert!(!filter.matches(&booking("Pending", "Hotel Taj", "2026-03-011")));
    }

    #[test]
    fn combined_omits_blank_parameters() {
        assert!(combined(None, Some(" "), Some(""), None).unwrap().is_empty());

        let filter = combined(Some("pend"), Some("grand"), Some("2026-01-01"), Some("2026-01-31"))
            .unwrap();
        assert_eq!(filter.clauses().len(), 4);
        assert!(filter.matches(&booking("Pending", "Hotel Grand", "2026-01-15")));
        assert!(!filter.matches(&booking("Confirmed", "Hotel Grand", "2026-01-15")));
        assert!(!filter.matches(&booking("Pending", "Hotel Grand", "2026-02-01")));
    }

    #[test]
    fn upcoming_includes_today() {
        let filter = upcoming("2026-05-10");
        let mut record = Booking::default();
        record.check_in_date = Some("2026-05-10".to_string());
        assert!(filter.matches(&record));
        record.check_in_date = Some("2026-05-09".to_string());
        assert!(!filter.matches(&record));
    }
}
