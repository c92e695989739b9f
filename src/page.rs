use std::cmp::Ordering;

use crate::models::{Booking, BookingField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: BookingField,
    pub direction: Direction,
}

impl SortSpec {
    pub fn asc(field: BookingField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: BookingField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }

    /// Byte-wise text order; absent values sort before present ones.
    pub fn compare(&self, a: &Booking, b: &Booking) -> Ordering {
        let ord = a.field(self.field).cmp(&b.field(self.field));
        match self.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

/// Offset/limit window for a 1-indexed page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Page {
    /// Pages below 1 are clamped to the first page. A page size below 1
    /// selects nothing.
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(0);
        let skip = (page - 1).saturating_mul(page_size);
        Self {
            skip: usize::try_from(skip).unwrap_or(usize::MAX),
            limit: usize::try_from(page_size).unwrap_or(usize::MAX),
        }
    }

    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(date: Option<&str>) -> Booking {
        Booking {
            created_at: date.map(str::to_string),
            ..Booking::default()
        }
    }

    #[test]
    fn page_window_is_one_indexed() {
        assert_eq!(Page::new(1, 10), Page { skip: 0, limit: 10 });
        assert_eq!(Page::new(3, 25), Page { skip: 50, limit: 25 });
    }

    #[test]
    fn page_below_one_clamps_to_first_page() {
        assert_eq!(Page::new(0, 10), Page::new(1, 10));
        assert_eq!(Page::new(-4, 10), Page::new(1, 10));
    }

    #[test]
    fn non_positive_page_size_selects_nothing() {
        let page = Page::new(2, 0);
        assert_eq!(page.limit, 0);
        assert!(page.slice(vec![1, 2, 3]).is_empty());
        assert_eq!(Page::new(1, -5).limit, 0);
    }

    #[test]
    fn huge_pages_saturate() {
        let page = Page::new(i64::MAX, i64::MAX);
        assert!(page.slice(vec![1, 2, 3]).is_empty());
    }

    #[test]
    fn slice_takes_the_requested_window() {
        let items: Vec<u32> = (1..=15).collect();
        assert_eq!(Page::new(1, 10).slice(items.clone()), (1..=10).collect::<Vec<_>>());
        assert_eq!(Page::new(2, 10).slice(items), (11..=15).collect::<Vec<_>>());
    }

    #[test]
    fn sort_places_absent_values_first_when_ascending() {
        let spec = SortSpec::asc(BookingField::CreatedAt);
        let mut rows = vec![
            created(Some("2026-02-01")),
            created(None),
            created(Some("2026-01-01")),
        ];
        rows.sort_by(|a, b| spec.compare(a, b));
        let dates: Vec<_> = rows.iter().map(|b| b.created_at.as_deref()).collect();
        assert_eq!(dates, vec![None, Some("2026-01-01"), Some("2026-02-01")]);

        let spec = SortSpec::desc(BookingField::CreatedAt);
        rows.sort_by(|a, b| spec.compare(a, b));
        assert_eq!(rows[0].created_at.as_deref(), Some("2026-02-01"));
    }
}
