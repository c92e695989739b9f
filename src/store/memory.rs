use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{BookingStore, GroupCount};
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::models::{Booking, BookingField};
use crate::page::{Page, SortSpec};

/// In-process store kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Booking>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn check(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }

    fn assign_id(mut booking: Booking) -> Booking {
        if booking.id.is_none() {
            booking.id = Some(Uuid::new_v4().simple().to_string());
        }
        booking
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find(
        &self,
        filter: &Filter,
        sort: Option<SortSpec>,
        page: Option<Page>,
    ) -> StoreResult<Vec<Booking>> {
        self.check()?;
        let mut found: Vec<Booking> = self
            .rows
            .read()
            .iter()
            .filter(|booking| filter.matches(booking))
            .cloned()
            .collect();

        if let Some(spec) = sort {
            // stable, so ties keep insertion order
            found.sort_by(|a, b| spec.compare(a, b));
        }

        Ok(match page {
            Some(page) => page.slice(found),
            None => found,
        })
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Booking>> {
        self.check()?;
        Ok(self
            .rows
            .read()
            .iter()
            .find(|booking| booking.id.as_deref() == Some(id))
            .cloned())
    }

    async fn insert_one(&self, booking: Booking) -> StoreResult<Booking> {
        self.check()?;
        let booking = Self::assign_id(booking);
        self.rows.write().push(booking.clone());
        Ok(booking)
    }

    async fn insert_many(&self, bookings: Vec<Booking>) -> StoreResult<usize> {
        self.check()?;
        let inserted = bookings.len();
        let mut rows = self.rows.write();
        rows.extend(bookings.into_iter().map(Self::assign_id));
        Ok(inserted)
    }

    async fn replace_by_id(&self, id: &str, mut booking: Booking) -> StoreResult<bool> {
        self.check()?;
        let mut rows = self.rows.write();
        match rows.iter_mut().find(|row| row.id.as_deref() == Some(id)) {
            Some(row) => {
                booking.id = Some(id.to_string());
                *row = booking;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        self.check()?;
        let mut rows = self.rows.write();
        match rows.iter().position(|row| row.id.as_deref() == Some(id)) {
            Some(index) => {
                rows.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self, filter: &Filter) -> StoreResult<i64> {
        self.check()?;
        let matched = self.rows.read().iter().filter(|b| filter.matches(b)).count();
        Ok(i64::try_from(matched).unwrap_or(i64::MAX))
    }

    async fn group_count(&self, field: BookingField) -> StoreResult<Vec<GroupCount>> {
        self.check()?;
        let mut groups: BTreeMap<String, i64> = BTreeMap::new();
        for booking in self.rows.read().iter() {
            if let Some(value) = booking.field(field) {
                *groups.entry(value.to_string()).or_insert(0) += 1;
            }
        }

        Ok(groups
            .into_iter()
            .map(|(key, count)| GroupCount {
                key: Some(key),
                count,
            })
            .collect())
    }
}
