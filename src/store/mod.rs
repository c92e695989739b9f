//! Storage boundary consumed by the query engine.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::filter::Filter;
use crate::models::{Booking, BookingField};
use crate::page::{Page, SortSpec};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// One group of a group-count aggregation. `key` is `None` when the store
/// reports a null group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub key: Option<String>,
    pub count: i64,
}

/// Find/insert/replace/delete/aggregate primitives over the booking
/// collection. Implementations must be safe to share across concurrent
/// requests; single-record writes are expected to be atomic.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Matching records, optionally sorted and windowed. Without a sort the
    /// store's native order is used.
    async fn find(
        &self,
        filter: &Filter,
        sort: Option<SortSpec>,
        page: Option<Page>,
    ) -> StoreResult<Vec<Booking>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Booking>>;

    /// Stores the record, assigning an id when it has none, and returns it.
    async fn insert_one(&self, booking: Booking) -> StoreResult<Booking>;

    async fn insert_many(&self, bookings: Vec<Booking>) -> StoreResult<usize>;

    /// Replaces every field of the record with `id`. Returns `false` when no
    /// record matched.
    async fn replace_by_id(&self, id: &str, booking: Booking) -> StoreResult<bool>;

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool>;

    async fn count(&self, filter: &Filter) -> StoreResult<i64>;

    /// Counts records per distinct value of `field`, skipping records where
    /// the field is absent, ordered ascending by value.
    async fn group_count(&self, field: BookingField) -> StoreResult<Vec<GroupCount>>;

    async fn find_all(&self) -> StoreResult<Vec<Booking>> {
        self.find(&Filter::all(), None, None).await
    }
}
