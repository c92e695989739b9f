//! The query engine: CRUD, filters, analytics and record generation over an
//! injected [`BookingStore`].
//!
//! CRUD and filter operations propagate storage errors. Analytics operations
//! never fail: a storage error is logged and replaced by an empty chart or an
//! all-zero summary so dashboards stay available.

use chrono::{Local, NaiveDate};

use crate::error::StoreResult;
use crate::filter::{self, Clause, Filter};
use crate::generator;
use crate::models::{
    format_date, Booking, BookingField, DashboardData, DashboardSummary, StatusCount, TrendData,
    STATUS_CANCELLED, STATUS_CONFIRMED, STATUS_PENDING,
};
use crate::page::{Page, SortSpec};
use crate::store::BookingStore;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct QueryEngine<S> {
    store: S,
    today: fn() -> NaiveDate,
}

impl<S: BookingStore> QueryEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            today: local_today,
        }
    }

    /// Replaces the clock used for `createdAt` stamps, upcoming check-ins and
    /// generated records.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn today(&self) -> NaiveDate {
        (self.today)()
    }

    pub async fn get_all(&self) -> StoreResult<Vec<Booking>> {
        self.store.find_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Booking>> {
        self.store.find_by_id(id).await
    }

    /// Stores a new booking. The store assigns the id and `createdAt` is set
    /// to today; client values for either are discarded.
    pub async fn create(&self, mut booking: Booking) -> StoreResult<Booking> {
        booking.id = None;
        booking.created_at = Some(format_date(self.today()));
        let stored = self.store.insert_one(booking).await?;
        log::debug!("created booking {:?}", stored.id);
        Ok(stored)
    }

    /// Replaces every client field of booking `id`. The id and the stored
    /// `createdAt` are kept. Returns `false` when no booking has that id.
    pub async fn update(&self, id: &str, mut booking: Booking) -> StoreResult<bool> {
        let Some(existing) = self.store.find_by_id(id).await? else {
            return Ok(false);
        };
        booking.id = Some(id.to_string());
        booking.created_at = existing.created_at;
        let replaced = self.store.replace_by_id(id, booking).await?;
        log::debug!("replaced booking {id}: {replaced}");
        Ok(replaced)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let deleted = self.store.delete_by_id(id).await?;
        log::debug!("deleted booking {id}: {deleted}");
        Ok(deleted)
    }

    /// Blank input returns no bookings rather than all of them.
    pub async fn by_status(&self, status: Option<&str>) -> StoreResult<Vec<Booking>> {
        match filter::by_status(status)? {
            Some(filter) => self.store.find(&filter, None, None).await,
            None => Ok(Vec::new()),
        }
    }

    /// Blank input returns no bookings rather than all of them.
    pub async fn by_hotel(&self, hotel: Option<&str>) -> StoreResult<Vec<Booking>> {
        match filter::by_hotel(hotel)? {
            Some(filter) => self.store.find(&filter, None, None).await,
            None => Ok(Vec::new()),
        }
    }

    /// Bookings created within the inclusive bounds, oldest first.
    pub async fn by_date_range(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> StoreResult<Vec<Booking>> {
        let filter = filter::date_range(from, to);
        let sort = SortSpec::asc(BookingField::CreatedAt);
        self.store.find(&filter, Some(sort), None).await
    }

    pub async fn by_day(&self, date: Option<&str>) -> StoreResult<Vec<Booking>> {
        match filter::particular_day(date) {
            Some(filter) => self.store.find(&filter, None, None).await,
            None => Ok(Vec::new()),
        }
    }

    /// Bookings checking in today or later, soonest first.
    pub async fn upcoming_check_ins(&self) -> StoreResult<Vec<Booking>> {
        let filter = filter::upcoming(&format_date(self.today()));
        let sort = SortSpec::asc(BookingField::CheckInDate);
        self.store.find(&filter, Some(sort), None).await
    }

    pub async fn paginated(&self, page: i64, page_size: i64) -> StoreResult<Vec<Booking>> {
        let page = Page::new(page, page_size);
        self.store.find(&Filter::all(), None, Some(page)).await
    }

    /// AND of every non-blank parameter, newest first.
    pub async fn combined(
        &self,
        status: Option<&str>,
        hotel: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> StoreResult<Vec<Booking>> {
        let filter = filter::combined(status, hotel, from, to)?;
        let sort = SortSpec::desc(BookingField::CreatedAt);
        self.store.find(&filter, Some(sort), None).await
    }

    async fn group(&self, field: BookingField) -> StoreResult<Vec<(String, i64)>> {
        let groups = self.store.group_count(field).await?;
        Ok(groups
            .into_iter()
            .filter_map(|group| group.key.map(|key| (key, group.count)))
            .collect())
    }

    pub async fn status_count(&self) -> Vec<StatusCount> {
        match self.group(BookingField::Status).await {
            Ok(groups) => groups
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
            Err(err) => {
                log::warn!("status count unavailable, returning empty chart: {err}");
                Vec::new()
            }
        }
    }

    pub async fn hotel_count(&self) -> Vec<StatusCount> {
        match self.group(BookingField::HotelName).await {
            Ok(groups) => groups
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
            Err(err) => {
                log::warn!("hotel count unavailable, returning empty chart: {err}");
                Vec::new()
            }
        }
    }

    /// Bookings per `createdAt` day, ascending by date.
    pub async fn trend(&self) -> Vec<TrendData> {
        match self.group(BookingField::CreatedAt).await {
            Ok(groups) => {
                let mut trend: Vec<TrendData> = groups
                    .into_iter()
                    .map(|(date, count)| TrendData { date, count })
                    .collect();
                trend.sort_by(|a, b| a.date.cmp(&b.date));
                trend
            }
            Err(err) => {
                log::warn!("booking trend unavailable, returning empty chart: {err}");
                Vec::new()
            }
        }
    }

    async fn count_status(&self, status: &str) -> StoreResult<i64> {
        let filter = Filter::all().and(Clause::Eq {
            field: BookingField::Status,
            value: status.to_string(),
        });
        self.store.count(&filter).await
    }

    pub async fn dashboard_summary(&self) -> DashboardSummary {
        let all = Filter::all();
        let counts = tokio::try_join!(
            self.store.count(&all),
            self.count_status(STATUS_CONFIRMED),
            self.count_status(STATUS_PENDING),
            self.count_status(STATUS_CANCELLED),
        );

        match counts {
            Ok((total_bookings, confirmed, pending, cancelled)) => DashboardSummary {
                total_bookings,
                confirmed,
                pending,
                cancelled,
            },
            Err(err) => {
                log::warn!("dashboard summary unavailable, returning zeros: {err}");
                DashboardSummary::default()
            }
        }
    }

    /// Summary plus the three charts, recomputed on every call. Each part
    /// already falls back to its own default, so the composite cannot fail.
    pub async fn dashboard_data(&self) -> DashboardData {
        let (summary, status_chart, hotel_chart, trend_chart) = tokio::join!(
            self.dashboard_summary(),
            self.status_count(),
            self.hotel_count(),
            self.trend(),
        );

        DashboardData {
            summary,
            status_chart,
            hotel_chart,
            trend_chart,
        }
    }

    /// Inserts `count` synthetic bookings in one batch. Nothing is inserted
    /// when `count` is not positive.
    pub async fn generate_random(&self, count: i64) -> StoreResult<usize> {
        let Ok(count) = usize::try_from(count) else {
            return Ok(0);
        };
        if count == 0 {
            return Ok(0);
        }

        let bookings = generator::generate_bookings(&mut rand::rng(), self.today(), count);
        let inserted = self.store.insert_many(bookings).await?;
        log::info!("inserted {inserted} random bookings");
        Ok(inserted)
    }
}
