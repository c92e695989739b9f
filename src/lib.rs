//! Booking records: a query and aggregation engine over a booking collection.
//!
//! [`engine::QueryEngine`] turns optional, user-supplied parameters into
//! filtered, sorted and paginated booking lists, and computes the dashboard
//! analytics. Storage is injected through [`store::BookingStore`]; a Postgres
//! adapter and an in-memory adapter are provided.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod filter;
pub mod generator;
pub mod models;
pub mod page;
pub mod report;
pub mod store;

pub use engine::QueryEngine;
pub use error::{StoreError, StoreResult};
pub use models::{Booking, DashboardData, DashboardSummary, StatusCount, TrendData};
pub use store::{BookingStore, MemoryStore, PgStore};
