use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use super::{BookingStore, GroupCount};
use crate::error::StoreResult;
use crate::filter::{Clause, Filter};
use crate::models::{Booking, BookingField};
use crate::page::{Direction, Page, SortSpec};

const TABLE: &str = "booking_records.bookings";
const COLUMNS: &str =
    "id, booking_id, customer_name, hotel_name, status, check_in_date, check_out_date, created_at";

// Postgres caps bind parameters per statement at 65535.
const INSERT_CHUNK: usize = 1000;

/// Postgres-backed store. Text comparisons and sorts use the `C` collation so
/// dates order byte-wise.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn booking_from_row(row: &PgRow) -> Result<Booking, sqlx::Error> {
    Ok(Booking {
        id: row.try_get("id")?,
        booking_id: row.try_get("booking_id")?,
        customer_name: row.try_get("customer_name")?,
        hotel_name: row.try_get("hotel_name")?,
        status: row.try_get("status")?,
        check_in_date: row.try_get("check_in_date")?,
        check_out_date: row.try_get("check_out_date")?,
        created_at: row.try_get("created_at")?,
    })
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    for (index, clause) in filter.clauses().iter().enumerate() {
        query.push(if index == 0 { " WHERE " } else { " AND " });
        query.push(clause.field().column());
        match clause {
            Clause::Matches { pattern, .. } => {
                query.push(" ~* ").push_bind(pattern.clone());
            }
            Clause::Gte { value, .. } => {
                query.push(" COLLATE \"C\" >= ").push_bind(value.clone());
            }
            Clause::Lte { value, .. } => {
                query.push(" COLLATE \"C\" <= ").push_bind(value.clone());
            }
            Clause::Eq { value, .. } => {
                query.push(" = ").push_bind(value.clone());
            }
        }
    }
}

fn push_order(query: &mut QueryBuilder<'_, Postgres>, sort: Option<SortSpec>) {
    query.push(" ORDER BY ");
    if let Some(spec) = sort {
        query.push(spec.field.column());
        query.push(match spec.direction {
            Direction::Asc => " COLLATE \"C\" ASC NULLS FIRST, ",
            Direction::Desc => " COLLATE \"C\" DESC NULLS LAST, ",
        });
    }
    query.push("seq");
}

fn push_page(query: &mut QueryBuilder<'_, Postgres>, page: Page) {
    query
        .push(" LIMIT ")
        .push_bind(i64::try_from(page.limit).unwrap_or(i64::MAX))
        .push(" OFFSET ")
        .push_bind(i64::try_from(page.skip).unwrap_or(i64::MAX));
}

fn with_id(mut booking: Booking) -> Booking {
    if booking.id.is_none() {
        booking.id = Some(Uuid::new_v4().simple().to_string());
    }
    booking
}

#[async_trait]
impl BookingStore for PgStore {
    async fn find(
        &self,
        filter: &Filter,
        sort: Option<SortSpec>,
        page: Option<Page>,
    ) -> StoreResult<Vec<Booking>> {
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM {TABLE}"));
        push_filter(&mut query, filter);
        push_order(&mut query, sort);
        if let Some(page) = page {
            push_page(&mut query, page);
        }

        let rows = query.build().fetch_all(&self.pool).await?;
        let bookings = rows
            .iter()
            .map(booking_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bookings)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Booking>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(booking_from_row).transpose()?)
    }

    async fn insert_one(&self, booking: Booking) -> StoreResult<Booking> {
        let booking = with_id(booking);
        sqlx::query(&format!(
            "INSERT INTO {TABLE} ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
        ))
        .bind(&booking.id)
        .bind(&booking.booking_id)
        .bind(&booking.customer_name)
        .bind(&booking.hotel_name)
        .bind(&booking.status)
        .bind(&booking.check_in_date)
        .bind(&booking.check_out_date)
        .bind(&booking.created_at)
        .execute(&self.pool)
        .await?;
        Ok(booking)
    }

    async fn insert_many(&self, bookings: Vec<Booking>) -> StoreResult<usize> {
        let mut inserted = 0usize;
        let bookings: Vec<Booking> = bookings.into_iter().map(with_id).collect();

        for chunk in bookings.chunks(INSERT_CHUNK) {
            let mut query =
                QueryBuilder::<Postgres>::new(format!("INSERT INTO {TABLE} ({COLUMNS}) "));
            query.push_values(chunk, |mut row, booking| {
                row.push_bind(booking.id.clone())
                    .push_bind(booking.booking_id.clone())
                    .push_bind(booking.customer_name.clone())
                    .push_bind(booking.hotel_name.clone())
                    .push_bind(booking.status.clone())
                    .push_bind(booking.check_in_date.clone())
                    .push_bind(booking.check_out_date.clone())
                    .push_bind(booking.created_at.clone());
            });
            let result = query.build().execute(&self.pool).await?;
            inserted += usize::try_from(result.rows_affected()).unwrap_or(usize::MAX);
        }

        Ok(inserted)
    }

    async fn replace_by_id(&self, id: &str, booking: Booking) -> StoreResult<bool> {
        let result = sqlx::query(&format!(
            r#"
            UPDATE {TABLE}
            SET booking_id = $2, customer_name = $3, hotel_name = $4, status = $5,
                check_in_date = $6, check_out_date = $7, created_at = $8
            WHERE id = $1
            "#
        ))
        .bind(id)
        .bind(&booking.booking_id)
        .bind(&booking.customer_name)
        .bind(&booking.hotel_name)
        .bind(&booking.status)
        .bind(&booking.check_in_date)
        .bind(&booking.check_out_date)
        .bind(&booking.created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query(&format!("DELETE FROM {TABLE} WHERE id = $1"))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, filter: &Filter) -> StoreResult<i64> {
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {TABLE}"));
        push_filter(&mut query, filter);
        let row = query.build().fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>(0)?)
    }

    async fn group_count(&self, field: BookingField) -> StoreResult<Vec<GroupCount>> {
        let column = field.column();
        let rows = sqlx::query(&format!(
            r#"
            SELECT {column} AS key, COUNT(*) AS count
            FROM {TABLE}
            WHERE {column} IS NOT NULL
            GROUP BY {column}
            ORDER BY {column} COLLATE "C"
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            groups.push(GroupCount {
                key: row.try_get("key")?,
                count: row.try_get("count")?,
            });
        }
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter;

    #[test]
    fn filter_translates_to_where_clause() {
        let filter = filter::combined(Some("pend"), None, Some("2026-01-01"), None).unwrap();
        let mut query = QueryBuilder::<Postgres>::new("SELECT 1");
        push_filter(&mut query, &filter);
        assert_eq!(
            query.sql(),
            "SELECT 1 WHERE status ~* $1 AND created_at COLLATE \"C\" >= $2"
        );
    }

    #[test]
    fn empty_filter_adds_no_where_clause() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT 1");
        push_filter(&mut query, &Filter::all());
        assert_eq!(query.sql(), "SELECT 1");
    }

    #[test]
    fn sort_falls_back_to_insertion_order() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT 1");
        push_order(&mut query, Some(SortSpec::desc(BookingField::CreatedAt)));
        push_page(&mut query, Page::new(2, 10));
        assert_eq!(
            query.sql(),
            "SELECT 1 ORDER BY created_at COLLATE \"C\" DESC NULLS LAST, seq LIMIT $1 OFFSET $2"
        );

        let mut query = QueryBuilder::<Postgres>::new("SELECT 1");
        push_order(&mut query, None);
        assert_eq!(query.sql(), "SELECT 1 ORDER BY seq");
    }
}
