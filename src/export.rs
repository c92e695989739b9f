use std::io;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::models::Booking;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow<'a> {
    id: &'a str,
    booking_id: &'a str,
    customer_name: &'a str,
    hotel_name: &'a str,
    status: &'a str,
    check_in_date: &'a str,
    check_out_date: &'a str,
    created_at: &'a str,
}

impl<'a> From<&'a Booking> for CsvRow<'a> {
    fn from(booking: &'a Booking) -> Self {
        Self {
            id: booking.id.as_deref().unwrap_or_default(),
            booking_id: booking.booking_id.as_deref().unwrap_or_default(),
            customer_name: booking.customer_name.as_deref().unwrap_or_default(),
            hotel_name: booking.hotel_name.as_deref().unwrap_or_default(),
            status: booking.status.as_deref().unwrap_or_default(),
            check_in_date: booking.check_in_date.as_deref().unwrap_or_default(),
            check_out_date: booking.check_out_date.as_deref().unwrap_or_default(),
            created_at: booking.created_at.as_deref().unwrap_or_default(),
        }
    }
}

/// Writes bookings as CSV with a camelCase header row. Absent fields are
/// written as empty cells.
pub fn write_bookings<W: io::Write>(writer: W, bookings: &[Booking]) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for booking in bookings {
        csv.serialize(CsvRow::from(booking))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn export_to_path(path: &Path, bookings: &[Booking]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_bookings(file, bookings)
}
