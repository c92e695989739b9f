use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const STATUS_CONFIRMED: &str = "Confirmed";
pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_CANCELLED: &str = "Cancelled";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A stored booking record. Every field is free-form text and may be absent;
/// dates are `YYYY-MM-DD` strings compared as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Booking {
    pub fn field(&self, field: BookingField) -> Option<&str> {
        let value = match field {
            BookingField::Id => &self.id,
            BookingField::BookingId => &self.booking_id,
            BookingField::CustomerName => &self.customer_name,
            BookingField::HotelName => &self.hotel_name,
            BookingField::Status => &self.status,
            BookingField::CheckInDate => &self.check_in_date,
            BookingField::CheckOutDate => &self.check_out_date,
            BookingField::CreatedAt => &self.created_at,
        };
        value.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    Id,
    BookingId,
    CustomerName,
    HotelName,
    Status,
    CheckInDate,
    CheckOutDate,
    CreatedAt,
}

impl BookingField {
    /// Column name in the Postgres store.
    pub fn column(self) -> &'static str {
        match self {
            BookingField::Id => "id",
            BookingField::BookingId => "booking_id",
            BookingField::CustomerName => "customer_name",
            BookingField::HotelName => "hotel_name",
            BookingField::Status => "status",
            BookingField::CheckInDate => "check_in_date",
            BookingField::CheckOutDate => "check_out_date",
            BookingField::CreatedAt => "created_at",
        }
    }
}

/// One bucket of a group-count. The hotel chart reuses this shape, so its
/// hotel name travels in `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendData {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_bookings: i64,
    pub confirmed: i64,
    pub pending: i64,
    pub cancelled: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub status_chart: Vec<StatusCount>,
    pub hotel_chart: Vec<StatusCount>,
    pub trend_chart: Vec<TrendData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_serializes_camel_case_and_skips_absent_fields() {
        let booking = Booking {
            booking_id: Some("B1234".to_string()),
            hotel_name: Some("Hotel Taj".to_string()),
            created_at: Some("2026-01-05".to_string()),
            ..Booking::default()
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "bookingId": "B1234",
                "hotelName": "Hotel Taj",
                "createdAt": "2026-01-05"
            })
        );
    }

    #[test]
    fn dashboard_default_is_all_zero() {
        let data = DashboardData::default();
        assert_eq!(data.summary.total_bookings, 0);
        assert!(data.status_chart.is_empty());
        assert!(data.hotel_chart.is_empty());
        assert!(data.trend_chart.is_empty());

        let json = serde_json::to_value(&data.summary).unwrap();
        assert_eq!(json["totalBookings"], 0);
    }

    #[test]
    fn dates_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_date(date), "2026-03-07");
    }

    #[test]
    fn field_accessor_reads_each_column() {
        let booking = Booking {
            status: Some("Pending".to_string()),
            ..Booking::default()
        };
        assert_eq!(booking.field(BookingField::Status), Some("Pending"));
        assert_eq!(booking.field(BookingField::HotelName), None);
        assert_eq!(BookingField::CheckInDate.column(), "check_in_date");
    }
}
