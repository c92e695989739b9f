use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::models::{format_date, Booking, STATUS_CANCELLED, STATUS_CONFIRMED, STATUS_PENDING};

pub const HOTELS: [&str; 4] = ["Hotel Taj", "Hotel Royal", "Hotel Grand", "Hotel Paradise"];
pub const STATUSES: [&str; 3] = [STATUS_CONFIRMED, STATUS_PENDING, STATUS_CANCELLED];
pub const NAMES: [&str; 8] = [
    "Rahul", "Amit", "Sneha", "Priya", "Arjun", "Meera", "Neha", "Rohit",
];

/// Synthetic bookings created up to 89 days before `today`. Check-in lands 1-4
/// days after creation and check-out 6-9 days after creation; both offsets
/// are drawn from the creation date independently.
pub fn generate_bookings<R: Rng>(rng: &mut R, today: NaiveDate, count: usize) -> Vec<Booking> {
    (0..count)
        .map(|_| {
            let created = today - Duration::days(rng.random_range(0..90));
            let booking_id = format!("B{}", rng.random_range(1000..9999u32));
            let customer_name = NAMES[rng.random_range(0..NAMES.len())];
            let hotel_name = HOTELS[rng.random_range(0..HOTELS.len())];
            let status = STATUSES[rng.random_range(0..STATUSES.len())];
            let check_in = created + Duration::days(rng.random_range(1..5));
            let check_out = created + Duration::days(rng.random_range(6..10));

            Booking {
                id: None,
                booking_id: Some(booking_id),
                customer_name: Some(customer_name.to_string()),
                hotel_name: Some(hotel_name.to_string()),
                status: Some(status.to_string()),
                check_in_date: Some(format_date(check_in)),
                check_out_date: Some(format_date(check_out)),
                created_at: Some(format_date(created)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse(date: &Option<String>) -> NaiveDate {
        NaiveDate::parse_from_str(date.as_deref().unwrap(), "%Y-%m-%d").unwrap()
    }

    #[test]
    fn offsets_follow_creation_date() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let bookings = generate_bookings(&mut rng, today, 200);
        assert_eq!(bookings.len(), 200);

        for booking in &bookings {
            let created = parse(&booking.created_at);
            let age = (today - created).num_days();
            assert!((0..=89).contains(&age), "created {age} days ago");

            let check_in = (parse(&booking.check_in_date) - created).num_days();
            let check_out = (parse(&booking.check_out_date) - created).num_days();
            assert!((1..=4).contains(&check_in));
            assert!((6..=9).contains(&check_out));
        }
    }

    #[test]
    fn values_come_from_fixed_pools() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for booking in generate_bookings(&mut rng, today, 100) {
            let code = booking.booking_id.unwrap();
            assert!(code.starts_with('B'));
            let number: u32 = code[1..].parse().unwrap();
            assert!((1000..9999).contains(&number));

            assert!(NAMES.contains(&booking.customer_name.unwrap().as_str()));
            assert!(HOTELS.contains(&booking.hotel_name.unwrap().as_str()));
            assert!(STATUSES.contains(&booking.status.unwrap().as_str()));
            assert!(booking.id.is_none());
        }
    }

    #[test]
    fn zero_count_yields_nothing() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_bookings(&mut rng, today, 0).is_empty());
    }
}
