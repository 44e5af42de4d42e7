//! Calendar date keys and composite record identifiers.
//!
//! Daily records are bucketed by calendar day using a canonical
//! `yyyy-MM-dd` key, independent of time-of-day. Composite identifiers
//! built from the key enforce at-most-one record per supplement per day.

use chrono::NaiveDate;

/// Canonical `yyyy-MM-dd` key for a calendar date.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Natural key for a daily record: `{supplement_id}_{yyyy-MM-dd}`.
pub fn daily_record_id(supplement_id: &str, date: NaiveDate) -> String {
    format!("{}_{}", supplement_id, date_key(date))
}

/// Natural key for a favorite: `{user_id}_{supplement_id}`.
pub fn favorite_id(user_id: &str, supplement_id: &str) -> String {
    format!("{}_{}", user_id, supplement_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn date_key_is_zero_padded() {
        assert_eq!(date_key(d(2024, 3, 7)), "2024-03-07");
        assert_eq!(date_key(d(2024, 12, 31)), "2024-12-31");
    }

    #[test]
    fn daily_record_ids_differ_per_supplement() {
        let date = d(2024, 3, 7);
        let a = daily_record_id("vitamin_c", date);
        let b = daily_record_id("vitamin_d", date);
        assert_ne!(a, b);
        assert_eq!(a, "vitamin_c_2024-03-07");
    }

    #[test]
    fn daily_record_ids_differ_per_day() {
        assert_ne!(
            daily_record_id("zinc", d(2024, 3, 7)),
            daily_record_id("zinc", d(2024, 3, 8))
        );
    }

    #[test]
    fn favorite_id_scopes_by_user() {
        assert_eq!(favorite_id("local", "magnesium"), "local_magnesium");
    }
}
