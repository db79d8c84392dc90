use chrono::{Datelike, NaiveDate};

/// Age in whole years on `today`
///
/// One year is subtracted while this year's birthday is still ahead. Someone
/// born on Feb 29 turns a year older on Mar 1 in non-leap years.
pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}
