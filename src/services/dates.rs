//! Date helpers for the date picker and headers.
//!
//! Dates are shown in Brazilian Portuguese, matching the service's locale.

use chrono::{Datelike, Duration, Locale, Months, NaiveDate};

/// Long date, e.g. "25 de dezembro de 2024".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format_localized("%-d de %B de %Y", Locale::pt_BR).to_string()
}

/// Month heading for the calendar, e.g. "dezembro de 2024".
pub fn format_month_title(date: NaiveDate) -> String {
    date.format_localized("%B de %Y", Locale::pt_BR).to_string()
}

/// Move a date by whole days, saturating at the calendar bounds.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

/// Move a date by whole months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let delta = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    };
    shifted.unwrap_or(date)
}

/// Weeks of the month containing `date`, Sunday first. Cells outside the
/// month are `None`.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = date.with_day(1) else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = lead;
    let mut day = Some(first);

    while let Some(current) = day.filter(|d| d.month() == first.month()) {
        week[slot] = Some(current);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
        day = current.succ_opt();
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}
