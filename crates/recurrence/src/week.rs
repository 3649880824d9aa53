//! Weekly timetable dates.

use chrono::{Datelike, Duration, Weekday};
use keepsake_core::Date;
use serde::{Deserialize, Serialize};

/// First day of the displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekOrder {
    /// Monday through Sunday
    #[default]
    Monday,
    /// Sunday through Saturday
    Sunday,
}

impl WeekOrder {
    /// Weekdays in display order.
    pub fn days(&self) -> [Weekday; 7] {
        use Weekday::*;
        match self {
            WeekOrder::Monday => [Mon, Tue, Wed, Thu, Fri, Sat, Sun],
            WeekOrder::Sunday => [Sun, Mon, Tue, Wed, Thu, Fri, Sat],
        }
    }

    fn offset(&self, day: Weekday) -> i64 {
        match self {
            WeekOrder::Monday => i64::from(day.num_days_from_monday()),
            WeekOrder::Sunday => i64::from(day.num_days_from_sunday()),
        }
    }
}

/// One day of the timetable header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdaySlot {
    /// Which weekday
    pub weekday: Weekday,

    /// `MON`, `TUE`, ...
    pub short_name: String,

    /// Calendar date of this slot
    pub date: Date,

    /// Day of month, two digits
    pub day_label: String,

    /// Whether this slot is the reference date
    pub is_today: bool,
}

/// The date of `weekday` in the week (starting per `order`) that contains
/// `reference`. Weeks cut off by the end of the calendar give `reference`
/// for the missing days.
pub fn date_for_weekday(weekday: Weekday, reference: Date, order: WeekOrder) -> Date {
    let diff = order.offset(weekday) - order.offset(reference.weekday());
    reference
        .checked_add_signed(Duration::days(diff))
        .unwrap_or(reference)
}

/// Header slots for the week containing `reference`.
pub fn week_strip(reference: Date, order: WeekOrder) -> Vec<WeekdaySlot> {
    order
        .days()
        .into_iter()
        .map(|weekday| {
            let date = date_for_weekday(weekday, reference, order);
            WeekdaySlot {
                weekday,
                short_name: weekday.to_string().to_uppercase(),
                date,
                day_label: format!("{:02}", date.day()),
                is_today: date == reference,
            }
        })
        .collect()
}
