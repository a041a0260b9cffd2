use chrono::{NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::America::New_York;

/// ICT session windows on the New York clock, as minute offsets from midnight.
/// Windows are half-open; a start after the end wraps midnight.
const SESSIONS: &[(&str, u32, u32)] = &[
    ("asia", 20 * 60, 0),
    ("london", 2 * 60, 5 * 60),
    ("new_york_am", 7 * 60, 12 * 60),
    ("new_york_pm", 13 * 60 + 30, 16 * 60),
];

pub const OFF_SESSION: &str = "off_session";

/// Session a UTC timestamp falls into, DST-aware.
pub fn session_for(utc: NaiveDateTime) -> &'static str {
    let et = Utc.from_utc_datetime(&utc).with_timezone(&New_York);
    let minute = et.hour() * 60 + et.minute();

    for &(name, start, end) in SESSIONS {
        let inside = if start < end {
            minute >= start && minute < end
        } else {
            minute >= start || minute < end
        };
        if inside {
            return name;
        }
    }
    OFF_SESSION
}
