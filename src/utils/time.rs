use chrono::NaiveDateTime;

/// Wire format for scheduled session times; part of the bulk-input
/// compatibility surface and must not change.
pub const SCHEDULE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn parse_schedule(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), SCHEDULE_FORMAT).ok()
}
