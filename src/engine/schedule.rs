use chrono::{DateTime, Timelike};
use chrono_tz::Tz;

/// Hours (Kabul time) at which an update goes out.
pub const SEND_HOURS: [u32; 8] = [7, 9, 11, 13, 15, 17, 19, 21];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDecision {
    pub should_send: bool,
    pub include_header: bool,
}

/// Exact on-the-hour match against the send slots. The greeting and
/// date header only go out on the first slot of the day.
pub fn evaluate(now: DateTime<Tz>) -> ScheduleDecision {
    let hour = now.hour();
    if now.minute() == 0 && SEND_HOURS.contains(&hour) {
        ScheduleDecision {
            should_send: true,
            include_header: hour == SEND_HOURS[0],
        }
    } else {
        ScheduleDecision {
            should_send: false,
            include_header: false,
        }
    }
}
