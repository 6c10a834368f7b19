use jiff::civil::Date;

/// Source of "today" for the header date fallback.
///
/// The paper header falls back to the render-time current date when the
/// configured date text is empty, which makes rendering wall-clock dependent.
/// Callers inject a clock so that tests stay deterministic.
pub trait Clock {
    fn today(&self) -> Date;
}

/// Wall-clock implementation used by production callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        jiff::Zoned::now().date()
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format a date as `Month D, YYYY` (e.g. `September 3, 2025`), the fixed
/// institutional header format.
pub fn format_long_date(date: Date) -> String {
    format!(
        "{} {}, {}",
        MONTH_NAMES[date.month() as usize - 1],
        date.day(),
        date.year()
    )
}
