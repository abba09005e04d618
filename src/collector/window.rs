use chrono::{Duration, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date range sent to a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` days leading up to and including `end`.
    pub fn trailing(end: NaiveDate, days: i64) -> Self {
        Self::new(end - Duration::days(days), end)
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// Splits the window into pieces spanning at most `chunk_days` days.
    /// Each piece starts the day after the previous one ends.
    pub fn chunks(&self, chunk_days: i64) -> Vec<DateWindow> {
        let step = Duration::days(chunk_days.max(1));
        let mut chunks = Vec::new();
        let mut current = self.start;
        while current < self.end {
            let chunk_end = (current + step).min(self.end);
            chunks.push(DateWindow::new(current, chunk_end));
            current = chunk_end + Duration::days(1);
        }
        chunks
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start_param(), self.end_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn chunks_advance_past_previous_end() {
        let window = DateWindow::new(day(2025, 1, 1), day(2025, 1, 20));
        let chunks = window.chunks(7);
        assert_eq!(
            chunks,
            vec![
                DateWindow::new(day(2025, 1, 1), day(2025, 1, 8)),
                DateWindow::new(day(2025, 1, 9), day(2025, 1, 16)),
                DateWindow::new(day(2025, 1, 17), day(2025, 1, 20)),
            ]
        );
    }

    #[test]
    fn empty_window_has_no_chunks() {
        let window = DateWindow::new(day(2025, 3, 1), day(2025, 3, 1));
        assert!(window.chunks(7).is_empty());
    }

    #[test]
    fn trailing_window_formats_dates() {
        let window = DateWindow::trailing(day(2025, 10, 4), 150);
        assert_eq!(window.start_param(), "2025-05-07");
        assert_eq!(window.end_param(), "2025-10-04");
        assert_eq!(window.chunks(7).len(), 19);
    }
}
