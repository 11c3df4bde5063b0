use chrono::{Datelike, Local, Month};

pub const FIRST_YEAR: i32 = 2023;
pub const LAST_YEAR: i32 = 2030;

/// Month and year shown in the selectors. Nothing filters on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub month: Month,
    pub year: i32,
}

impl Default for Period {
    fn default() -> Self {
        let today = Local::now().date_naive();
        let month = Month::try_from(today.month() as u8).unwrap_or(Month::January);
        Self::new(month, today.year())
    }
}

impl Period {
    pub fn new(month: Month, year: i32) -> Self {
        Self {
            month,
            year: year.clamp(FIRST_YEAR, LAST_YEAR),
        }
    }

    pub fn next_month(&mut self) {
        self.month = self.month.succ();
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.pred();
    }

    pub fn next_year(&mut self) {
        self.year = (self.year + 1).min(LAST_YEAR);
    }

    pub fn prev_year(&mut self) {
        self.year = (self.year - 1).max(FIRST_YEAR);
    }
}
