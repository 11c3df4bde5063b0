use std::fmt::Display;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseId(pub u32);

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub title: String,
    pub price: Decimal,
    created_at: DateTime<Local>,
}

impl Display for ExpenseRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({:.2})", self.id, self.title, self.price)
    }
}

impl ExpenseRecord {
    pub fn new(id: ExpenseId, title: String, price: Decimal) -> Self {
        Self {
            id,
            title,
            price,
            created_at: Local::now(),
        }
    }

    /// Time the record was first added. Editing never touches it.
    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}
