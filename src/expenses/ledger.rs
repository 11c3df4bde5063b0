use std::fmt::Display;
use std::iter::once;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::errors::LedgerError;
use crate::parse::parse_price;

use super::record::{ExpenseId, ExpenseRecord};

/// Whether the primary control adds a new record or updates the one being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Editing(ExpenseId),
}

/// Transient message for the user, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    InvalidPrice,
    PriceOutOfRange,
    Deleted { title: String },
    Error(String),
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::InvalidPrice => write!(f, "Please enter a valid price."),
            Notice::PriceOutOfRange => write!(f, "That price is too large for the total."),
            Notice::Deleted { title } => write!(f, "Item \"{title}\" has been deleted."),
            Notice::Error(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<LedgerError> for Notice {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidPrice(_) => Notice::InvalidPrice,
            LedgerError::PriceOutOfRange(_) => Notice::PriceOutOfRange,
            other => Notice::Error(other.to_string()),
        }
    }
}

/// One row of the rendered list.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    pub record: &'a ExpenseRecord,
    pub is_editing: bool,
}

/// The expense records of one session together with their total and the
/// staging fields of the add/update form.
///
/// `total` is recomputed from all records after every mutation, and at most
/// one record is in edit mode at a time.
#[derive(Debug)]
pub struct ExpenseLedger {
    records: Vec<ExpenseRecord>,
    total: Decimal,
    editing: Option<ExpenseId>,
    draft_title: String,
    draft_price: String,
    next_id: u32,
    decimal_sep: char,
}

impl Default for ExpenseLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::with_decimal_separator('.')
    }

    pub fn with_decimal_separator(decimal_sep: char) -> Self {
        Self {
            records: Vec::new(),
            total: Decimal::ZERO,
            editing: None,
            draft_title: String::new(),
            draft_price: String::new(),
            next_id: 1,
            decimal_sep,
        }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    #[cfg(test)]
    pub fn editing_id(&self) -> Option<ExpenseId> {
        self.editing
    }

    pub fn mode(&self) -> Mode {
        match self.editing {
            Some(id) => Mode::Editing(id),
            None => Mode::Idle,
        }
    }

    pub fn draft_title(&self) -> &str {
        &self.draft_title
    }

    pub fn draft_price(&self) -> &str {
        &self.draft_price
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft_title = title.into();
    }

    pub fn set_draft_price(&mut self, price: impl Into<String>) {
        self.draft_price = price.into();
    }

    pub fn get(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn is_editing(&self, id: ExpenseId) -> bool {
        self.editing == Some(id)
    }

    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> + '_ {
        self.records.iter().map(|record| RowView {
            record,
            is_editing: self.is_editing(record.id),
        })
    }

    /// The primary control is disabled while either draft field is empty.
    pub fn can_submit(&self) -> bool {
        !self.draft_title.is_empty() && !self.draft_price.is_empty()
    }

    /// Appends a new record and clears the drafts.
    ///
    /// Returns `Ok(None)` without touching the ledger when either input is
    /// empty.
    pub fn add(
        &mut self,
        title: &str,
        price_text: &str,
    ) -> Result<Option<ExpenseId>, LedgerError> {
        if title.is_empty() || price_text.is_empty() {
            debug!("add ignored, empty input");
            return Ok(None);
        }
        let price = parse_price(price_text, self.decimal_sep).inspect_err(|_| {
            warn!(price = price_text, "rejected price on add");
        })?;

        let prices = self.records.iter().map(|record| record.price);
        let total = checked_total(prices.chain(once(price))).ok_or_else(|| {
            warn!(price = price_text, "rejected price on add, total out of range");
            LedgerError::PriceOutOfRange(price_text.to_string())
        })?;

        let id = ExpenseId(self.next_id);
        self.next_id += 1;
        self.records.push(ExpenseRecord::new(id, title.to_string(), price));
        self.total = total;
        self.clear_drafts();
        info!(%id, title, %price, total = %self.total, "expense added");
        Ok(Some(id))
    }

    /// Switches edit mode to `id` and stages its values in the drafts.
    ///
    /// Any unsaved drafts of a previous edit are dropped.
    pub fn begin_edit(&mut self, id: ExpenseId) -> bool {
        let Some(record) = self.get(id) else {
            debug!(%id, "begin_edit ignored, unknown id");
            return false;
        };
        let (title, price) = (record.title.clone(), self.price_draft(record.price));
        self.draft_title = title;
        self.draft_price = price;
        if let Some(previous) = self.editing.replace(id) {
            if previous != id {
                debug!(%previous, %id, "switched edit target");
            }
        }
        debug!(%id, "edit mode entered");
        true
    }

    /// Writes the drafts into record `id` and returns to idle.
    ///
    /// Only the record in edit mode can be committed. A price that does not
    /// parse aborts the commit and keeps edit mode active, so the user can
    /// correct the draft.
    pub fn commit_edit(&mut self, id: ExpenseId) -> Result<bool, LedgerError> {
        if self.editing != Some(id) {
            debug!(%id, "commit_edit ignored, record not in edit mode");
            return Ok(false);
        }
        let Some(index) = self.position(id) else {
            debug!(%id, "commit_edit ignored, unknown id");
            return Ok(false);
        };
        if !self.can_submit() {
            debug!(%id, "commit_edit ignored, empty draft");
            return Ok(false);
        }
        let price = parse_price(&self.draft_price, self.decimal_sep).inspect_err(|_| {
            warn!(%id, price = %self.draft_price, "rejected price on commit");
        })?;
        let prices = self.records.iter().enumerate().map(|(i, record)| {
            if i == index {
                price
            } else {
                record.price
            }
        });
        let total = checked_total(prices).ok_or_else(|| {
            warn!(
                %id,
                price = %self.draft_price,
                "rejected price on commit, total out of range"
            );
            LedgerError::PriceOutOfRange(self.draft_price.clone())
        })?;

        let record = &mut self.records[index];
        record.title = std::mem::take(&mut self.draft_title);
        record.price = price;
        self.total = total;
        self.editing = None;
        self.clear_drafts();
        info!(%id, %price, total = %self.total, "expense updated");
        Ok(true)
    }

    /// Removes record `id`.
    ///
    /// Deleting the record that is being edited also leaves edit mode.
    pub fn delete(&mut self, id: ExpenseId) -> Option<Notice> {
        let Some(index) = self.position(id) else {
            debug!(%id, "delete ignored, unknown id");
            return None;
        };
        let removed = self.records.remove(index);
        // prices are non-negative, so what remains always fits
        self.total = self
            .records
            .iter()
            .fold(Decimal::ZERO, |sum, record| sum.saturating_add(record.price));
        if self.editing == Some(id) {
            self.editing = None;
            self.clear_drafts();
            debug!(%id, "edited record deleted, edit mode left");
        }
        info!(%id, title = %removed.title, total = %self.total, "expense deleted");
        Some(Notice::Deleted {
            title: removed.title,
        })
    }

    /// Presses the primary control: adds in idle mode, commits in edit mode.
    pub fn submit(&mut self) -> Result<(), LedgerError> {
        if !self.can_submit() {
            return Ok(());
        }
        match self.mode() {
            Mode::Idle => {
                let title = self.draft_title.clone();
                let price = self.draft_price.clone();
                self.add(&title, &price)?;
            }
            Mode::Editing(id) => {
                self.commit_edit(id)?;
            }
        }
        Ok(())
    }

    fn position(&self, id: ExpenseId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Renders a price the way the user would type it back.
    fn price_draft(&self, price: Decimal) -> String {
        price.to_string().replacen('.', &self.decimal_sep.to_string(), 1)
    }

    fn clear_drafts(&mut self) {
        self.draft_title.clear();
        self.draft_price.clear();
    }
}

fn checked_total(mut prices: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    prices.try_fold(Decimal::ZERO, |sum, price| sum.checked_add(price))
}
