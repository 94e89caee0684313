//! The experience ledger.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::entry::LedgerEntry;
use crate::error::{RulesError, RulesResult};

/// Entries shown per page of history.
pub const PAGE_SIZE: usize = 10;

/// Earned and spent experience plus the history of every change.
///
/// Spent never exceeds earned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LedgerRecord")]
pub struct Ledger {
    earned: u32,
    spent: u32,
    entries: Vec<LedgerEntry>,
}

#[derive(Deserialize)]
struct LedgerRecord {
    earned: u32,
    spent: u32,
    #[serde(default)]
    entries: Vec<LedgerEntry>,
}

impl TryFrom<LedgerRecord> for Ledger {
    type Error = RulesError;

    fn try_from(r: LedgerRecord) -> Result<Self, Self::Error> {
        check_totals(r.earned, r.spent)?;
        Ok(Self {
            earned: r.earned,
            spent: r.spent,
            entries: r.entries,
        })
    }
}

fn check_totals(earned: u32, spent: u32) -> RulesResult<()> {
    if spent > earned {
        return Err(RulesError::validation(
            "experience",
            format!("spent ({spent}) cannot exceed earned ({earned})"),
        ));
    }
    Ok(())
}

fn check_amount(amount: u32) -> RulesResult<u32> {
    if amount == 0 {
        return Err(RulesError::validation("amount", "must be positive"));
    }
    Ok(amount)
}

impl Ledger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total experience ever earned.
    pub fn earned(&self) -> u32 {
        self.earned
    }

    /// Total experience spent.
    pub fn spent(&self) -> u32 {
        self.spent
    }

    /// Experience left to spend.
    pub fn available(&self) -> u32 {
        self.earned - self.spent
    }

    /// Award experience. Returns the new available total.
    pub fn earn(&mut self, amount: u32, reason: impl Into<String>) -> RulesResult<u32> {
        let amount = check_amount(amount)?;
        let earned = self
            .earned
            .checked_add(amount)
            .ok_or_else(|| RulesError::validation("amount", "earned total overflows"))?;
        self.earned = earned;
        self.entries.push(LedgerEntry::Earn {
            amount,
            reason: reason.into(),
            timestamp: Utc::now(),
        });
        Ok(self.available())
    }

    /// Spend experience. Fails without recording anything when
    /// `amount` exceeds what is available.
    pub fn spend(&mut self, amount: u32, reason: impl Into<String>) -> RulesResult<u32> {
        let amount = check_amount(amount)?;
        self.ensure_available(amount)?;
        self.spent += amount;
        self.entries.push(LedgerEntry::Spend {
            amount,
            reason: reason.into(),
            timestamp: Utc::now(),
        });
        Ok(self.available())
    }

    /// Fail unless `amount` can be spent.
    pub fn ensure_available(&self, amount: u32) -> RulesResult<()> {
        if amount > self.available() {
            return Err(RulesError::InsufficientResource {
                resource: "experience",
                required: amount,
                available: self.available(),
            });
        }
        Ok(())
    }

    /// Overwrite either total. Rejected if spent would exceed earned.
    pub fn set(
        &mut self,
        earned: Option<u32>,
        spent: Option<u32>,
        reason: impl Into<String>,
    ) -> RulesResult<()> {
        let earned = earned.unwrap_or(self.earned);
        let spent = spent.unwrap_or(self.spent);
        check_totals(earned, spent)?;
        self.earned = earned;
        self.spent = spent;
        self.entries.push(LedgerEntry::Correction {
            earned,
            spent,
            reason: reason.into(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// One page of history, newest first. Pages are numbered from 1.
    pub fn page(&self, page: usize) -> Vec<&LedgerEntry> {
        let skip = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
        self.entries.iter().rev().skip(skip).take(PAGE_SIZE).collect()
    }

    /// Number of history pages (at least 1).
    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(PAGE_SIZE).max(1)
    }
}
