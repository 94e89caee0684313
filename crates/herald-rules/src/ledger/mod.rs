//! Experience: earning, spending and the cost of improvements.

pub mod cost;
pub mod entry;
pub mod log;

pub use cost::{SPECIALTY_COST, attribute_cost, skill_cost};
pub use entry::LedgerEntry;
pub use log::{Ledger, PAGE_SIZE};
