pub mod config;
pub mod journal_entry;

pub use config::Settings;
pub use journal_entry::{DebitCreditCode, JournalEntryItem, JournalEntryRequest, SapProxyResponse};
