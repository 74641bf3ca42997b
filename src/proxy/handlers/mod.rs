// Handlers module - API endpoint handlers

pub mod journal_entry;
