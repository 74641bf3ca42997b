// proxy module - journal entry forwarding service

pub mod attachment;
pub mod handlers; // API endpoint handlers
pub mod mappers; // Attachment payload mapping
pub mod middleware; // Axum middleware
pub mod server;
pub mod upstream; // SAP client

pub use server::{build_router, AppState, AxumServer};
