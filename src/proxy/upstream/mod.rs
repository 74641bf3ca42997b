pub mod client;

pub use client::{SapResponse, UpstreamClient};
