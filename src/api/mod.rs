//! HTTP client for the TraceChain backend API.

mod client;
mod types;

pub use client::{ApiClient, RequestError};
pub use types::{LedgerEvent, LotListItem, LotListPage, LotSummary, QrImage, SeedOutcome};
