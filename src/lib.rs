//! TraceChain TUI: terminal viewer for tamper-evident supply-chain lots.
//!
//! ## Architecture
//!
//! The client splits into three layers, mirroring the backend-facing tools
//! this codebase grew out of:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  TRACECHAIN                                                     │
//! ├──────────────────────────┬──────────────────────────────────────┤
//! │  SEARCH                  │  LOT ID  [Enter] Load                │
//! │  ┌ query ┐               │  Lot LOT-001 • Mango      VERIFIED   │
//! │  │ LOTS  │               │  Green Farm • Harvest 2024-01-01     │
//! │  │ ...   │               │  ┌ HARVEST_CREATED  01/01/2024 ... ┐ │
//! │  └───────┘               │  └ SENSOR_READING   Temp 12.5°C ...┘ │
//! └──────────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! - `api`: typed reqwest wrapper over the backend HTTP surface
//! - `domain`: pure state machines and view-model production (no I/O)
//! - `ui`: ratatui rendering of the domain view models

pub mod api;
pub mod domain;
pub mod ui;

pub use api::{ApiClient, RequestError};
pub use domain::{Action, App};
