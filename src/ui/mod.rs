//! UI module - TUI rendering components.
//!
//! - `layout.rs`: main layout orchestration
//! - `search_panel.rs`: query input + paginated results table
//! - `detail_panel.rs`: lot input, summary widgets, and the event chain
//! - `widgets/`: modal overlays (QR presentation, help)
//! - `clipboard.rs`: OSC 52 copy of full hash values
//!
//! Everything here draws from domain view models; no state lives in this
//! module.

pub mod clipboard;
mod detail_panel;
mod layout;
mod search_panel;

pub mod widgets;

pub use layout::render;
