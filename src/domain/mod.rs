//! Domain layer: pure state, view-model production, and resource handles.
//!
//! Nothing here touches the terminal or the network; the ratatui layer draws
//! what this module builds, and `main` dispatches the actions it emits.

pub mod app;
pub mod chain;
pub mod detail;
pub mod highlight;
pub mod qr;
pub mod search;

pub use app::{Action, App, Focus};
pub use chain::{build_cards, EventCard, EventKind};
pub use detail::{Detail, LoadPhase, LotDetailView, VerifyBadge};
pub use highlight::highlight;
pub use qr::QrArtifact;
pub use search::Search;
