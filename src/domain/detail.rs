//! Lot detail state: summary widgets, verification badge, and event chain.

use crate::api::LotSummary;

use super::chain::{build_cards, EventCard};

/// Placeholder shown for metrics the server did not supply.
const MISSING: &str = "-";

/// Phase of the detail load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Nothing requested yet (or the last failed load had no prior view).
    #[default]
    Idle,
    /// A request is in flight. A previously loaded view stays visible.
    Loading,
    /// The last request succeeded and its view is current.
    Loaded,
}

/// Binary verification badge. No intermediate states: anything that is not an
/// explicit `true` from the server renders as tampered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyBadge {
    Verified,
    Tampered,
}

impl VerifyBadge {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => VerifyBadge::Verified,
            _ => VerifyBadge::Tampered,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerifyBadge::Verified => "VERIFIED",
            VerifyBadge::Tampered => "TAMPERED",
        }
    }
}

/// Presentational model for one loaded lot.
#[derive(Debug, Clone)]
pub struct LotDetailView {
    pub lot_id: String,
    /// "Lot {id} • {crop}"
    pub title: String,
    /// "{farm} • Harvest {date} • {n} events"
    pub meta: String,
    pub badge: VerifyBadge,
    pub quality_score: String,
    pub spoilage_risk: String,
    pub latest_temperature: String,
    pub latest_humidity: String,
    pub latest_ph: String,
    pub cards: Vec<EventCard>,
}

impl LotDetailView {
    fn from_summary(summary: LotSummary) -> Self {
        if summary.chain.len() as u64 != summary.total_events {
            // Data-contract bug on the server side; render the chain as given.
            tracing::warn!(
                lot_id = %summary.lot_id,
                chain_len = summary.chain.len(),
                total_events = summary.total_events,
                "chain length disagrees with total_events"
            );
        }

        let cards = build_cards(&summary.chain);
        Self {
            title: format!("Lot {} • {}", summary.lot_id, summary.crop),
            meta: format!(
                "{} • Harvest {} • {} events",
                summary.farm_name, summary.harvest_date, summary.total_events
            ),
            badge: VerifyBadge::from_flag(summary.verified),
            quality_score: opt_num(summary.quality_score),
            spoilage_risk: summary.spoilage_risk.unwrap_or_else(|| MISSING.to_string()),
            latest_temperature: opt_num(summary.latest_temperature_c),
            latest_humidity: opt_num(summary.latest_humidity_pct),
            latest_ph: opt_num(summary.latest_ph),
            cards,
            lot_id: summary.lot_id,
        }
    }
}

fn opt_num(value: Option<f64>) -> String {
    match value {
        Some(v) => {
            if v.fract() == 0.0 {
                format!("{v:.0}")
            } else {
                format!("{v}")
            }
        }
        None => MISSING.to_string(),
    }
}

/// Detail controller state. Owns the event chain for the duration of one
/// detail view and the selected-lot id read by the QR action.
#[derive(Debug, Default)]
pub struct Detail {
    pub phase: LoadPhase,
    /// Last successful view. Kept visible across a failed reload.
    pub view: Option<LotDetailView>,
    /// Set only after a successful fetch, from the server's echoed `lot_id`.
    selected_lot: Option<String>,
}

impl Detail {
    /// Validate a load request. Returns the trimmed lot id and moves to
    /// `Loading`, or `None` for empty input (no request is issued).
    pub fn begin_load(&mut self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.phase = LoadPhase::Loading;
        Some(trimmed.to_string())
    }

    /// Apply a successful fetch. Replaces the previous view wholesale; the
    /// server's echoed lot id is authoritative for the selection.
    pub fn apply_summary(&mut self, summary: LotSummary) {
        self.selected_lot = Some(summary.lot_id.clone());
        self.view = Some(LotDetailView::from_summary(summary));
        self.phase = LoadPhase::Loaded;
    }

    /// Apply a failed fetch: only the loading affordance is cleared, any
    /// prior view stays intact.
    pub fn apply_failure(&mut self) {
        self.phase = if self.view.is_some() {
            LoadPhase::Loaded
        } else {
            LoadPhase::Idle
        };
    }

    /// The lot currently shown, if any. Handed to the QR action explicitly
    /// rather than read through shared globals.
    pub fn selected_lot(&self) -> Option<&str> {
        self.selected_lot.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }
}
