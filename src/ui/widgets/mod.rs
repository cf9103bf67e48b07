//! Modal overlay widgets.

mod help_overlay;
mod qr_modal;

pub use help_overlay::render_help_overlay;
pub use qr_modal::render_qr_modal;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Create a centered rectangle.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
