use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};

/// The area inside a one-cell border.
pub(super) fn inner(area: Rect) -> Rect {
    area.inner(Margin::new(1, 1))
}

/// A popup rectangle centred in `r`, sized in percent of it.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [row] =
        Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center).areas(r);
    let [area] =
        Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center).areas(row);
    area
}

/// Four equal card slots across `area`, centred, each at most `max_width` wide.
pub(super) fn card_slots(area: Rect, max_width: u16) -> [Rect; 4] {
    let width = (area.width / 4).min(max_width);
    Layout::horizontal([Constraint::Length(width); 4]).flex(Flex::Center).areas(area)
}
