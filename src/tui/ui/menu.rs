use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

const LOGO: &str = r#"
  ______    ______   _______    ______
 /      \  /      \ |       \  /      \
|  $$$$$$\|  $$$$$$\| $$$$$$$\|  $$$$$$\
| $$   \$$| $$__| $$| $$__/ $$| $$  | $$
| $$      | $$    $$| $$    $$| $$  | $$
| $$   __ | $$$$$$$$| $$$$$$$\| $$  | $$
| $$__/  \| $$  | $$| $$__/ $$| $$__/ $$
 \$$    $$| $$  | $$| $$    $$ \$$    $$
  \$$$$$$  \$$   \$$ \$$$$$$$   \$$$$$$
"#;

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 80, f.area());
    let block = Block::default().title("cabo-rs").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    let inner_all = inner(area);

    let logo_lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::Green))))
        .collect();

    let [logo_area, rules_area, cfg_area] = Layout::vertical([
        Constraint::Length(logo_lines.len() as u16 + 1),
        Constraint::Length(4),
        Constraint::Min(3),
    ])
    .areas(inner_all);

    f.render_widget(Paragraph::new(logo_lines).alignment(Alignment::Center), logo_area);

    let dim = Style::default().add_modifier(Modifier::DIM);
    let rules = vec![
        Line::from("Lowest hand wins. Look at two of your four cards, then draw and replace."),
        Line::from("7-8 Peek  9-10 Spy  11-12 Swap  13 Spy & Swap"),
        Line::from("Call CABO when you think you are lowest: miss and pay +5."),
    ];
    f.render_widget(
        Paragraph::new(rules).style(dim).wrap(Wrap { trim: true }).alignment(Alignment::Center),
        rules_area,
    );

    let mut cfg_lines: Vec<Line> = vec![Line::from(Span::styled(
        "Settings:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (i, item) in app.menu_items_display().into_iter().enumerate() {
        let style = if i == app.menu_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        cfg_lines.push(Line::from(Span::styled(item, style)));
    }
    cfg_lines.push(Line::from(""));
    cfg_lines.push(Line::from(Span::styled(
        "[Enter] New session  [Esc] Back  [Q] Quit  [↑/↓] Move  [+/-] Adjust",
        dim,
    )));
    f.render_widget(
        Paragraph::new(cfg_lines).wrap(Wrap { trim: true }).alignment(Alignment::Center),
        cfg_area,
    );
}
