use crate::cards::action_type_for;
use crate::game::{DrawSource, Phase, SlotView, TableView};
use crate::hand::Seat;
use crate::scoring::{Outcome, RoundResult, FAILED_CALL_PENALTY};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{card_slots, centered_rect, inner};

const CARD_WIDTH: u16 = 11;
const OPPONENT_KEYS: [char; 4] = ['Q', 'W', 'E', 'R'];

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let view = app.game.view(Seat::Player);
    let [header, opponent, middle, player, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Min(4),
    ])
    .areas(f.area());

    draw_header(f, header, app, &view);
    draw_hand(f, opponent, &view, Seat::Opponent);
    draw_piles(f, middle, &view);
    draw_hand(f, player, &view, Seat::Player);
    draw_status(f, status, &view);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState, view: &TableView) {
    let mut spans = vec![
        Span::raw(format!("Round {}", app.game.round_number())),
        Span::raw("  │  "),
        Span::raw(format!(
            "Totals  You: {}  Bot: {}",
            view.scores.total(Seat::Player),
            view.scores.total(Seat::Opponent)
        )),
        Span::raw("  │  "),
        Span::styled(view.phase.label(), Style::default().add_modifier(Modifier::BOLD)),
    ];
    if let Some(caller) = view.caller {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            format!("CABO called by {caller}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().title("CABO").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_hand(f: &mut Frame, area: Rect, view: &TableView, seat: Seat) {
    let keys = match seat {
        Seat::Player => "1 2 3 4",
        Seat::Opponent => "Q W E R",
    };
    let mut title = format!("{seat}  [{keys}]");
    if let Some(result) = view.last_result {
        title.push_str(&hand_total(&result, seat));
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if is_live(view.phase) && view.current == seat {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    if let Some(Outcome::Won(winner)) = view.last_result.map(|r| r.outcome) {
        if winner == seat {
            block = block.border_style(Style::default().fg(Color::Green));
        }
    }
    f.render_widget(block, area);

    let slots = card_slots(inner(area), CARD_WIDTH);
    for (i, (slot_area, slot)) in slots.into_iter().zip(view.hands[seat.index()]).enumerate() {
        let label = match seat {
            Seat::Player => char::from(b'1' + i as u8),
            Seat::Opponent => OPPONENT_KEYS[i],
        };
        render_card_widget(f, slot_area, &label.to_string(), slot.value, slot_border(&slot));
    }
}

fn hand_total(result: &RoundResult, seat: Seat) -> String {
    let raw = result.hand_value(seat);
    if result.penalized == Some(seat) {
        format!("  = {raw} + {FAILED_CALL_PENALTY} = {}", result.final_value(seat))
    } else {
        format!("  = {raw}")
    }
}

fn slot_border(slot: &SlotView) -> Option<Color> {
    if slot.transient {
        Some(Color::Cyan)
    } else if slot.selected {
        Some(Color::Magenta)
    } else if slot.selectable {
        Some(Color::Yellow)
    } else {
        None
    }
}

fn draw_piles(f: &mut Frame, area: Rect, view: &TableView) {
    let [deck, discard, drawn, action] = Layout::horizontal([
        Constraint::Length(CARD_WIDTH + 4),
        Constraint::Length(CARD_WIDTH + 4),
        Constraint::Length(CARD_WIDTH + 4),
        Constraint::Min(10),
    ])
    .areas(area);

    render_card_widget(f, deck, &format!("Deck {}", view.deck_len), None, None);
    let discard_title = format!("Discard {}", view.discard_len);
    render_card_widget(f, discard, &discard_title, view.discard_top, None);

    match view.drawn {
        Some(value) => {
            let title = match view.drawn_from {
                Some(DrawSource::Discard) => "Drawn (P)",
                _ => "Drawn (D)",
            };
            render_card_widget(f, drawn, title, Some(value), Some(Color::Yellow));
        }
        None => f.render_widget(Block::default().title("Drawn").borders(Borders::ALL), drawn),
    }

    let mut lines = Vec::new();
    if let Some(p) = view.protocol {
        lines.push(Line::from(Span::styled(
            format!("{} · step {}", p.kind().label().to_uppercase(), p.step() + 1),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        if p.awaiting_continue() {
            lines.push(Line::from("C continue"));
        }
    } else if let Some(kind) = view.drawn.and_then(action_type_for) {
        if view.drawn_from == Some(DrawSource::Deck) {
            lines.push(Line::from(format!("U use {}  •  S skip", kind.label())));
            lines.push(Line::from("1-4 keep it for points"));
        }
    }
    if let Some(t) = view.transient {
        let whose = if t.owner == Seat::Player { "your" } else { "Bot's" };
        lines.push(Line::from(format!("Showing {whose} card {}", t.slot + 1)));
    }
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Action").borders(Borders::ALL));
    f.render_widget(para, action);
}

fn draw_status(f: &mut Frame, area: Rect, view: &TableView) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
            .areas(inner(area));

    let status_style = match view.last_result.map(|r| r.outcome) {
        Some(Outcome::Won(Seat::Player)) => Style::default().fg(Color::Green),
        Some(Outcome::Won(Seat::Opponent)) => Style::default().fg(Color::Red),
        _ => Style::default(),
    };
    let mut left_info = vec![Line::from(Span::styled(view.status.clone(), status_style))];

    let my_turn = view.current == Seat::Player && is_live(view.phase);
    let idle = my_turn && view.drawn.is_none() && view.protocol.is_none();
    let action_style = |enabled: bool| {
        if enabled {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    };
    if view.phase == Phase::RoundOver {
        left_info.push(Line::from("Press Space for a new round."));
    } else {
        left_info.push(Line::from(vec![
            Span::raw("Keys: "),
            Span::styled("D deck", action_style(idle && view.deck_len > 0)),
            Span::raw(" • "),
            Span::styled("P discard", action_style(idle && view.discard_top.is_some())),
            Span::raw(" • "),
            Span::styled("K call CABO", action_style(idle && view.phase == Phase::Playing)),
            Span::raw(" • "),
            Span::styled("S skip/discard", action_style(my_turn && view.drawn.is_some())),
        ]));
    }

    let right_keys = vec![Line::from(""), Line::from("? help • H history • M menu")];
    f.render_widget(Paragraph::new(left_info).wrap(Wrap { trim: true }), left);
    f.render_widget(
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        right,
    );
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Round history").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.game.log_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("Nothing has happened yet."));
    } else {
        for entry in entries {
            lines.push(Line::from(format!(
                "{} {} [{}]",
                entry.seat,
                entry.event.describe(),
                entry.phase
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- 1-4: your cards (look during setup, replace, action target)"),
        Line::from("- Q W E R: Bot's cards (action target)"),
        Line::from("- D: draw from the deck"),
        Line::from("- P: take the top discard"),
        Line::from("- U: use the drawn action card"),
        Line::from("- S: skip the action / discard the drawn card"),
        Line::from("- C: continue after peek or spy"),
        Line::from("- K: call CABO at the start of your turn"),
        Line::from("- Space: next round (when the round is over)"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Actions:", bold)),
        Line::from("- 7/8 Peek: look at one of your cards"),
        Line::from("- 9/10 Spy: look at one of Bot's cards"),
        Line::from("- 11/12 Swap: trade one of yours with one of Bot's, blind"),
        Line::from("- 13 Spy & Swap: look at one of Bot's, then trade"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down, + / -: edit settings"),
        Line::from("- Enter: new session  Esc: back  Q: quit"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn is_live(phase: Phase) -> bool {
    matches!(phase, Phase::Playing | Phase::FinalRound)
}

fn value_style(value: u8) -> Style {
    match value {
        0 => Style::default().fg(Color::Green),
        13 => Style::default().fg(Color::Red),
        v if action_type_for(v).is_some() => Style::default().fg(Color::LightYellow),
        _ => Style::default().fg(Color::White),
    }
    .add_modifier(Modifier::BOLD)
}

fn render_card_widget(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: Option<u8>,
    border: Option<Color>,
) {
    let mut block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let inner = inner(area);
    f.render_widget(block, area);
    let lines = match value {
        Some(v) => {
            let mut lines = vec![Line::from(Span::styled(v.to_string(), value_style(v)))];
            if let Some(kind) = action_type_for(v) {
                lines.push(Line::from(Span::styled(
                    kind.label(),
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }
            lines
        }
        None => vec![Line::from(Span::styled("▒▒▒", Style::default().fg(Color::DarkGray)))],
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
