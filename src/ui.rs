use ratatui::{prelude::*, widgets::*};

use crate::app::state::ValuationState;
use crate::models::{HistoryEntry, LookupOutcome, Valuation};

/// Format a number the way the backend sent it: `150`, `8`, `2.5`
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Display columns taken by the first `byte_pos` bytes of `text`
pub fn cursor_column(text: &str, byte_pos: usize) -> u16 {
    let end = byte_pos.min(text.len());
    let width = Span::raw(&text[..end]).width();
    u16::try_from(width).unwrap_or(u16::MAX)
}

/// Label of the fetch trigger
pub fn trigger_label(is_loading: bool) -> &'static str {
    if is_loading {
        "Loading..."
    } else {
        "Get DCF"
    }
}

/// Body of the result panel for the current valuation state
pub fn valuation_lines(state: &ValuationState) -> Vec<Line<'static>> {
    match state {
        ValuationState::TransportError(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red).bold(),
        ))],
        ValuationState::Success(valuation) => success_lines(valuation),
        ValuationState::PayloadError(error) => vec![Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::LightRed),
        ))],
        ValuationState::Loading => vec![Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        ))],
        ValuationState::Idle => vec![Line::from(Span::styled(
            "Enter a ticker and press Enter to fetch its DCF valuation.",
            Style::default().fg(Color::DarkGray),
        ))],
    }
}

fn success_lines(v: &Valuation) -> Vec<Line<'static>> {
    let label = Style::default().bold();
    vec![
        Line::from(Span::styled(
            v.ticker.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Intrinsic Value: ", label),
            Span::styled(
                format!("${:.2}", v.intrinsic_value),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Current Price: ", label),
            Span::raw(format!("${}", format_number(v.current_price))),
        ]),
        Line::from(vec![
            Span::styled("WACC: ", label),
            Span::raw(format!("{}%", format_number(v.wacc))),
        ]),
        Line::from(vec![
            Span::styled("Terminal Growth: ", label),
            Span::raw(format!("{}%", format_number(v.terminal_growth))),
        ]),
    ]
}

/// Outcome colour for history rows
pub fn outcome_color(outcome: &LookupOutcome) -> Color {
    match outcome {
        LookupOutcome::Valued { .. } => Color::Green,
        LookupOutcome::PayloadError(_) => Color::LightRed,
        LookupOutcome::TransportError => Color::Red,
    }
}

/// Renders the session history list
pub fn render_history<'a>(
    history: &'a [HistoryEntry],
    selected: Option<usize>,
) -> List<'a> {
    let items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if Some(i) == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{:<8}", entry.ticker), style),
                Span::styled(
                    entry.outcome.summary(),
                    Style::default().fg(outcome_color(&entry.outcome)),
                ),
            ]))
        })
        .collect();

    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" History (↑/↓ recall) "),
    )
}
