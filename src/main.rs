//! DCF TUI - Actor-based valuation client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::sync::Arc;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use dcf_tui::app::{AppActor, AppState};
use dcf_tui::config::Config;
use dcf_tui::constants::{APP_NAME, LOG_FILE_NAME};
use dcf_tui::messages::ui_events::key_to_ui_event;
use dcf_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use dcf_tui::network::{NetworkActor, ReqwestTransport};
use dcf_tui::ui::{cursor_column, render_history, trigger_label, valuation_lines};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Load config before taking over the terminal so errors stay readable
    let config = Config::load()?;
    tracing::info!(backend = %config.backend_url, timeout = ?config.timeout(), "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let transport = Arc::new(ReqwestTransport::new(config.timeout()));
    let network_actor = NetworkActor::new(transport, config.backend_url.clone(), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(config.backend_url), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.show_help) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title
            Constraint::Length(3),  // Ticker input + trigger
            Constraint::Min(8),     // Result + history
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", APP_NAME),
        Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
    )));
    f.render_widget(title, chunks[0]);

    draw_input_bar(f, state, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    draw_result(f, state, body[0]);
    f.render_widget(render_history(&state.history, state.history_index), body[1]);

    draw_status_bar(f, state, chunks[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_input_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(16)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Ticker ");

    let input = if state.ticker.is_empty() {
        Paragraph::new(Span::styled(
            "Enter stock ticker (e.g., AAPL)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(state.ticker.as_str())
    };
    f.render_widget(input.block(block), chunks[0]);

    let cursor_offset = cursor_column(&state.ticker, state.cursor_position);
    let max_x = chunks[0].x + chunks[0].width.saturating_sub(2);
    let cursor_x = chunks[0].x.saturating_add(cursor_offset).saturating_add(1).min(max_x);
    f.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));

    let trigger_style = if state.can_fetch {
        Style::default().fg(Color::White).bg(Color::Blue).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let trigger = Paragraph::new(trigger_label(state.is_loading()))
        .alignment(Alignment::Center)
        .style(trigger_style)
        .block(Block::default().borders(Borders::ALL).title(" Enter "));
    f.render_widget(trigger, chunks[1]);
}

fn draw_result(f: &mut Frame, state: &RenderState, area: Rect) {
    let time_text = state
        .last_time_ms
        .map(|ms| format!(" {}ms ", ms))
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Valuation ({}) ", state.backend_url))
        .title_bottom(Line::from(time_text).right_aligned());

    let result = Paragraph::new(valuation_lines(&state.valuation))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(result, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading() {
        " Loading... "
    } else {
        " Enter:get DCF | ↑/↓:history | Ctrl+U:clear | F1:help | Esc:quit "
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 DCF TUI - Keyboard Shortcuts

 TICKER
   type               Edit ticker
   ← / →              Move cursor
   Backspace          Delete character
   Ctrl+U             Clear ticker

 VALUATION
   Enter              Get DCF (disabled while loading or empty)

 HISTORY
   ↑ / ↓              Recall earlier tickers

 GENERAL
   F1                 Toggle this help
   Esc / Ctrl+C       Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
