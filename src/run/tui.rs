use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ledger::Ledger;
use crate::query::TypeFilter;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ledger: &mut Ledger) -> Result<()> {
    let mut app = App::new();
    app.refresh(ledger);
    if ledger.recovered_from_corruption() {
        app.set_status("Warning: saved transactions were unreadable; started empty (backup kept)");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, borders, table header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger)?,
                InputMode::Search => handle_search_input(key, app, ledger),
                InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('a') => {
            app.input_mode = InputMode::Command;
            app.command_input = "add ".into();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => move_down(app),
        KeyCode::Char('k') | KeyCode::Up => move_up(app),
        KeyCode::Char('g') => scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll),
        KeyCode::Char('G') => scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            app.visible_rows,
        ),
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::Transactions),
        KeyCode::Tab | KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = if key.code == KeyCode::Tab {
                (idx + 1) % screens.len()
            } else {
                (idx + screens.len() - 1) % screens.len()
            };
            switch_screen(app, ledger, screens[next]);
        }
        KeyCode::Char('f') => {
            app.type_filter = app.type_filter.next();
            app.screen = Screen::Transactions;
            app.reset_cursor();
            app.refresh_transactions(ledger);
            app.set_status(format!("Showing {} transactions", app.type_filter));
        }
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            commands::handle_command("delete", app, ledger)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            if app.type_filter != TypeFilter::All || !app.search_input.is_empty() {
                commands::handle_command("clear", app, ledger)?;
            } else {
                app.status_message.clear();
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            app.refresh_transactions(ledger);
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            live_search(app, ledger);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            live_search(app, ledger);
        }
        _ => {}
    }
}

fn live_search(app: &mut App, ledger: &Ledger) {
    app.screen = Screen::Transactions;
    app.reset_cursor();
    app.refresh_transactions(ledger);
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(PendingAction::DeleteTransaction { id, description }) =
                app.pending_action.take()
            {
                if ledger.remove(id)? {
                    app.set_status(format!("Deleted: {description}"));
                } else {
                    app.set_status(format!("Already gone: {description}"));
                }
                app.refresh(ledger);
            }
        }
        _ => {
            app.pending_action = None;
            app.set_status("Cancelled");
        }
    }
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, ledger: &Ledger, screen: Screen) {
    app.screen = screen;
    match screen {
        Screen::Dashboard => app.refresh(ledger),
        Screen::Transactions => app.refresh_transactions(ledger),
    }
}

fn move_down(app: &mut App) {
    if app.screen == Screen::Transactions {
        scroll_down(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            app.visible_rows.max(1),
        );
    }
}

fn move_up(app: &mut App) {
    if app.screen == Screen::Transactions {
        scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
    }
}
