pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let outcome: anyhow::Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.needs_reload {
            app.needs_reload = false;
            match crate::evaluate::load_and_score(&app.data_path, &app.config) {
                Ok(evaluation) => {
                    for warning in &evaluation.warnings {
                        tracing::warn!("{}", warning);
                    }
                    app.update_entries(evaluation);
                }
                Err(e) => app.show_flash(format!("Failed to reload: {:#}", e)),
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprint!("{}", msg);
    }

    outcome
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Score breakdown
                KeyCode::Char('b') | KeyCode::Enter => app.show_score_breakdown(),

                // Find by identifier
                KeyCode::Char('/') => app.start_search_input(),

                // Reload data file
                KeyCode::Char('r') => {
                    app.needs_reload = true;
                    app.show_flash("Reloading...".to_string());
                }

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::SearchInput => {
            match key.code {
                KeyCode::Enter => app.confirm_search_input(),
                KeyCode::Esc => app.cancel_search_input(),
                KeyCode::Backspace => {
                    app.search_input.pop();
                }
                KeyCode::Char(c) if !c.is_control() => {
                    app.search_input.push(c);
                }
                // Ignore all other keys (don't propagate to Normal mode)
                _ => {}
            }
        }
        app::InputMode::ScoreBreakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.dismiss_score_breakdown(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
