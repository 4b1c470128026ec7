use anatomy_worksheet::{
    catalog, draw_menu, draw_quit_confirmation, draw_summary, draw_worksheet, handle_menu_input,
    handle_quit_confirm_input, handle_summary_input, handle_worksheet_input, logger, AppState,
    WorksheetConfig, WorksheetSession,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

fn main() -> io::Result<()> {
    let config = WorksheetConfig::from_env();
    logger::init(&config.log_path);

    let loaded = match &config.content_path {
        Some(path) => catalog::load_from_path(path),
        None => catalog::load_embedded(),
    };
    let catalog = match loaded {
        Ok(catalog) => catalog,
        Err(e) => {
            logger::log(&format!("Failed to load worksheet content: {}", e));
            eprintln!("Failed to load worksheet content: {}", e);
            std::process::exit(1);
        }
    };
    let mut session = WorksheetSession::new(catalog, config.rng());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Terminal error: {}", e));
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut WorksheetSession,
) -> io::Result<()> {
    let mut app_state = AppState::Menu;

    loop {
        terminal.draw(|f| match app_state {
            AppState::Menu => draw_menu(f, session),
            AppState::Worksheet => draw_worksheet(f, session),
            AppState::Summary => draw_summary(f, session),
            AppState::QuitConfirm => {
                match session.previous_state {
                    AppState::Worksheet => draw_worksheet(f, session),
                    AppState::Summary => draw_summary(f, session),
                    _ => draw_menu(f, session),
                }
                draw_quit_confirmation(f);
            }
        })?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }

        match app_state {
            AppState::Menu => handle_menu_input(session, key, &mut app_state)?,
            AppState::Worksheet => handle_worksheet_input(session, key, &mut app_state)?,
            AppState::Summary => handle_summary_input(session, key, &mut app_state)?,
            AppState::QuitConfirm => {
                if handle_quit_confirm_input(session, key, &mut app_state) {
                    break;
                }
            }
        }
    }

    logger::log("Worksheet closed");
    Ok(())
}
