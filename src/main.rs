use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use study_tutor::{
    Action, AppState, ClientConfig, CompletionProvider, Session, build_provider, draw,
    handle_restart_confirm, handle_tutor_input, logger, run_generation,
};

fn main() -> io::Result<()> {
    let config = ClientConfig::from_env();
    logger::init(&config.log_path);
    logger::log(&format!("Starting study tutor ({})", config.describe()));

    let provider = build_provider(&config);
    let runtime = tokio::runtime::Runtime::new()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &runtime, provider.as_ref());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::error(&format!("Terminal error: {}", e));
    }
    logger::log("Exiting study tutor");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &tokio::runtime::Runtime,
    provider: &dyn CompletionProvider,
) -> io::Result<()> {
    let mut session = Session::new();
    let mut app_state = AppState::Tutor;

    loop {
        terminal.draw(|f| draw(f, &mut session, &app_state))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let action = match app_state {
            AppState::Tutor => handle_tutor_input(&mut session, key, &mut app_state),
            AppState::RestartConfirm => handle_restart_confirm(&mut session, key, &mut app_state),
        };

        match action {
            Action::None => {}
            Action::Quit => break,
            Action::Generate => {
                // Show the pending notice before blocking on the request
                terminal.draw(|f| draw(f, &mut session, &app_state))?;
                if let Err(e) = runtime.block_on(run_generation(&mut session, provider)) {
                    logger::log(&format!("Generation step left an error on screen: {}", e));
                }
            }
        }
    }

    Ok(())
}
