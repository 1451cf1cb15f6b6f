#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, prelude::*};

use gridfall::app::{App, AppResult};
use gridfall::components::Input;
use gridfall::game::FRAME_MILLIS;
use gridfall::sound::AudioState;
use gridfall::{config, systems, ui};

fn main() -> AppResult<()> {
    // The terminal owns stdout, so logging goes to a file via a
    // redirected stderr.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("gridfall.log")?;

    let stderr_fd = io::stderr().as_raw_fd();
    // Safety: plain POSIX fd redirection of stderr into the log file
    unsafe {
        libc::dup2(log_file.as_raw_fd(), stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting gridfall");

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration, using defaults: {e:?}");
            config::Config::default()
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    {
        let mut audio = app.world.resource_mut::<AudioState>();
        audio.set_volume(config.audio.volume);
        if config.audio.autoplay {
            audio.set_music_playing(true);
        }
    }

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

/// Fixed-rate frame loop at 50 frames per second. Per frame: map
/// terminal events onto pending commands, run one frame of game logic,
/// render, then sleep off the remaining frame budget. The clock inside
/// `frame_update` decides whether a logic tick runs, so a long frame
/// never double-processes cycles.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> AppResult<()> {
    let frame_time = Duration::from_millis(FRAME_MILLIS);

    // Flush whatever was buffered before the game took over the terminal
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key.code, key.kind);
            }
        }

        if app.should_quit {
            return Ok(());
        }

        systems::frame_update(&mut app.world);

        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(rest) = frame_time.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

fn handle_key(app: &mut App, code: KeyCode, kind: KeyEventKind) {
    let mut input = app.world.resource_mut::<Input>();

    if kind == KeyEventKind::Release {
        if matches!(code, KeyCode::Down | KeyCode::Char('s')) {
            input.soft_drop_stop = true;
        }
        return;
    }

    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Left | KeyCode::Char('a') => input.left = true,
        KeyCode::Right | KeyCode::Char('d') => input.right = true,
        KeyCode::Up | KeyCode::Char('w' | ' ') => input.rotate = true,
        KeyCode::Down | KeyCode::Char('s') => input.soft_drop_start = true,
        KeyCode::Char('p') => input.pause = true,
        KeyCode::Char('m') => input.toggle_music = true,
        KeyCode::Enter => input.start = true,
        _ => {}
    }
}
