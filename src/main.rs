use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::input::{map_key, KeyAction};
use flappy::persistence::{FileStore, MemoryStore, ProfileStore};
use flappy::utils::{logging, persistence::data_dir};
use flappy::{
    build_info, ui, Game, GameConfig, InputOutcome, DEFAULT_PROFILE, INPUT_POLL_MS,
    MAX_TICKS_PER_FRAME, TICKS_PER_SECOND, TICK_INTERVAL_MS,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{info, warn};

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn print_help() {
    println!("Flappy - terminal Flappy Bird\n");
    println!("Usage: flappy [options]\n");
    println!("Options:");
    println!("  --profile NAME  Play as NAME (separate high score and coins)");
    println!("  --version       Show version information");
    println!("  --help          Show this help message");
    println!("\nSet FLAPPY_LOG=debug for verbose logs in the data directory.");
}

/// Returns the profile name to play, or exits for informational flags.
fn parse_args() -> String {
    let mut args = std::env::args().skip(1);
    let mut profile = DEFAULT_PROFILE.to_string();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--profile" | "-p" => match args.next() {
                Some(name) => profile = name,
                None => {
                    eprintln!("--profile needs a name");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'flappy --help' for usage.");
                std::process::exit(1);
            }
        }
    }
    profile
}

fn open_store(profile: &str) -> Box<dyn ProfileStore> {
    match FileStore::new(profile) {
        Ok(store) => {
            info!(path = %store.path().display(), "using save file");
            Box::new(store)
        }
        Err(e) => {
            warn!(error = %e, "no save location, progress will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> io::Result<()> {
    let profile = parse_args();

    match data_dir() {
        Ok(dir) => {
            if let Err(e) = logging::init(&dir) {
                eprintln!("Logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!("Logging disabled: {}", e),
    }
    info!(version = %build_info::version_line(), profile = %profile, "starting");

    let config = GameConfig::load();
    let mut game = Game::new(config, open_store(&profile));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;

    let result = run(&mut terminal, &mut game);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(high_score = game.profile.high_score, "exiting");
    result
}

/// Fixed-timestep loop: drain input, run due ticks, draw.
fn run<S: ProfileStore>(terminal: &mut Tui, game: &mut Game<S>) -> io::Result<()> {
    let tick_interval = Duration::from_millis(TICK_INTERVAL_MS);
    let dt = 1.0 / TICKS_PER_SECOND;
    let mut rng = rand::thread_rng();

    let mut last_frame = Instant::now();
    let mut accumulator = Duration::ZERO;

    loop {
        terminal.draw(|frame| ui::draw(frame, &game.snapshot()))?;

        while event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match map_key(key, game.phase(), game.shop.open) {
                KeyAction::ForceQuit => return Ok(()),
                KeyAction::Game(input) => {
                    if game.handle_input(input) == InputOutcome::Exit {
                        return Ok(());
                    }
                }
                KeyAction::None => {}
            }
        }

        let now = Instant::now();
        accumulator += now - last_frame;
        last_frame = now;

        let mut steps = 0;
        while accumulator >= tick_interval && steps < MAX_TICKS_PER_FRAME {
            game.tick(dt, &mut rng);
            accumulator -= tick_interval;
            steps += 1;
        }
        if steps == MAX_TICKS_PER_FRAME {
            // Too far behind (suspended terminal, slow draw); drop the backlog.
            accumulator = Duration::ZERO;
        }
    }
}
