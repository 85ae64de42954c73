mod app;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dernek_composer_config::Config;
use dernek_composer_engine::{LookupResponse, MemoryGateway, preview_html};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
    time::{Duration, Instant},
};
use tokio::{runtime::Runtime, sync::mpsc};

use app::{App, Flow};

/// Upper bound on how long the loop sleeps waiting for input.
const TICK: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() == 3 && args[1] == "render" {
        return render_file(Path::new(&args[2]));
    }
    if args.len() == 3 && args[1] == "init" {
        let config_path = Config::config_path();
        init_config(Path::new(&args[2]), &config_path)?;
        println!("Saved members path to {}", config_path.display());
        return Ok(());
    }

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let members_path = match args.len() {
        2 => PathBuf::from(&args[1]),
        1 => match config.members_path.clone() {
            Some(path) => path,
            None => {
                eprintln!("Error: No members file provided and none configured");
                eprintln!("Usage: {} <members.toml>", args[0]);
                eprintln!("       {} init <members.toml>", args[0]);
                eprintln!("       {} render <document.txt>", args[0]);
                eprintln!("Or set members_path in {}", config_path.display());
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: {} [members.toml]", args[0]);
            eprintln!("       {} init <members.toml>", args[0]);
            eprintln!("       {} render <document.txt>", args[0]);
            process::exit(1);
        }
    };

    let gateway = match MemoryGateway::load(&members_path) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let catalog = match config.catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {e} (in {})", config_path.display());
            process::exit(1);
        }
    };

    let runtime = Runtime::new().context("Failed to start lookup runtime")?;
    let mut app = App::new("", gateway, catalog, config.settings());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app, &runtime);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match res {
        Ok(()) => print!("{}", app.buffer.text()),
        Err(err) => println!("{err:?}"),
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    runtime: &Runtime,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<LookupResponse>();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let now = Instant::now();
        if let Some(request) = app.composer.poll_lookup(now) {
            let lookup = app.composer.lookup(request);
            let tx = tx.clone();
            runtime.spawn(async move {
                // The receiver only goes away when the app is shutting down.
                let _ = tx.send(lookup.await);
            });
        }
        while let Ok(response) = rx.try_recv() {
            app.composer.on_lookup_completed(response);
        }

        let timeout = app
            .composer
            .next_deadline()
            .map_or(TICK, |deadline| deadline.saturating_duration_since(now).min(TICK));
        if !event::poll(timeout)? {
            continue;
        }
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key, Instant::now()) == Flow::Quit
        {
            return Ok(());
        }
    }
}

/// Records `members` as the default members file, keeping the rest of any
/// existing config. The file must load before it is saved.
fn init_config(members: &Path, config_path: &Path) -> Result<Config> {
    let members = std::path::absolute(members)
        .with_context(|| format!("Failed to resolve {}", members.display()))?;
    let count = MemoryGateway::load(&members)?.len();

    let mut config = Config::load_from_path(config_path)?.unwrap_or_default();
    config.members_path = Some(members);
    config.save_to_path(config_path)?;
    log::info!(
        "Configured {count} members from {:?} in {}",
        config.members_path,
        config_path.display()
    );
    Ok(config)
}

fn render_file(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document at {}", path.display()))?;
    println!("{}", preview_html(&content));
    Ok(())
}

/// Logs go to a file; writing to the terminal would corrupt the TUI.
fn init_logging() {
    let log_path = env::temp_dir().join("dernek-composer.log");
    let Ok(file) = File::create(&log_path) else {
        return;
    };
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("dernek-composer starting up, logging to {}", log_path.display());
}
