use clap::Parser;
use folio::app::{App, AppResult};
use folio::config::Config;
use folio::event::{Event, EventHandler};
use folio::handler::handle_key_events;
use folio::tui::Tui;
use log::LevelFilter;
use simplelog::WriteLogger;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tui::backend::CrosstermBackend;
use tui::Terminal;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to an alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme override: "light", "dark", or a path to a theme file
    #[arg(short, long)]
    theme: Option<String>,

    /// GitHub account to feature instead of the configured one
    #[arg(short, long)]
    user: Option<String>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Read or create config
    let mut config = Config::read_from_path(cli.config.as_deref())?;
    if let Some(theme) = cli.theme {
        config.set_theme_preference(theme);
    }
    if let Some(user) = cli.user {
        config.set_github_user(user);
    }

    init_logger(&config);

    // Create an application and kick off the initial, non-forced feed load.
    let mut app = App::init(config)?;
    app.feed.fetch(false);

    // Initialize the terminal user interface.
    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;
    let events = EventHandler::new(250);
    let mut tui = Tui::new(terminal, events);
    tui.init()?;

    // Start the main loop.
    while app.running {
        // Render the user interface.
        tui.draw(&mut app)?;
        // Handle events.
        match tui.events.next()? {
            Event::Tick => app.tick(),
            Event::Key(key_event) => handle_key_events(key_event, &mut app)?,
            Event::Mouse(_) => {}
            Event::Resize(_, _) => {}
        }
    }

    // Exit the user interface.
    tui.exit()?;
    Ok(())
}

/// The terminal belongs to the UI, so diagnostics go to a file under the
/// data directory. Failing to open it just means running without logs.
fn init_logger(config: &Config) {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file);
    }
}
