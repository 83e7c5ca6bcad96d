mod api;
mod app;
mod cli;
mod config;
mod error;
mod filter;
mod form;
mod keys;
mod logging;
mod movie;
mod requests;
#[cfg(test)]
mod testing;
mod ui;

use api::HttpBackend;
use app::App;
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use movie::MovieId;
use ratatui::layout::Rect;
use std::path::PathBuf;
use tracing::{error, info};

/// TUI client for browsing and editing a REST movie catalog
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog server root, e.g. http://localhost:3000
    #[arg(short, long, global = true)]
    api_url: Option<String>,

    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Where to write the log (defaults to the user cache dir)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive catalog (default)
    Run,
    /// Print the catalog, optionally filtered
    List {
        /// Case-insensitive search on title and genre (and year if enabled)
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Add a movie
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        genre: String,
        #[arg(short, long)]
        year: String,
    },
    /// Replace a movie's title, genre and year
    Update {
        #[arg(long)]
        id: String,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        genre: String,
        #[arg(short, long)]
        year: String,
    },
    /// Delete a movie after confirmation
    Delete {
        #[arg(long)]
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn parse_id(raw: &str) -> MovieId {
    match raw.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    let log_path = match cli.log_file {
        Some(p) => p,
        None => logging::default_log_path()?,
    };
    if let Err(e) = logging::init(&config.log_filter, &log_path) {
        eprintln!("Warning: Failed to initialize logging: {}", e.user_message());
    }

    let api_url = cli.api_url.unwrap_or_else(|| config.api_url.clone());
    let backend = HttpBackend::new(&api_url)?;
    info!(url = %backend.movies_url(), "using catalog server");

    let fields = config.search_fields();
    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => return run(backend, fields).await,
        Commands::List { query } => {
            cli::list(&backend, query.as_deref(), fields, &mut std::io::stdout()).await
        }
        Commands::Add { title, genre, year } => cli::add(&backend, &title, &genre, &year).await,
        Commands::Update { id, title, genre, year } => {
            cli::update(&backend, &parse_id(&id), &title, &genre, &year).await
        }
        Commands::Delete { id, yes } => {
            let stdin = std::io::stdin();
            cli::delete(&backend, &parse_id(&id), yes, &mut stdin.lock())
                .await
                .map(|_| ())
        }
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(backend: HttpBackend, fields: filter::SearchFields) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(backend, fields);
    app.refresh();

    // Init terminal
    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

    let size = terminal.size()?;
    app.update_page_size(size.height);

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    info!("terminal restored");

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App<HttpBackend>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.drain_outcomes();
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so finished requests show up promptly
        if event::poll(std::time::Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    keys::handle_key(app, key);
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    keys::handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
                }
                Event::Resize(_, height) => {
                    app.update_page_size(height);
                }
                _ => {}
            }
        }
    }
}
