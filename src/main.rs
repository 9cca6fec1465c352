use a11y_tabs::app::{App, BASE_PAGE, VERTICAL_PAGE};
use a11y_tabs::event::Key;
use a11y_tabs::page::Page;
use a11y_tabs::settings::TabSettings;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::{info, LevelFilter};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "a11y-tabs",
    about = "Interactive playground for accessible tabbed interfaces.\n\n\
    Loads a page, wires its tablist and lets you drive it with the keyboard."
)]
struct Cli {
    /// Markup file to load instead of the built-in sample page
    #[structopt(short, long, parse(from_os_str))]
    markup: Option<PathBuf>,

    /// Use the built-in vertical sample page
    #[structopt(long)]
    vertical: bool,

    /// Selector of the tablist element holding the [role="tab"] triggers
    #[structopt(long, default_value = ".tab-list")]
    tablist: String,

    /// Selector matching every tab panel
    #[structopt(long, default_value = r#"[role="tabpanel"]"#)]
    panels: String,

    /// Index of the tab selected at start
    #[structopt(short, long)]
    active: Option<usize>,

    /// Class put on the selected trigger
    #[structopt(long, default_value = "active")]
    selected_class: String,

    /// Comma-separated keys to replay without a terminal UI (e.g. "ArrowRight,Enter");
    /// the resulting ARIA state is printed
    #[structopt(short, long)]
    keys: Option<String>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[structopt(long, parse(from_os_str))]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>, interactive: bool) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr would draw over the alternate screen
        None if interactive => {
            builder.filter_level(LevelFilter::Off);
        }
        None => {}
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::from_args();
    init_logging(cli.log_file.as_ref(), cli.keys.is_none())?;

    let mut page = match &cli.markup {
        Some(path) => Page::load(path)
            .with_context(|| format!("Failed to load markup from {}", path.display()))?,
        None if cli.vertical => Page::parse(VERTICAL_PAGE)?,
        None => Page::parse(BASE_PAGE)?,
    };

    let mut settings = TabSettings::new().with_selected_class(cli.selected_class.clone());
    if let Some(index) = cli.active {
        settings = settings.with_initial_index(index);
    }
    let tabs = page
        .mount(&cli.tablist, &cli.panels, &settings)
        .context("Failed to set up tabs")?;

    let mut app = App::new(page, tabs);

    if let Some(script) = &cli.keys {
        for name in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            app.press(&Key::from(name));
            info!("{}", app.status());
        }
        println!("{}", app.page().describe());
        return Ok(());
    }

    run_tui(&mut app)
}

fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_input(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
