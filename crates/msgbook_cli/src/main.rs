//! Terminal front end for msgbook.
//!
//! # Responsibility
//! - Present the three views as line-driven menus.
//! - Resolve host configuration (store path, log directory) from the
//!   environment and hand it to the core.

use log::error;
use msgbook_core::{
    default_log_level, init_logging, resolve_store_path, Activation, AppConfig, Application,
    ListOutcome, MessageRepository, MessageRow, Notice, Presenter, StoreConfig, ViewName,
    COLUMN_HEADINGS,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const DB_PATH_ENV: &str = "MSGBOOK_DB_PATH";
const LOG_DIR_ENV: &str = "MSGBOOK_LOG_DIR";

fn main() -> ExitCode {
    if let Some(log_dir) = env_value(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("msgbook: logging disabled: {err}");
        }
    }

    let store_path = env_value(DB_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| resolve_store_path(None));
    let config = AppConfig::new(StoreConfig::new(store_path));

    let mut app = match Application::open(&config) {
        Ok(app) => app,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={err}");
            eprintln!("msgbook: cannot open store: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut presenter = TerminalPresenter::new(io::stdout());
    match run(&mut app, stdin.lock(), &mut presenter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("msgbook: terminal error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Writes activations and notices to a terminal stream.
struct TerminalPresenter<W: Write> {
    out: W,
    // Presenter hooks cannot return errors; the first one is kept here.
    write_error: Option<io::Error>,
}

impl<W: Write> TerminalPresenter<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            write_error: None,
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.write_error.get_or_insert(err);
        }
    }

    fn check(&mut self) -> io::Result<()> {
        match self.write_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn render_menu(&mut self, view: ViewName) -> io::Result<()> {
        let options = match view {
            ViewName::MainMenu => "[1] Add data  [2] View data  [q] Quit",
            ViewName::InputData => "[a] Input data  [b] Back",
            ViewName::ViewData => "[u] Update  [b] Back",
        };
        writeln!(self.out, "{options}")?;
        write!(self.out, "> ")?;
        self.out.flush()
    }

    fn render_rows(&mut self, rows: &[MessageRow]) -> io::Result<()> {
        writeln!(
            self.out,
            "{:<6} {:<32} {:<16} {}",
            COLUMN_HEADINGS[0], COLUMN_HEADINGS[1], COLUMN_HEADINGS[2], COLUMN_HEADINGS[3]
        )?;
        for row in rows {
            writeln!(
                self.out,
                "{:<6} {:<32} {:<16} {}",
                row.id, row.content, row.author, row.created
            )?;
        }
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn activate(&mut self, activation: &Activation) {
        let result = writeln!(
            self.out,
            "\n== {} == ({})",
            activation.view.title(),
            activation.geometry
        );
        self.record(result);
    }

    fn notify(&mut self, notice: Notice) {
        let label = if notice.is_error() { "ERROR" } else { "INFO" };
        let result = writeln!(self.out, "{label}: {}", notice.text());
        self.record(result);
    }
}

/// Drives the session until the user quits or input ends.
fn run<R, I, W>(
    app: &mut Application<R>,
    mut input: I,
    presenter: &mut TerminalPresenter<W>,
) -> io::Result<()>
where
    R: MessageRepository,
    I: BufRead,
    W: Write,
{
    app.navigate_to(ViewName::MainMenu, presenter);

    while app.is_running() {
        presenter.check()?;
        presenter.render_menu(app.active_view())?;
        let Some(command) = read_line(&mut input)? else {
            app.quit();
            break;
        };

        match (app.active_view(), command.trim()) {
            (ViewName::MainMenu, "1") => {
                app.navigate_to(ViewName::InputData, presenter);
            }
            (ViewName::MainMenu, "2") => {
                app.navigate_to(ViewName::ViewData, presenter);
            }
            (ViewName::MainMenu, "q") => app.quit(),
            (ViewName::InputData, "a") => {
                write!(presenter.out, "Message: ")?;
                presenter.out.flush()?;
                let content = read_line(&mut input)?.unwrap_or_default();
                write!(presenter.out, "Author: ")?;
                presenter.out.flush()?;
                let author = read_line(&mut input)?.unwrap_or_default();
                app.submit(&content, &author, presenter);
            }
            (ViewName::ViewData, "u") => {
                if let ListOutcome::Refreshed(rows) = app.refresh(presenter) {
                    presenter.render_rows(&rows)?;
                }
            }
            (ViewName::InputData | ViewName::ViewData, "b") => {
                app.navigate_to(ViewName::MainMenu, presenter);
            }
            (_, other) => writeln!(presenter.out, "Unknown option `{other}`.")?,
        }
    }

    presenter.check()
}

fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
