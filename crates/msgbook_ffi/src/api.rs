//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose navigation, submit and refresh to Dart via FRB.
//! - Own the one application session the UI drives.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call that needs a session fails softly until `app_open` succeeded.

use log::warn;
use msgbook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, Activation,
    AppConfig, Application, ListOutcome, MessageRow, Notice, Presenter, SqliteMessageStore,
    StoreConfig, SubmitOutcome,
};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

const DB_PATH_ENV: &str = "MSGBOOK_DB_PATH";

static SESSION: Lazy<Mutex<Option<Session>>> = Lazy::new(|| Mutex::new(None));

struct Session {
    app: Application<SqliteMessageStore>,
    presenter: BridgePresenter,
}

/// Collects what the core asks the UI to do during one call.
#[derive(Default)]
struct BridgePresenter {
    last_activation: Option<Activation>,
    last_notice: Option<Notice>,
}

impl Presenter for BridgePresenter {
    fn activate(&mut self, activation: &Activation) {
        self.last_activation = Some(*activation);
    }

    fn notify(&mut self, notice: Notice) {
        self.last_notice = Some(notice);
    }
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Human-readable notice for the UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationResponse {
    pub ok: bool,
    /// Active view after the call (`MainMenu|InputData|ViewData`).
    pub view: String,
    /// Window size the activated view asks for; zero on failure.
    pub width: u32,
    pub height: u32,
    pub message: String,
}

/// Result of a submit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub ok: bool,
    /// Whether the form should clear its fields.
    pub clear_input: bool,
    pub message_id: Option<i64>,
    pub message: String,
}

/// One row of the message table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageItem {
    pub id: String,
    pub content: String,
    pub author: String,
    pub created: String,
}

/// Result of a refresh request.
///
/// On failure `items` holds the rows that were displayed before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse {
    pub ok: bool,
    pub items: Vec<MessageItem>,
    pub message: String,
}

/// Opens the message store and starts a session on the main menu.
///
/// `db_path` wins over `MSGBOOK_DB_PATH`, which wins over `database.db`
/// next to the executable. Re-opening replaces the current session.
#[flutter_rust_bridge::frb(sync)]
pub fn app_open(db_path: Option<String>) -> ActionResponse {
    let store_path = resolve_db_path(db_path);
    let config = AppConfig::new(StoreConfig::new(store_path.clone()));
    match Application::open(&config) {
        Ok(app) => {
            *lock_session() = Some(Session {
                app,
                presenter: BridgePresenter::default(),
            });
            ActionResponse::success(format!("Store ready at {}.", store_path.display()))
        }
        Err(err) => ActionResponse::failure(format!("app_open failed: {err}")),
    }
}

/// Makes `view` active and returns the geometry it asks for.
#[flutter_rust_bridge::frb(sync)]
pub fn navigate_to(view: String) -> NavigationResponse {
    let failure = |view: String, message: String| NavigationResponse {
        ok: false,
        view,
        width: 0,
        height: 0,
        message,
    };

    let mut guard = lock_session();
    let Some(session) = guard.as_mut() else {
        return failure(String::new(), "navigate_to failed: session not open".to_string());
    };

    match session
        .app
        .navigate_to_named(view.as_str(), &mut session.presenter)
    {
        Ok(activation) => NavigationResponse {
            ok: true,
            view: activation.view.to_string(),
            width: activation.geometry.width,
            height: activation.geometry.height,
            message: String::new(),
        },
        Err(err) => {
            warn!("event=ffi_navigate module=ffi status=error error={err}");
            failure(
                session.app.active_view().to_string(),
                format!("navigate_to failed: {err}"),
            )
        }
    }
}

/// Name of the active view, or empty when no session is open.
#[flutter_rust_bridge::frb(sync)]
pub fn active_view() -> String {
    lock_session()
        .as_ref()
        .map(|session| session.app.active_view().to_string())
        .unwrap_or_default()
}

/// Submits one message from the input form.
#[flutter_rust_bridge::frb(sync)]
pub fn submit_message(content: String, author: String) -> SubmitResponse {
    let mut guard = lock_session();
    let Some(session) = guard.as_mut() else {
        return SubmitResponse {
            ok: false,
            clear_input: false,
            message_id: None,
            message: "submit_message failed: session not open".to_string(),
        };
    };

    let outcome = session
        .app
        .submit(content.as_str(), author.as_str(), &mut session.presenter);
    let message = session
        .presenter
        .last_notice
        .take()
        .map(|notice| notice.text().to_string())
        .unwrap_or_default();
    let message_id = match outcome {
        SubmitOutcome::Submitted(id) => Some(id.0),
        _ => None,
    };

    SubmitResponse {
        ok: outcome.is_submitted(),
        clear_input: outcome.clears_input(),
        message_id,
        message,
    }
}

/// Re-reads every message for the list view.
#[flutter_rust_bridge::frb(sync)]
pub fn refresh_messages() -> ListResponse {
    let mut guard = lock_session();
    let Some(session) = guard.as_mut() else {
        return ListResponse {
            ok: false,
            items: Vec::new(),
            message: "refresh_messages failed: session not open".to_string(),
        };
    };

    match session.app.refresh(&mut session.presenter) {
        ListOutcome::Refreshed(rows) => ListResponse {
            ok: true,
            message: format!("{} message(s).", rows.len()),
            items: rows.iter().map(to_message_item).collect(),
        },
        ListOutcome::Failed(_) => ListResponse {
            ok: false,
            items: session.app.rows().iter().map(to_message_item).collect(),
            message: session
                .presenter
                .last_notice
                .take()
                .map(|notice| notice.text().to_string())
                .unwrap_or_default(),
        },
    }
}

/// Ends the session.
#[flutter_rust_bridge::frb(sync)]
pub fn app_quit() {
    if let Some(mut session) = lock_session().take() {
        session.app.quit();
    }
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    // A panic while holding the lock cannot leave the session half-updated;
    // every mutation is a single assignment.
    SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn resolve_db_path(explicit: Option<String>) -> PathBuf {
    let from_env = std::env::var(DB_PATH_ENV).ok();
    for candidate in [explicit, from_env].into_iter().flatten() {
        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from));
    msgbook_core::resolve_store_path(exe_dir.as_deref())
}

fn to_message_item(row: &MessageRow) -> MessageItem {
    MessageItem {
        id: row.id.clone(),
        content: row.content.clone(),
        author: row.author.clone(),
        created: row.created.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        active_view, app_open, app_quit, core_version, init_logging, navigate_to,
        refresh_messages, resolve_db_path, submit_message,
    };

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn explicit_db_path_wins() {
        assert_eq!(
            resolve_db_path(Some(" /data/msgbook.db ".to_string())),
            std::path::PathBuf::from("/data/msgbook.db")
        );
    }

    // One test owns the process-wide session to avoid cross-test races.
    #[test]
    fn session_flow_over_ffi() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("database.db");

        let opened = app_open(Some(db_path.to_str().unwrap().to_string()));
        assert!(opened.ok, "{}", opened.message);
        assert_eq!(active_view(), "MainMenu");

        let nav = navigate_to("InputData".to_string());
        assert!(nav.ok);
        assert_eq!((nav.width, nav.height), (400, 300));

        let rejected = submit_message("   ".to_string(), "ada".to_string());
        assert!(!rejected.ok);
        assert!(!rejected.clear_input);
        assert_eq!(rejected.message, "Both values need to be present.");

        let submitted = submit_message("hello\n".to_string(), "ada".to_string());
        assert!(submitted.ok, "{}", submitted.message);
        assert!(submitted.clear_input);
        assert!(submitted.message_id.is_some());

        let nav = navigate_to("ViewData".to_string());
        assert_eq!((nav.width, nav.height), (800, 400));
        let listed = refresh_messages();
        assert!(listed.ok);
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].content, "hello");

        let bad = navigate_to("NoSuchView".to_string());
        assert!(!bad.ok);
        assert_eq!(bad.view, "ViewData");
        assert_eq!(active_view(), "ViewData");

        app_quit();
        assert_eq!(active_view(), "");
        assert!(!refresh_messages().ok);
    }
}
