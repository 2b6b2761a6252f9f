//! Application session wiring store, navigation and controllers.
//!
//! # Responsibility
//! - Construct the store and registry once and hand them to controllers.
//! - Route presentation events to the right controller.
//! - Report every outcome to the presentation layer as a notice.
//!
//! # Invariants
//! - Views reach the store only through controllers.
//! - Storage failures are reported, never propagated as panics.

use crate::config::AppConfig;
use crate::controller::input_controller::{InputController, SubmitOutcome};
use crate::controller::list_controller::{ListController, ListOutcome, MessageRow};
use crate::controller::Notice;
use crate::navigation::{Activation, NavigationError, ViewName, ViewRegistry};
use crate::repo::message_store::{MessageRepository, SqliteMessageStore, StorageResult};
use log::info;

/// Presentation-layer collaborator.
pub trait Presenter {
    /// Called once per navigation, after the view became active.
    fn activate(&mut self, activation: &Activation);
    /// Shows a blocking notice.
    fn notify(&mut self, notice: Notice);
}

/// One running session of the tool.
pub struct Application<R: MessageRepository> {
    registry: ViewRegistry,
    input: InputController<R>,
    list: ListController<R>,
    running: bool,
}

impl Application<SqliteMessageStore> {
    /// Opens the configured SQLite store and starts on the main menu.
    pub fn open(config: &AppConfig) -> StorageResult<Self> {
        let store = SqliteMessageStore::new(config.store.clone());
        info!(
            "event=app_open module=app status=start store_path={}",
            store.path().display()
        );
        Self::with_store(store, ViewRegistry::new(config.geometry))
    }
}

impl<R: MessageRepository + Clone> Application<R> {
    /// Initializes `store` and wires both controllers to it.
    pub fn with_store(store: R, registry: ViewRegistry) -> StorageResult<Self> {
        store.initialize()?;
        Ok(Self {
            registry,
            input: InputController::new(store.clone()),
            list: ListController::new(store),
            running: true,
        })
    }
}

impl<R: MessageRepository> Application<R> {
    pub fn active_view(&self) -> ViewName {
        self.registry.active()
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rows the list view currently shows.
    pub fn rows(&self) -> &[MessageRow] {
        self.list.rows()
    }

    pub fn navigate_to<P: Presenter + ?Sized>(
        &mut self,
        view: ViewName,
        presenter: &mut P,
    ) -> Activation {
        self.registry
            .navigate_to(view, &mut |activation: &Activation| presenter.activate(activation))
    }

    pub fn navigate_to_named<P: Presenter + ?Sized>(
        &mut self,
        name: &str,
        presenter: &mut P,
    ) -> Result<Activation, NavigationError> {
        self.registry
            .navigate_to_named(name, &mut |activation: &Activation| {
                presenter.activate(activation)
            })
    }

    pub fn submit<P: Presenter + ?Sized>(
        &mut self,
        content: &str,
        author: &str,
        presenter: &mut P,
    ) -> SubmitOutcome {
        let outcome = self.input.submit(content, author);
        presenter.notify(outcome.notice());
        outcome
    }

    pub fn refresh<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> ListOutcome {
        let outcome = self.list.refresh();
        if let Some(notice) = outcome.notice() {
            presenter.notify(notice);
        }
        outcome
    }

    /// Ends the session. The store holds no open resource between calls.
    pub fn quit(&mut self) {
        if self.running {
            info!(
                "event=app_quit module=app status=ok transitions={}",
                self.registry.transition_count()
            );
        }
        self.running = false;
    }
}
