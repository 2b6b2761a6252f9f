//! Active-view registry.
//!
//! # Responsibility
//! - Hold the single active view.
//! - Invoke the presentation hook once per navigation, before returning.
//!
//! # Invariants
//! - Exactly one view is active at every observable instant.
//! - A failed navigation leaves the active view unchanged and runs no hook.
//! - Navigating to the already-active view is a full transition and still
//!   runs the hook.

use super::view::{NavigationError, ViewName};
use crate::config::{GeometryConfig, WindowGeometry};
use log::debug;

/// What a view needs to know when it becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub view: ViewName,
    pub geometry: WindowGeometry,
}

/// Per-transition refresh hook supplied by the presentation layer.
pub trait ViewHook {
    fn on_activate(&mut self, activation: &Activation);
}

impl<F: FnMut(&Activation)> ViewHook for F {
    fn on_activate(&mut self, activation: &Activation) {
        self(activation)
    }
}

/// Single source of truth for which view is presented.
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    active: ViewName,
    geometry: GeometryConfig,
    transitions: u64,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new(GeometryConfig::default())
    }
}

impl ViewRegistry {
    /// Creates a registry with `MainMenu` active.
    ///
    /// No hook runs here; hosts perform the initial navigation themselves
    /// once their presentation layer exists.
    pub fn new(geometry: GeometryConfig) -> Self {
        Self {
            active: ViewName::MainMenu,
            geometry,
            transitions: 0,
        }
    }

    pub fn active(&self) -> ViewName {
        self.active
    }

    pub fn is_active(&self, view: ViewName) -> bool {
        self.active == view
    }

    /// Number of completed navigations since construction.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    pub fn activation_for(&self, view: ViewName) -> Activation {
        Activation {
            view,
            geometry: self.geometry.for_view(view),
        }
    }

    /// Makes `target` active and runs `hook` exactly once.
    pub fn navigate_to<H: ViewHook + ?Sized>(
        &mut self,
        target: ViewName,
        hook: &mut H,
    ) -> Activation {
        let from = self.active;
        self.active = target;
        self.transitions += 1;
        debug!(
            "event=view_navigate module=navigation status=ok from={from} to={target} transition={}",
            self.transitions
        );

        let activation = self.activation_for(target);
        hook.on_activate(&activation);
        activation
    }

    /// Navigates by name; fails with `UnknownView` for unregistered names.
    pub fn navigate_to_named<H: ViewHook + ?Sized>(
        &mut self,
        name: &str,
        hook: &mut H,
    ) -> Result<Activation, NavigationError> {
        let target = name.parse::<ViewName>()?;
        Ok(self.navigate_to(target, hook))
    }
}

#[cfg(test)]
mod tests {
    use super::{Activation, ViewRegistry};
    use crate::config::WindowGeometry;
    use crate::navigation::{NavigationError, ViewName};

    #[test]
    fn starts_on_main_menu_without_running_hook() {
        let registry = ViewRegistry::default();
        assert_eq!(registry.active(), ViewName::MainMenu);
        assert_eq!(registry.transition_count(), 0);
    }

    #[test]
    fn hook_runs_once_per_navigation_with_target_geometry() {
        let mut registry = ViewRegistry::default();
        let mut seen: Vec<Activation> = Vec::new();
        let mut hook = |activation: &Activation| seen.push(*activation);

        registry.navigate_to(ViewName::ViewData, &mut hook);
        registry.navigate_to(ViewName::ViewData, &mut hook);
        registry.navigate_to(ViewName::MainMenu, &mut hook);

        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].view, ViewName::ViewData);
        assert_eq!(seen[0].geometry, WindowGeometry::new(800, 400));
        assert_eq!(seen[2].geometry, WindowGeometry::new(400, 300));
        assert_eq!(registry.transition_count(), 3);
    }

    #[test]
    fn unknown_name_keeps_active_view_and_skips_hook() {
        let mut registry = ViewRegistry::default();
        let mut calls = 0;
        let mut hook = |_: &Activation| calls += 1;
        registry.navigate_to(ViewName::InputData, &mut hook);

        let err = registry
            .navigate_to_named("NoSuchView", &mut hook)
            .unwrap_err();

        assert_eq!(err, NavigationError::UnknownView("NoSuchView".to_string()));
        assert_eq!(registry.active(), ViewName::InputData);
        assert_eq!(calls, 1);
    }
}
