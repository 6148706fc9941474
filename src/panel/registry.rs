//! Panel registry - the set of dockable panels and their observers
//!
//! The registry is the single owner of panel state. The layout controller
//! and session store mutate panels only through this API and never hold a
//! competing copy. Observers (the thin view widgets) are notified of
//! cursor and visibility changes synchronously, in registration order.

use crate::error::WorkbenchError;
use crate::panel::{Panel, PanelId};

/// Interface panels implement to follow workbench state
///
/// Callbacks run synchronously on the UI thread, in registration order,
/// and must not block. A panel reacting to a cursor change by wanting a
/// different cursor returns the request from `cursor_changed`; the
/// request is queued and applied after the in-flight broadcast completes,
/// never inline.
pub trait PanelObserver {
    /// The global cursor moved to `address`
    fn cursor_changed(&mut self, _address: u64) -> Option<u64> {
        None
    }

    /// Panel `id` was shown or hidden
    fn visibility_changed(&mut self, _id: &PanelId, _visible: bool) {}

    /// The whole layout was reset or reloaded; re-read everything
    fn layout_reset(&mut self) {}
}

struct Entry {
    panel: Panel,
    observer: Option<Box<dyn PanelObserver>>,
}

/// Ordered collection of all dockable panels
///
/// Registration order is significant: it is the notification order and
/// the responsive-collapse tie-break order.
pub struct PanelRegistry {
    entries: Vec<Entry>,
    tearing_down: bool,
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            tearing_down: false,
        }
    }

    /// Registry pre-populated with every standard panel kind
    pub fn with_standard_panels() -> Self {
        let mut registry = Self::new();
        for kind in crate::panel::PanelKind::STANDARD {
            // Standard ids are unique by construction
            let _ = registry.register(Panel::of_kind(kind));
        }
        registry
    }

    /// Register a panel; fails on duplicate id
    pub fn register(&mut self, panel: Panel) -> Result<(), WorkbenchError> {
        if self.contains(&panel.id) {
            return Err(WorkbenchError::DuplicateId(panel.id));
        }
        tracing::debug!(id = %panel.id, kind = ?panel.kind, "panel registered");
        self.entries.push(Entry {
            panel,
            observer: None,
        });
        Ok(())
    }

    /// Attach the view-side observer for a registered panel
    pub fn attach_observer(
        &mut self,
        id: &PanelId,
        observer: Box<dyn PanelObserver>,
    ) -> Result<(), WorkbenchError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.panel.id == *id)
            .ok_or_else(|| WorkbenchError::UnknownPanel(id.clone()))?;
        entry.observer = Some(observer);
        Ok(())
    }

    pub fn contains(&self, id: &PanelId) -> bool {
        self.entries.iter().any(|e| e.panel.id == *id)
    }

    pub fn get(&self, id: &PanelId) -> Option<&Panel> {
        self.entries.iter().map(|e| &e.panel).find(|p| p.id == *id)
    }

    pub(crate) fn get_mut(&mut self, id: &PanelId) -> Option<&mut Panel> {
        self.entries
            .iter_mut()
            .map(|e| &mut e.panel)
            .find(|p| p.id == *id)
    }

    pub fn is_visible(&self, id: &PanelId) -> bool {
        self.get(id).map(|p| p.visible).unwrap_or(false)
    }

    /// Panels in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.entries.iter().map(|e| &e.panel)
    }

    /// Ids in registration order
    pub fn ids(&self) -> Vec<PanelId> {
        self.entries.iter().map(|e| e.panel.id.clone()).collect()
    }

    /// Ids of currently visible panels, in registration order
    pub fn visible_ids(&self) -> Vec<PanelId> {
        self.entries
            .iter()
            .filter(|e| e.panel.visible)
            .map(|e| e.panel.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set a panel's visibility and notify all observers if it changed
    ///
    /// Returns whether the flag actually flipped. Lock enforcement is the
    /// layout controller's job; this is the raw registry mutation.
    pub(crate) fn set_visible(
        &mut self,
        id: &PanelId,
        visible: bool,
    ) -> Result<bool, WorkbenchError> {
        let panel = self
            .get_mut(id)
            .ok_or_else(|| WorkbenchError::UnknownPanel(id.clone()))?;
        if panel.visible == visible {
            return Ok(false);
        }
        panel.visible = visible;
        tracing::debug!(id = %id, visible, "panel visibility changed");
        let id = id.clone();
        for entry in &mut self.entries {
            if let Some(observer) = entry.observer.as_mut() {
                observer.visibility_changed(&id, visible);
            }
        }
        Ok(true)
    }

    /// Mirror the global lock flag onto every panel
    pub(crate) fn set_all_locked(&mut self, locked: bool) {
        for entry in &mut self.entries {
            entry.panel.locked = locked;
        }
    }

    /// Broadcast a cursor change; collects queued follow-up requests
    ///
    /// Every observer sees the fully-applied address before any follow-up
    /// request from an earlier observer is acted on.
    pub(crate) fn notify_cursor(&mut self, address: u64) -> Vec<u64> {
        let mut follow_ups = Vec::new();
        for entry in &mut self.entries {
            if let Some(observer) = entry.observer.as_mut() {
                if let Some(requested) = observer.cursor_changed(address) {
                    follow_ups.push(requested);
                }
            }
        }
        follow_ups
    }

    /// Tell every observer the layout was reset or reloaded
    pub(crate) fn notify_layout_reset(&mut self) {
        for entry in &mut self.entries {
            if let Some(observer) = entry.observer.as_mut() {
                observer.layout_reset();
            }
        }
    }

    /// Mark the registry as tearing down; `remove` is only legal after this
    pub fn begin_teardown(&mut self) {
        self.tearing_down = true;
    }

    pub fn is_tearing_down(&self) -> bool {
        self.tearing_down
    }

    /// Remove a panel during window teardown
    pub fn remove(&mut self, id: &PanelId) -> Result<(), WorkbenchError> {
        if !self.tearing_down {
            debug_assert!(false, "panel removed outside teardown: {}", id);
            return Err(WorkbenchError::InvalidState);
        }
        let index = self
            .entries
            .iter()
            .position(|e| e.panel.id == *id)
            .ok_or_else(|| WorkbenchError::UnknownPanel(id.clone()))?;
        self.entries.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelKind;

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = PanelRegistry::new();
        registry.register(Panel::of_kind(PanelKind::Strings)).unwrap();
        let err = registry
            .register(Panel::of_kind(PanelKind::Strings))
            .unwrap_err();
        assert!(matches!(err, WorkbenchError::DuplicateId(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_set_visible_unknown_panel() {
        let mut registry = PanelRegistry::new();
        let err = registry
            .set_visible(&PanelId::from("nope"), true)
            .unwrap_err();
        assert!(matches!(err, WorkbenchError::UnknownPanel(_)));
    }

    #[test]
    fn test_set_visible_reports_change() {
        let mut registry = PanelRegistry::with_standard_panels();
        let id = PanelId::from("strings");
        assert!(registry.set_visible(&id, true).unwrap());
        assert!(!registry.set_visible(&id, true).unwrap());
        assert!(registry.is_visible(&id));
    }

    #[test]
    fn test_remove_requires_teardown() {
        let mut registry = PanelRegistry::with_standard_panels();
        let id = PanelId::from("notepad");
        // Outside teardown the removal is rejected (debug builds assert).
        if !cfg!(debug_assertions) {
            assert!(registry.remove(&id).is_err());
        }
        registry.begin_teardown();
        registry.remove(&id).unwrap();
        assert!(!registry.contains(&id));
    }
}
