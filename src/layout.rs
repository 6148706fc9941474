//! Layout controller - the dock layout state machine
//!
//! Applies show/hide/lock/tabs/responsive/restore operations over the
//! panel registry and tracks which logical layout state the window is in.
//! Responsive (compact) mode collapses lower-priority panels into tabs
//! and keeps a snapshot of the pre-responsive arrangement so leaving the
//! mode restores the user's layout exactly.

use crate::error::WorkbenchError;
use crate::panel::{DockArea, PanelId, PanelRegistry};

/// Logical width one expanded panel consumes in compact mode
pub const COMPACT_PANEL_WIDTH: u32 = 320;

/// The logical layout states the window moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// Panels per the application-defined default set
    Default,
    /// The user has toggled at least one panel away from the defaults
    Custom,
    /// Every panel hidden
    AllHidden,
    /// Compact reflow active
    Responsive,
    /// Docks stacked as tabs
    TabsStacked,
}

/// Pre-responsive arrangement, restored exactly on leaving the mode
#[derive(Debug, Clone)]
struct ResponsiveSnapshot {
    panels: Vec<(PanelId, bool, DockArea)>,
    prior_state: LayoutState,
}

/// Policy layer over the panel registry
#[derive(Debug)]
pub struct LayoutController {
    state: LayoutState,
    locked: bool,
    tabs_mode: bool,
    responsive: bool,
    snapshot: Option<ResponsiveSnapshot>,
    tabs_prior: Option<LayoutState>,
    /// Most-recently-shown panels, front = newest
    mru: Vec<PanelId>,
}

impl Default for LayoutController {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutController {
    pub fn new() -> Self {
        Self {
            state: LayoutState::Default,
            locked: false,
            tabs_mode: false,
            responsive: false,
            snapshot: None,
            tabs_prior: None,
            mru: Vec::new(),
        }
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn tabs_mode(&self) -> bool {
        self.tabs_mode
    }

    pub fn is_responsive(&self) -> bool {
        self.responsive
    }

    /// Force every panel's visibility to its default value
    ///
    /// Idempotent; state becomes `Default`.
    pub fn show_default_docks(
        &mut self,
        registry: &mut PanelRegistry,
    ) -> Result<(), WorkbenchError> {
        if self.locked {
            return Err(WorkbenchError::LayoutLocked);
        }
        for id in registry.ids() {
            let target = registry.get(&id).map(|p| p.default_visible).unwrap_or(false);
            registry.set_visible(&id, target)?;
        }
        self.state = LayoutState::Default;
        Ok(())
    }

    /// Hide every panel; defaults and the lock flag are untouched
    pub fn hide_all_docks(&mut self, registry: &mut PanelRegistry) -> Result<(), WorkbenchError> {
        if self.locked {
            return Err(WorkbenchError::LayoutLocked);
        }
        for id in registry.ids() {
            registry.set_visible(&id, false)?;
        }
        self.state = LayoutState::AllHidden;
        Ok(())
    }

    /// Show or hide one panel at the user's request
    pub fn set_visible(
        &mut self,
        registry: &mut PanelRegistry,
        id: &PanelId,
        visible: bool,
    ) -> Result<(), WorkbenchError> {
        if self.locked {
            return Err(WorkbenchError::LayoutLocked);
        }
        let changed = registry.set_visible(id, visible)?;
        if changed {
            if visible {
                self.note_used(id);
            }
            if self.responsive {
                // Remember that the layout under the responsive overlay is
                // customized now, so leaving the mode lands in Custom.
                if let Some(snapshot) = self.snapshot.as_mut() {
                    snapshot.prior_state = LayoutState::Custom;
                    if let Some(entry) = snapshot.panels.iter_mut().find(|(pid, _, _)| pid == id)
                    {
                        entry.1 = visible;
                    }
                }
            } else {
                self.state = LayoutState::Custom;
            }
        }
        Ok(())
    }

    /// Toggle one panel (menu action behavior)
    pub fn toggle(
        &mut self,
        registry: &mut PanelRegistry,
        id: &PanelId,
    ) -> Result<(), WorkbenchError> {
        let target = !registry.is_visible(id);
        // Distinguish UnknownPanel from a plain hide of an absent panel.
        if !registry.contains(id) {
            return Err(WorkbenchError::UnknownPanel(id.clone()));
        }
        self.set_visible(registry, id, target)
    }

    /// Set the global layout lock
    ///
    /// While locked, visibility and position mutations are rejected with
    /// `LayoutLocked`. Locking never changes which panels are visible.
    pub fn lock_unlock(&mut self, registry: &mut PanelRegistry, locked: bool) {
        self.locked = locked;
        registry.set_all_locked(locked);
        tracing::debug!(locked, "layout lock toggled");
    }

    /// Stack docks as tabs (or unstack them)
    pub fn toggle_tabs(&mut self, on: bool) -> Result<(), WorkbenchError> {
        if self.locked {
            return Err(WorkbenchError::LayoutLocked);
        }
        if on == self.tabs_mode {
            return Ok(());
        }
        self.tabs_mode = on;
        if on {
            self.tabs_prior = Some(self.state);
            self.state = LayoutState::TabsStacked;
        } else if self.state == LayoutState::TabsStacked {
            self.state = self.tabs_prior.take().unwrap_or(LayoutState::Custom);
        }
        Ok(())
    }

    /// Enter or leave responsive (compact) mode
    ///
    /// Entering snapshots the current arrangement and collapses panels
    /// exceeding the compact width budget into tabs; the most-recently
    /// used visible panel stays expanded, then panels in priority order
    /// (Disassembly > Graph > Hexdump > registration order). Leaving
    /// restores the snapshot exactly. Window-driven, so exempt from the
    /// layout lock.
    pub fn toggle_responsive(
        &mut self,
        registry: &mut PanelRegistry,
        on: bool,
        window_width: u32,
    ) {
        if on == self.responsive {
            return;
        }
        if on {
            self.enter_responsive(registry, window_width);
        } else {
            self.leave_responsive(registry);
        }
    }

    fn enter_responsive(&mut self, registry: &mut PanelRegistry, window_width: u32) {
        let panels: Vec<(PanelId, bool, DockArea)> = registry
            .iter()
            .map(|p| (p.id.clone(), p.visible, p.area))
            .collect();
        self.snapshot = Some(ResponsiveSnapshot {
            panels,
            prior_state: self.state,
        });

        let expanded_budget = (window_width / COMPACT_PANEL_WIDTH).max(1) as usize;
        let order = self.collapse_order(registry);
        for (slot, id) in order.iter().enumerate() {
            if let Some(panel) = registry.get_mut(id) {
                if slot >= expanded_budget {
                    panel.area = DockArea::Tabbed;
                }
            }
        }
        self.responsive = true;
        self.state = LayoutState::Responsive;
        tracing::info!(window_width, expanded_budget, "responsive mode entered");
    }

    fn leave_responsive(&mut self, registry: &mut PanelRegistry) {
        let Some(snapshot) = self.snapshot.take() else {
            // Responsive flag restored from disk without a live snapshot;
            // fall back to the defaults rather than guess positions.
            self.responsive = false;
            self.state = LayoutState::Custom;
            return;
        };
        for (id, visible, area) in &snapshot.panels {
            let _ = registry.set_visible(id, *visible);
            if let Some(panel) = registry.get_mut(id) {
                panel.area = *area;
            }
        }
        self.responsive = false;
        self.state = snapshot.prior_state;
        tracing::info!("responsive mode left; layout restored");
    }

    /// Deterministic expansion order for responsive collapse
    ///
    /// Visible panels only: the MRU panel first, then by kind priority,
    /// ties broken by registration order.
    fn collapse_order(&self, registry: &PanelRegistry) -> Vec<PanelId> {
        let mru_visible = self
            .mru
            .iter()
            .find(|id| registry.is_visible(id))
            .cloned();

        let mut ranked: Vec<(u8, usize, PanelId)> = registry
            .iter()
            .enumerate()
            .filter(|(_, p)| p.visible && Some(&p.id) != mru_visible.as_ref())
            .map(|(index, p)| (p.kind.responsive_priority(), index, p.id.clone()))
            .collect();
        ranked.sort();

        let mut order: Vec<PanelId> = Vec::with_capacity(ranked.len() + 1);
        if let Some(id) = mru_visible {
            order.push(id);
        }
        order.extend(ranked.into_iter().map(|(_, _, id)| id));
        order
    }

    /// Discard all customization and re-apply the default layout
    ///
    /// `show_default_docks` plus clearing the responsive snapshot, tabs
    /// mode and panel positions.
    pub fn restore_docks(&mut self, registry: &mut PanelRegistry) -> Result<(), WorkbenchError> {
        if self.locked {
            return Err(WorkbenchError::LayoutLocked);
        }
        self.snapshot = None;
        self.responsive = false;
        self.tabs_mode = false;
        self.tabs_prior = None;
        self.mru.clear();
        for id in registry.ids() {
            if let Some(panel) = registry.get_mut(&id) {
                panel.area = panel.kind.default_area();
            }
        }
        self.show_default_docks(registry)?;
        registry.notify_layout_reset();
        Ok(())
    }

    /// Record that a panel was brought to the user's attention
    pub fn note_used(&mut self, id: &PanelId) {
        self.mru.retain(|existing| existing != id);
        self.mru.insert(0, id.clone());
    }

    /// "Currently visible panels" checklist for the view menu
    pub fn checklist(&self, registry: &PanelRegistry) -> Vec<(PanelId, bool)> {
        registry
            .iter()
            .map(|p| (p.id.clone(), p.visible))
            .collect()
    }

    // --- session-restore plumbing (bypasses lock and Custom tracking) ---

    /// Apply a persisted visibility value without state-machine side effects
    pub(crate) fn restore_visibility(
        &mut self,
        registry: &mut PanelRegistry,
        id: &PanelId,
        visible: bool,
    ) -> Result<(), WorkbenchError> {
        registry.set_visible(id, visible)?;
        Ok(())
    }

    /// Apply persisted flags after a project load
    pub(crate) fn restore_flags(
        &mut self,
        registry: &mut PanelRegistry,
        locked: bool,
        tabs_mode: bool,
        responsive: bool,
    ) {
        self.locked = locked;
        registry.set_all_locked(locked);
        self.tabs_mode = tabs_mode;
        self.responsive = responsive;
        self.snapshot = None;
        self.tabs_prior = None;
    }

    /// Re-derive the logical state from the registry after a load
    pub(crate) fn refresh_state_from(&mut self, registry: &PanelRegistry) {
        self.state = if self.responsive {
            LayoutState::Responsive
        } else if self.tabs_mode {
            LayoutState::TabsStacked
        } else if registry.iter().all(|p| !p.visible) && !registry.is_empty() {
            LayoutState::AllHidden
        } else if registry.iter().all(|p| p.visible == p.default_visible) {
            LayoutState::Default
        } else {
            LayoutState::Custom
        };
    }
}
