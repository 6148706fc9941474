//! Panel system - dockable panel identity, state and observation
//!
//! A panel is one dockable UI region bound to a single analysis view
//! (disassembly, hexdump, strings, ...). The window controller never
//! references concrete panel widgets; it addresses panels through the
//! registry by stable id.
//!
//! ## Architecture
//!
//! - `PanelId`: stable string key, the sole identity used for persistence
//! - `PanelKind`: which analysis view the panel renders (policy only)
//! - `DockArea`: opaque layout position token
//! - `Panel`: per-panel record {visible, locked, default_visible, area}
//! - `PanelRegistry`: ordered owner of all panels plus their observers
//! - `PanelObserver`: the synchronous notification seam toward widgets

mod dock;
mod registry;

pub use dock::{DockArea, Panel, PanelId, PanelKind};
pub use registry::{PanelObserver, PanelRegistry};
