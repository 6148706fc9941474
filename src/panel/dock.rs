//! Panel identity and layout state
//!
//! This module defines the core data structures for the dockable panel
//! system: stable panel ids, panel kinds (the analysis view a panel is
//! bound to), dock areas, and the per-panel record the registry tracks.

use serde::{Deserialize, Serialize};

/// Stable string key identifying a panel
///
/// Identity lives in the id, not the kind: two `Custom` panels with
/// different ids are distinct, and persistence matches panels by id only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The analysis view a panel is bound to
///
/// Informational: behavior keys off the id, the kind only drives
/// default-visibility and responsive-collapse priority policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelKind {
    Disassembly,
    Hexdump,
    Graph,
    Functions,
    Imports,
    Exports,
    Symbols,
    Relocs,
    Comments,
    Strings,
    Flags,
    Sections,
    Notepad,
    Console,
    Dashboard,
    Sidebar,
    Entrypoint,
    SdbBrowser,
    Preview,
    Custom,
}

impl PanelKind {
    /// All standard kinds, in the order the window registers them
    pub const STANDARD: [PanelKind; 19] = [
        PanelKind::Disassembly,
        PanelKind::Graph,
        PanelKind::Hexdump,
        PanelKind::Functions,
        PanelKind::Strings,
        PanelKind::Dashboard,
        PanelKind::Imports,
        PanelKind::Exports,
        PanelKind::Symbols,
        PanelKind::Relocs,
        PanelKind::Comments,
        PanelKind::Flags,
        PanelKind::Sections,
        PanelKind::Notepad,
        PanelKind::Console,
        PanelKind::Sidebar,
        PanelKind::Entrypoint,
        PanelKind::SdbBrowser,
        PanelKind::Preview,
    ];

    /// Stable id key for standard kinds
    pub fn key(&self) -> &'static str {
        match self {
            PanelKind::Disassembly => "disassembly",
            PanelKind::Hexdump => "hexdump",
            PanelKind::Graph => "graph",
            PanelKind::Functions => "functions",
            PanelKind::Imports => "imports",
            PanelKind::Exports => "exports",
            PanelKind::Symbols => "symbols",
            PanelKind::Relocs => "relocs",
            PanelKind::Comments => "comments",
            PanelKind::Strings => "strings",
            PanelKind::Flags => "flags",
            PanelKind::Sections => "sections",
            PanelKind::Notepad => "notepad",
            PanelKind::Console => "console",
            PanelKind::Dashboard => "dashboard",
            PanelKind::Sidebar => "sidebar",
            PanelKind::Entrypoint => "entrypoint",
            PanelKind::SdbBrowser => "sdb-browser",
            PanelKind::Preview => "preview",
            PanelKind::Custom => "custom",
        }
    }

    /// Get the display name for this panel kind
    pub fn display_name(&self) -> &'static str {
        match self {
            PanelKind::Disassembly => "Disassembly",
            PanelKind::Hexdump => "Hexdump",
            PanelKind::Graph => "Graph",
            PanelKind::Functions => "Functions",
            PanelKind::Imports => "Imports",
            PanelKind::Exports => "Exports",
            PanelKind::Symbols => "Symbols",
            PanelKind::Relocs => "Relocations",
            PanelKind::Comments => "Comments",
            PanelKind::Strings => "Strings",
            PanelKind::Flags => "Flags",
            PanelKind::Sections => "Sections",
            PanelKind::Notepad => "Notepad",
            PanelKind::Console => "Console",
            PanelKind::Dashboard => "Dashboard",
            PanelKind::Sidebar => "Sidebar",
            PanelKind::Entrypoint => "Entry Points",
            PanelKind::SdbBrowser => "SDB Browser",
            PanelKind::Preview => "Preview",
            PanelKind::Custom => "Custom",
        }
    }

    /// Whether panels of this kind are visible in the default layout
    pub fn default_visible(&self) -> bool {
        matches!(
            self,
            PanelKind::Disassembly
                | PanelKind::Graph
                | PanelKind::Hexdump
                | PanelKind::Functions
                | PanelKind::Strings
                | PanelKind::Dashboard
        )
    }

    /// Get the default dock area for this panel kind
    pub fn default_area(&self) -> DockArea {
        match self {
            PanelKind::Disassembly
            | PanelKind::Graph
            | PanelKind::Hexdump
            | PanelKind::Dashboard
            | PanelKind::Preview => DockArea::Center,
            PanelKind::Functions | PanelKind::Sidebar | PanelKind::Entrypoint => DockArea::Left,
            PanelKind::Strings
            | PanelKind::Imports
            | PanelKind::Exports
            | PanelKind::Symbols
            | PanelKind::Relocs
            | PanelKind::Comments
            | PanelKind::Flags
            | PanelKind::Sections
            | PanelKind::SdbBrowser
            | PanelKind::Custom => DockArea::Right,
            PanelKind::Notepad | PanelKind::Console => DockArea::Bottom,
        }
    }

    /// Responsive-collapse priority: lower stays expanded longer
    ///
    /// Disassembly > Graph > Hexdump > everything else (ties between
    /// "everything else" break by registration order).
    pub fn responsive_priority(&self) -> u8 {
        match self {
            PanelKind::Disassembly => 0,
            PanelKind::Graph => 1,
            PanelKind::Hexdump => 2,
            _ => 3,
        }
    }
}

/// Opaque layout position token for a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DockArea {
    Center,
    Left,
    Right,
    Bottom,
    /// Collapsed into a tab stack (responsive mode)
    Tabbed,
}

/// State tracked for a single dockable panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    /// Stable identity
    pub id: PanelId,
    /// The analysis view this panel renders
    pub kind: PanelKind,
    /// Whether the panel is currently shown
    pub visible: bool,
    /// Mirrors the global layout lock
    pub locked: bool,
    /// Visibility in the default layout
    pub default_visible: bool,
    /// Current dock position
    pub area: DockArea,
}

impl Panel {
    /// Create a standard panel for a kind, with policy defaults
    pub fn of_kind(kind: PanelKind) -> Self {
        Self {
            id: PanelId::new(kind.key()),
            kind,
            visible: false,
            locked: false,
            default_visible: kind.default_visible(),
            area: kind.default_area(),
        }
    }

    /// Create a custom panel with an explicit id
    pub fn custom(id: impl Into<String>) -> Self {
        let kind = PanelKind::Custom;
        Self {
            id: PanelId::new(id),
            kind,
            visible: false,
            locked: false,
            default_visible: false,
            area: kind.default_area(),
        }
    }
}
