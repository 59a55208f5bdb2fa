//! Enumerated tool catalog.
//!
//! Rows and notes store the tool as its display name, so unknown names can
//! exist in data; only catalog names take part in per-tool counts.

/// One selectable field tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    /// Stable 1-based catalog id.
    pub id: u32,
    /// Display name, also the persisted value.
    pub name: &'static str,
    /// Icon hint for the presentation layer.
    pub icon: &'static str,
}

/// Catalog in presentation order. The first entry is the default tool.
pub const TOOLS: [Tool; 3] = [
    Tool {
        id: 1,
        name: "हैरो",
        icon: "fa-tractor",
    },
    Tool {
        id: 2,
        name: "टिलर",
        icon: "fa-seedling",
    },
    Tool {
        id: 3,
        name: "रूटर",
        icon: "fa-tools",
    },
];

/// Name of the tool preselected for new rows and blank note drafts.
pub fn default_tool_name() -> &'static str {
    TOOLS[0].name
}
