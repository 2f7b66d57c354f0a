use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    Border,

    SlotBackground,
    SlotBorder,

    PlaceholderBackground,
    PlaceholderLine,
    PlaceholderText,

    TextPrimary,
    TextSecondary,
    TextMuted,
}
