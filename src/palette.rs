//! Color palettes with per-field override merging.

use serde::{Deserialize, Serialize};

/// The color scheme applied to a rendered email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

impl Palette {
    pub fn new(
        primary: impl Into<String>,
        secondary: impl Into<String>,
        background: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            background: background.into(),
            text: text.into(),
            accent: None,
        }
    }

    pub fn accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    /// Apply caller overrides on top of this palette.
    ///
    /// Per-field override, not whole-object replacement: any field the
    /// caller omits keeps this palette's value.
    pub fn merged(&self, overrides: &PaletteOverrides) -> Palette {
        Palette {
            primary: overrides.primary.clone().unwrap_or_else(|| self.primary.clone()),
            secondary: overrides
                .secondary
                .clone()
                .unwrap_or_else(|| self.secondary.clone()),
            background: overrides
                .background
                .clone()
                .unwrap_or_else(|| self.background.clone()),
            text: overrides.text.clone().unwrap_or_else(|| self.text.clone()),
            accent: overrides.accent.clone().or_else(|| self.accent.clone()),
        }
    }
}

/// Caller-supplied palette fields; anything left `None` falls back to the
/// template's default palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

impl PaletteOverrides {
    pub fn primary(mut self, color: impl Into<String>) -> Self {
        self.primary = Some(color.into());
        self
    }

    pub fn secondary(mut self, color: impl Into<String>) -> Self {
        self.secondary = Some(color.into());
        self
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn text(mut self, color: impl Into<String>) -> Self {
        self.text = Some(color.into());
        self
    }

    pub fn accent(mut self, color: impl Into<String>) -> Self {
        self.accent = Some(color.into());
        self
    }
}

/// Convert a `#rrggbb` color to `rgba(r, g, b, opacity)`.
///
/// Non-hex inputs pass through unchanged.
pub(crate) fn with_opacity(color: &str, opacity: f32) -> String {
    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return format!("rgba({}, {}, {}, {})", r, g, b, opacity);
            }
        }
    }
    color.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_per_field() {
        let base = Palette::new("#2563eb", "#1e40af", "#ffffff", "#1f2937").accent("#3b82f6");
        let merged = base.merged(&PaletteOverrides::default().primary("#000000"));

        assert_eq!(merged.primary, "#000000");
        assert_eq!(merged.secondary, "#1e40af");
        assert_eq!(merged.background, "#ffffff");
        assert_eq!(merged.text, "#1f2937");
        assert_eq!(merged.accent.as_deref(), Some("#3b82f6"));
    }

    #[test]
    fn test_merged_empty_overrides_is_identity() {
        let base = Palette::new("#111827", "#374151", "#ffffff", "#374151");
        assert_eq!(base.merged(&PaletteOverrides::default()), base);
    }

    #[test]
    fn test_with_opacity() {
        assert_eq!(with_opacity("#1f2937", 0.6), "rgba(31, 41, 55, 0.6)");
        assert_eq!(with_opacity("transparent", 0.6), "transparent");
    }
}
