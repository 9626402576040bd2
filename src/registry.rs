//! The closed set of template variants and their per-variant defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::palette::Palette;

/// The template variants this crate can render.
///
/// The set is closed: adding a variant means adding a layout module and a
/// match arm, and exhaustiveness checks catch anything missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Classic,
    Modern,
    Minimal,
    Magazine,
    Announcement,
}

impl TemplateKind {
    /// Every variant, in listing order.
    pub const ALL: [TemplateKind; 5] = [
        TemplateKind::Classic,
        TemplateKind::Modern,
        TemplateKind::Minimal,
        TemplateKind::Magazine,
        TemplateKind::Announcement,
    ];

    /// Stable identifier used on the wire and in URLs.
    pub fn id(&self) -> &'static str {
        match self {
            TemplateKind::Classic => "classic",
            TemplateKind::Modern => "modern",
            TemplateKind::Minimal => "minimal",
            TemplateKind::Magazine => "magazine",
            TemplateKind::Announcement => "announcement",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Classic => "Classic Newsletter",
            TemplateKind::Modern => "Modern Card Layout",
            TemplateKind::Minimal => "Minimal Text-Focused",
            TemplateKind::Magazine => "Image-Heavy Magazine",
            TemplateKind::Announcement => "Announcement/Update",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateKind::Classic => {
                "Traditional newsletter layout with header, hero section, featured posts in a 3-column grid, and footer."
            }
            TemplateKind::Modern => {
                "Clean, minimalist design with card-based content presentation and bold typography."
            }
            TemplateKind::Minimal => {
                "Simple, text-heavy design perfect for content-focused newsletters with inline summaries."
            }
            TemplateKind::Magazine => {
                "Bold, visual design with large featured images and magazine-style layout."
            }
            TemplateKind::Announcement => {
                "Single-column layout optimized for important announcements and updates."
            }
        }
    }

    /// The color palette used when the caller overrides nothing.
    pub fn default_palette(&self) -> Palette {
        match self {
            TemplateKind::Classic => {
                Palette::new("#2563eb", "#1e40af", "#ffffff", "#1f2937").accent("#3b82f6")
            }
            TemplateKind::Modern => {
                Palette::new("#0d0d0d", "#1c1c1e", "#f5f5f7", "#0d0d0d").accent("#4a9eff")
            }
            TemplateKind::Minimal => {
                Palette::new("#111827", "#374151", "#ffffff", "#374151").accent("#6366f1")
            }
            TemplateKind::Magazine => {
                Palette::new("#dc2626", "#991b1b", "#fafafa", "#171717").accent("#ef4444")
            }
            TemplateKind::Announcement => {
                Palette::new("#7c3aed", "#5b21b6", "#faf5ff", "#1f2937").accent("#8b5cf6")
            }
        }
    }

    /// Post cap applied when the caller sets none.
    pub fn default_max_posts(&self) -> usize {
        match self {
            TemplateKind::Classic | TemplateKind::Modern => 6,
            TemplateKind::Minimal => 8,
            TemplateKind::Magazine | TemplateKind::Announcement => 5,
        }
    }

    /// Listing entry for this variant.
    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            id: self.id(),
            name: self.name(),
            description: self.description(),
            default_palette: self.default_palette(),
            default_max_posts: self.default_max_posts(),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(TemplateKind::Classic),
            "modern" => Ok(TemplateKind::Modern),
            "minimal" => Ok(TemplateKind::Minimal),
            "magazine" => Ok(TemplateKind::Magazine),
            "announcement" => Ok(TemplateKind::Announcement),
            other => Err(Error::UnknownTemplate(other.to_string())),
        }
    }
}

/// Catalog entry describing one template variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub default_palette: Palette,
    pub default_max_posts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_round_trip() {
        for kind in TemplateKind::ALL {
            assert_eq!(kind.id().parse::<TemplateKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_id_rejected() {
        let err = "holiday".parse::<TemplateKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownTemplate(ref id) if id == "holiday"));
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&TemplateKind::Magazine).unwrap();
        assert_eq!(json, "\"magazine\"");
        let kind: TemplateKind = serde_json::from_str("\"announcement\"").unwrap();
        assert_eq!(kind, TemplateKind::Announcement);
    }

    #[test]
    fn test_catalog_is_distinct_and_complete() {
        let ids: HashSet<_> = TemplateKind::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(ids.len(), 5);
        for kind in TemplateKind::ALL {
            let info = kind.info();
            assert!(!info.name.is_empty());
            assert!(!info.description.is_empty());
            assert!(info.default_max_posts >= 1);
        }
    }

    #[test]
    fn test_default_max_posts_match_variants() {
        assert_eq!(TemplateKind::Classic.default_max_posts(), 6);
        assert_eq!(TemplateKind::Minimal.default_max_posts(), 8);
        assert_eq!(TemplateKind::Magazine.default_max_posts(), 5);
    }
}
