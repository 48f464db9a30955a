#![forbid(unsafe_code)]

//! Per-breakpoint block styling.
//!
//! Every block carries a desktop style and optional tablet and mobile
//! overrides. Resolution cascades from the narrowest override towards the
//! desktop base:
//!
//! ```text
//! Mobile  -> mobile  | tablet | desktop
//! Tablet  -> tablet  | desktop
//! Desktop -> desktop
//! ```

use serde::{Deserialize, Serialize};

/// Device width class used by the live preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    /// All breakpoints, widest first.
    pub const ALL: [Breakpoint; 3] = [Self::Desktop, Self::Tablet, Self::Mobile];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }

    /// Default preview width in CSS pixels.
    #[must_use]
    pub const fn default_width_px(self) -> u32 {
        match self {
            Self::Desktop => 600,
            Self::Tablet => 480,
            Self::Mobile => 320,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Box spacing in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Spacing {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Spacing {
    pub const ZERO: Spacing = Spacing::uniform(0);

    /// Same value on all four sides.
    #[must_use]
    pub const fn uniform(value: u16) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// `vertical` for top/bottom, `horizontal` for left/right.
    #[must_use]
    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// Resolved style for one block at one breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockStyle {
    pub padding: Spacing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub text_align: TextAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_px: Option<u16>,
}

impl BlockStyle {
    #[must_use]
    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, px: u16) -> Self {
        self.font_size_px = Some(px);
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }
}

/// Desktop base style plus optional narrower overrides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Styling {
    pub desktop: BlockStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablet: Option<BlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<BlockStyle>,
}

impl Styling {
    /// Styling with only a desktop base.
    #[must_use]
    pub fn new(desktop: BlockStyle) -> Self {
        Self {
            desktop,
            tablet: None,
            mobile: None,
        }
    }

    /// Effective style at `breakpoint`, following the cascade.
    #[must_use]
    pub fn resolve(&self, breakpoint: Breakpoint) -> &BlockStyle {
        match breakpoint {
            Breakpoint::Desktop => &self.desktop,
            Breakpoint::Tablet => self.tablet.as_ref().unwrap_or(&self.desktop),
            Breakpoint::Mobile => self
                .mobile
                .as_ref()
                .or(self.tablet.as_ref())
                .unwrap_or(&self.desktop),
        }
    }

    /// Replace the style stored for `breakpoint`.
    pub fn set(&mut self, breakpoint: Breakpoint, style: BlockStyle) {
        match breakpoint {
            Breakpoint::Desktop => self.desktop = style,
            Breakpoint::Tablet => self.tablet = Some(style),
            Breakpoint::Mobile => self.mobile = Some(style),
        }
    }

    /// Drop a tablet or mobile override. The desktop base cannot be cleared.
    pub fn clear_override(&mut self, breakpoint: Breakpoint) {
        match breakpoint {
            Breakpoint::Desktop => {}
            Breakpoint::Tablet => self.tablet = None,
            Breakpoint::Mobile => self.mobile = None,
        }
    }

    /// Whether `breakpoint` has its own override.
    #[must_use]
    pub fn has_override(&self, breakpoint: Breakpoint) -> bool {
        match breakpoint {
            Breakpoint::Desktop => true,
            Breakpoint::Tablet => self.tablet.is_some(),
            Breakpoint::Mobile => self.mobile.is_some(),
        }
    }
}
