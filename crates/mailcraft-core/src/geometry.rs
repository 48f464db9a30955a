#![forbid(unsafe_code)]

//! Vertical extents of rendered list items.

/// The vertical extent of one rendered item, in viewport pixels.
///
/// Constructors normalize the edges so that `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalSpan {
    pub top: f64,
    pub bottom: f64,
}

impl VerticalSpan {
    #[must_use]
    pub fn new(top: f64, bottom: f64) -> Self {
        if bottom < top {
            Self {
                top: bottom,
                bottom: top,
            }
        } else {
            Self { top, bottom }
        }
    }

    /// Span starting at `top` with the given height.
    #[must_use]
    pub fn from_origin(top: f64, height: f64) -> Self {
        Self::new(top, top + height)
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.top + self.height() / 2.0
    }

    /// Lay out `heights` top to bottom starting at `origin`, with `gap`
    /// pixels between consecutive items.
    #[must_use]
    pub fn stack(origin: f64, heights: &[f64], gap: f64) -> Vec<VerticalSpan> {
        let mut cursor = origin;
        heights
            .iter()
            .map(|&h| {
                let span = Self::from_origin(cursor, h);
                cursor = span.bottom + gap;
                span
            })
            .collect()
    }
}
