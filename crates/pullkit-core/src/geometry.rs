#![forbid(unsafe_code)]

//! Edges, insets and the overlay layout derived from a [`Mode`].

use crate::config::Mode;

/// One of the two pullable edges of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top edge; pulled down to refresh.
    Header,
    /// Bottom edge; pulled up to load more.
    Footer,
}

impl Edge {
    /// Both edges, header first.
    pub const ALL: [Edge; 2] = [Edge::Header, Edge::Footer];

    /// Stable lowercase name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
        }
    }
}

/// Vertical insets for padding/margin, in logical pixels.
///
/// Values are signed: the overlay hides its indicators with negative padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub top: i32,
    pub bottom: i32,
}

impl Sides {
    /// No inset.
    pub const ZERO: Self = Self { top: 0, bottom: 0 };

    /// Create new sides with specific values.
    #[inline]
    pub const fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<(i32, i32)> for Sides {
    fn from((top, bottom): (i32, i32)) -> Self {
        Self { top, bottom }
    }
}

/// Where the presentation layer places the indicators and the content.
///
/// At rest the indicators sit just outside the viewport: the overlay is
/// padded by minus their heights, and the content gets a matching positive
/// margin so hiding an indicator never hides content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayLayout {
    /// Padding applied to the overlay container.
    pub overlay_padding: Sides,
    /// Margin applied to the content inside the overlay.
    pub content_margin: Sides,
    header_height: i32,
    footer_height: i32,
}

impl OverlayLayout {
    /// Derive the layout for `mode` from the measured indicator heights.
    ///
    /// Negative heights are treated as zero. Edges the mode does not include
    /// reserve nothing.
    #[must_use]
    pub fn for_mode(mode: Mode, header_height: i32, footer_height: i32) -> Self {
        let header = if mode.has_header() {
            header_height.max(0)
        } else {
            0
        };
        let footer = if mode.has_footer() {
            footer_height.max(0)
        } else {
            0
        };
        Self {
            overlay_padding: Sides::new(-header, -footer),
            content_margin: Sides::new(header, footer),
            header_height: header,
            footer_height: footer,
        }
    }

    /// Height reserved for an edge (zero when the mode excludes it).
    #[inline]
    #[must_use]
    pub const fn height(&self, edge: Edge) -> i32 {
        match edge {
            Edge::Header => self.header_height,
            Edge::Footer => self.footer_height,
        }
    }

    /// Scroll offset at which the indicator for `edge` is fully revealed.
    ///
    /// Header offsets are negative, footer offsets positive.
    #[inline]
    #[must_use]
    pub const fn settle_target(&self, edge: Edge) -> i32 {
        match edge {
            Edge::Header => -self.header_height,
            Edge::Footer => self.footer_height,
        }
    }
}
