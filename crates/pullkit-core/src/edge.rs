#![forbid(unsafe_code)]

//! Edge eligibility: is the content scrolled to its top or bottom?
//!
//! A pull is only legal when the content cannot scroll any further in the
//! pull direction. The content collaborator describes itself through
//! [`ScrollContent::geometry`]; the rules for the two supported shapes live
//! on [`ContentGeometry`].
//!
//! # Invariants
//!
//! 1. Absent or empty content is eligible at both edges.
//! 2. List content is bottom-eligible when the last visible item is the
//!    final item or the one before it, and its trailing edge is inside the
//!    viewport.
//! 3. Scroll-container content is top-eligible only at offset exactly 0.

/// Snapshot of a virtualised list's visible window.
///
/// Positions are in the list's coordinate space; only their ordering
/// relative to the viewport edges matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListGeometry {
    /// Total number of items.
    pub item_count: usize,
    /// Index of the first (partially) visible item.
    pub first_visible: usize,
    /// Index of the last (partially) visible item.
    pub last_visible: usize,
    /// Leading edge of the first visible item.
    pub first_item_top: i32,
    /// Trailing edge of the last visible item.
    pub last_item_bottom: i32,
    /// Leading edge of the viewport.
    pub viewport_top: i32,
    /// Trailing edge of the viewport.
    pub viewport_bottom: i32,
}

impl ListGeometry {
    #[must_use]
    pub fn is_at_top(&self) -> bool {
        if self.item_count == 0 {
            return true;
        }
        self.first_visible == 0 && self.first_item_top >= self.viewport_top
    }

    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        if self.item_count == 0 {
            return true;
        }
        // Within one of the final item, for partially laid out rows.
        self.last_visible + 2 >= self.item_count && self.last_item_bottom <= self.viewport_bottom
    }
}

/// Snapshot of a plain scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollGeometry {
    /// Current scroll offset, 0 at the top.
    pub scroll_offset: i32,
    /// Extent of the visible viewport.
    pub viewport_extent: i32,
    /// Extent of the scrolled content.
    pub content_extent: i32,
}

impl ScrollGeometry {
    #[must_use]
    pub fn is_at_top(&self) -> bool {
        self.scroll_offset == 0
    }

    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset
            .saturating_add(self.viewport_extent)
            .saturating_sub(self.content_extent)
            >= 0
    }

    /// Largest legal scroll offset.
    #[must_use]
    pub fn max_scroll_offset(&self) -> i32 {
        self.content_extent
            .saturating_sub(self.viewport_extent)
            .max(0)
    }
}

/// Shape of the content, as far as eligibility is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentGeometry {
    /// Nothing to scroll.
    #[default]
    Empty,
    /// Item list.
    List(ListGeometry),
    /// Single scrolled child.
    Scroll(ScrollGeometry),
}

impl ContentGeometry {
    #[must_use]
    pub fn is_at_top(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::List(list) => list.is_at_top(),
            Self::Scroll(scroll) => scroll.is_at_top(),
        }
    }

    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::List(list) => list.is_at_bottom(),
            Self::Scroll(scroll) => scroll.is_at_bottom(),
        }
    }

    /// Largest legal scroll offset. Lists report 0: they scroll by item,
    /// not by offset.
    #[must_use]
    pub fn max_scroll_offset(&self) -> i32 {
        match self {
            Self::Scroll(scroll) => scroll.max_scroll_offset(),
            Self::Empty | Self::List(_) => 0,
        }
    }
}

/// The scrollable content wrapped by the overlay.
pub trait ScrollContent {
    /// Current shape of the content.
    fn geometry(&self) -> ContentGeometry;

    /// Content's own scroll offset.
    fn scroll_offset(&self) -> i32;

    /// Move the content's own scroll offset.
    fn set_scroll_offset(&mut self, offset: i32);

    fn is_at_top_edge(&self) -> bool {
        self.geometry().is_at_top()
    }

    fn is_at_bottom_edge(&self) -> bool {
        self.geometry().is_at_bottom()
    }

    /// Largest legal value for [`set_scroll_offset`](Self::set_scroll_offset).
    fn max_scroll_offset(&self) -> i32 {
        self.geometry().max_scroll_offset()
    }

    /// Whether the content is taller than its viewport.
    fn overflows(&self) -> bool {
        self.max_scroll_offset() > 0
    }
}

/// Top-edge eligibility; absent content is always eligible.
#[must_use]
pub fn is_at_top_edge(content: Option<&dyn ScrollContent>) -> bool {
    content.is_none_or(|c| c.is_at_top_edge())
}

/// Bottom-edge eligibility; absent content is always eligible.
#[must_use]
pub fn is_at_bottom_edge(content: Option<&dyn ScrollContent>) -> bool {
    content.is_none_or(|c| c.is_at_bottom_edge())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
