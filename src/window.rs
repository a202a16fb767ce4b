//! Bounded, insertion-ordered window of displayed photos.
//!
//! The window holds `visible` photos plus one extra slot for the photo that
//! is fading out. A photo is flagged `removed` on the tick it falls out of
//! the visible range and physically evicted on the tick after that.

use std::collections::VecDeque;

use tracing::debug;

use crate::photo::PhotoItem;

#[derive(Debug, Clone)]
pub struct RollingWindow {
    items: VecDeque<PhotoItem>,
    visible: usize,
}

/// What a single [`RollingWindow::push`] did to the front of the window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOutcome {
    /// Sequence number of the item physically evicted, if any.
    pub evicted: Option<u64>,
    /// Sequence number of the item now flagged as fading, if any.
    pub faded: Option<u64>,
}

impl RollingWindow {
    /// Create an empty window showing `visible` photos at once.
    ///
    /// A `visible` of zero is clamped to one.
    #[must_use]
    pub fn new(visible: usize) -> Self {
        let visible = visible.max(1);
        Self {
            items: VecDeque::new(),
            visible,
        }
    }

    /// Number of fully visible photos.
    #[must_use]
    pub const fn visible(&self) -> usize {
        self.visible
    }

    /// Maximum length, visible photos plus the fading one.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.visible.saturating_add(1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `item` at the back, then apply the eviction checks in order:
    /// hard eviction past `capacity`, then fade marking past `visible`.
    pub fn push(&mut self, item: PhotoItem) -> PushOutcome {
        let mut outcome = PushOutcome::default();
        self.items.push_back(item);

        if self.items.len() > self.capacity() {
            outcome.evicted = self.items.pop_front().map(|p| p.sequence);
        }

        if self.items.len() > self.visible
            && let Some(front) = self.items.front_mut()
        {
            front.removed = true;
            outcome.faded = Some(front.sequence);
        }

        debug!(
            len = self.items.len(),
            evicted = ?outcome.evicted,
            faded = ?outcome.faded,
            "window advanced"
        );
        outcome
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhotoItem> {
        self.items.iter()
    }

    /// Copy the current contents, front (oldest) first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PhotoItem> {
        self.items.iter().cloned().collect()
    }
}
