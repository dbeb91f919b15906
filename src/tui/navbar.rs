//! Cyclic tab selection.

/// Highlight change produced by a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub deselected: usize,
    pub selected: usize,
}

impl Highlight {
    /// True if the step selected a different tab.
    pub fn changed(&self) -> bool {
        self.deselected != self.selected
    }
}

/// Index over a fixed number of tabs, wrapping in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    selected: usize,
    count: usize,
}

impl NavBar {
    /// Creates a bar over `count` tabs with the first one selected.
    /// A bar always has at least one tab.
    pub fn new(count: usize) -> Self {
        Self {
            selected: 0,
            count: count.max(1),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Selects tab `index`, wrapped into range.
    pub fn select(&mut self, index: usize) -> Highlight {
        let deselected = self.selected;
        self.selected = index % self.count;
        Highlight {
            deselected,
            selected: self.selected,
        }
    }

    pub fn move_right(&mut self) -> Highlight {
        self.select(self.selected + 1)
    }

    pub fn move_left(&mut self) -> Highlight {
        self.select(self.selected + self.count - 1)
    }
}
