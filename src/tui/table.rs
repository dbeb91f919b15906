//! Scrollable table state shared by every tab: tracked entities, the
//! `(top, pos)` cursor and emission of the visible window to a sink.
//!
//! `top` is the index of the first entity in the window and `pos` the
//! highlighted row within it. The window holds `visible_rows + 1` rows, so
//! `pos` ranges over `0..=visible_rows`. When the table is non-empty,
//! `top + pos` always names an existing entity.

use std::cmp::Ordering;

use crate::reconcile::TrackedEntity;

/// Trait for table row payloads.
pub trait TableRow {
    /// Column headers.
    fn headers() -> &'static [&'static str];

    /// Cell values as strings, one per header.
    fn cells(&self) -> Vec<String>;
}

/// Receives the rows of one table emission.
pub trait RenderSink {
    fn draw_row(&mut self, index: usize, columns: &[String]);
    fn clear_row(&mut self, index: usize);
    fn highlight_row(&mut self, index: usize);
}

/// Scroll and selection position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub top: usize,
    pub pos: usize,
}

/// Entities of one tab together with their cursor.
#[derive(Debug, Clone)]
pub struct TabTable<K, T> {
    pub entities: Vec<TrackedEntity<K, T>>,
    cursor: Cursor,
    visible_rows: usize,
}

impl<K, T> Default for TabTable<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> TabTable<K, T> {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            cursor: Cursor::default(),
            visible_rows: 0,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Moves the highlight up, scrolling once it reaches the first row.
    pub fn move_up(&mut self) {
        if self.cursor.pos > 0 {
            self.cursor.pos -= 1;
        } else if self.cursor.top > 0 {
            self.cursor.top -= 1;
        }
    }

    /// Moves the highlight down, scrolling once it reaches the last row.
    pub fn move_down(&mut self) {
        if self.cursor.top + self.cursor.pos + 1 >= self.entities.len() {
            return;
        }
        if self.cursor.pos < self.visible_rows {
            self.cursor.pos += 1;
        } else {
            self.cursor.top += 1;
        }
    }

    /// Sets the window capacity and re-clips the cursor.
    pub fn resize(&mut self, visible_rows: usize) {
        self.visible_rows = visible_rows;
        self.clip();
    }

    /// Restores the cursor invariants after the entity count or capacity changed.
    ///
    /// The highlighted index is kept when it still exists; otherwise the
    /// highlight moves to the last entity. The window never scrolls past the
    /// point where it would show empty rows below the last entity.
    pub fn clip(&mut self) {
        let len = self.entities.len();
        if len == 0 {
            self.cursor = Cursor::default();
            return;
        }

        let Cursor { mut top, mut pos } = self.cursor;
        if pos > self.visible_rows {
            top += pos - self.visible_rows;
            pos = self.visible_rows;
        }

        let selected = (top + pos).min(len - 1);
        top = top.min(len.saturating_sub(self.visible_rows + 1));
        pos = selected - top;

        self.cursor = Cursor { top, pos };
    }

    /// Index of the highlighted entity.
    pub fn selected_index(&self) -> Option<usize> {
        let index = self.cursor.top + self.cursor.pos;
        (index < self.entities.len()).then_some(index)
    }

    pub fn selected(&self) -> Option<&TrackedEntity<K, T>> {
        self.selected_index().map(|i| &self.entities[i])
    }

    /// Stable sort of all entities by payload.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.entities.sort_by(|a, b| compare(&a.payload, &b.payload));
    }
}

impl<K, T: TableRow> TabTable<K, T> {
    /// Emits the visible window: `visible_rows + 1` draw or clear operations,
    /// then one highlight when there is anything to highlight.
    pub fn emit(&self, sink: &mut dyn RenderSink) {
        for row in 0..=self.visible_rows {
            match self.entities.get(self.cursor.top + row) {
                Some(entity) => sink.draw_row(row, &entity.payload.cells()),
                None => sink.clear_row(row),
            }
        }
        if !self.entities.is_empty() {
            sink.highlight_row(self.cursor.pos);
        }
    }
}
