//! # Navigation State
//!
//! Which pane has focus and the selected index in each pane. Persists for the
//! whole session and is adjusted in place, never replaced.
//!
//! Movement wraps: `(i + delta + n) % n`. Reloads clamp: when a collection
//! shrinks the index is pulled back to its last element instead of wrapping.

/// One of the two navigable regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Lists,
    Tasks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub focused: Pane,
    pub list_index: usize,
    pub task_index: usize,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            focused: Pane::Lists,
            list_index: 0,
            task_index: 0,
        }
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the focused pane's selection by `delta`, wrapping around `len`.
    /// No-op when the collection is empty.
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        let index = match self.focused {
            Pane::Lists => &mut self.list_index,
            Pane::Tasks => &mut self.task_index,
        };
        *index = wrap_index(*index, delta, len);
    }

    pub fn clamp_lists(&mut self, len: usize) {
        self.list_index = clamp_index(self.list_index, len);
    }

    pub fn clamp_tasks(&mut self, len: usize) {
        self.task_index = clamp_index(self.task_index, len);
    }

    pub fn focus(&mut self, pane: Pane) {
        self.focused = pane;
    }
}

fn wrap_index(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let n = len as isize;
    let current = (index as isize).min(n - 1);
    ((current + delta % n + n) % n) as usize
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
