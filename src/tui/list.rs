/// Highlight and scroll state of the user list
pub struct ListState {
    pub highlighted: Option<usize>,
    pub scroll_offset: usize,
    pub visible_rows: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            highlighted: None,
            scroll_offset: 0,
            visible_rows: 20,
        }
    }
}

impl ListState {
    /// Back to the first row after the list contents changed
    pub fn reset(&mut self, total: usize) {
        self.highlighted = if total == 0 { None } else { Some(0) };
        self.scroll_offset = 0;
    }

    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.highlighted {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        };
        self.highlighted = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_prev(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.highlighted {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.highlighted = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_down(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.highlighted {
            Some(i) => (i + jump).min(total - 1),
            None => jump.min(total - 1),
        };
        self.highlighted = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_up(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.highlighted {
            Some(i) => i.saturating_sub(jump),
            None => 0,
        };
        self.highlighted = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_first(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.highlighted = Some(0);
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.highlighted = Some(total - 1);
        self.ensure_visible(total - 1);
    }

    /// Highlight the row at `index`, e.g. from a mouse click
    pub fn select_row(&mut self, index: usize, total: usize) -> bool {
        if index >= total {
            return false;
        }
        self.highlighted = Some(index);
        self.ensure_visible(index);
        true
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index - self.visible_rows + 1;
        }
    }
}
