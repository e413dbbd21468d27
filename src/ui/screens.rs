//! Per-screen state containers. These hold a snapshot of what the screen
//! shows plus the cursor/scroll position, so `app.rs` can stay focused on
//! key dispatch and drawing.

/// A scrollable list of pre-rendered rows, used for the student list, the
/// course list, and search results.
pub(crate) struct ListScreen {
    pub(crate) title: String,
    pub(crate) rows: Vec<String>,
    pub(crate) selected: usize,
}

impl ListScreen {
    pub(crate) fn new(title: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            title: title.into(),
            rows,
            selected: 0,
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }
}

/// A generated report shown read-only with vertical scrolling.
pub(crate) struct ReportScreen {
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) scroll: u16,
}

impl ReportScreen {
    pub(crate) fn new(title: impl Into<String>, body: String) -> Self {
        Self {
            title: title.into(),
            body,
            scroll: 0,
        }
    }

    pub(crate) fn scroll_by(&mut self, offset: i16) {
        if offset < 0 {
            self.scroll = self.scroll.saturating_sub(offset.unsigned_abs());
        } else {
            let max = self.body.lines().count().saturating_sub(1) as u16;
            self.scroll = (self.scroll + offset as u16).min(max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_clamps_to_bounds() {
        let mut screen = ListScreen::new("Students", vec!["a".into(), "b".into(), "c".into()]);
        screen.move_selection(-1);
        assert_eq!(screen.selected, 0);
        screen.move_selection(10);
        assert_eq!(screen.selected, 2);

        let mut empty = ListScreen::new("Students", Vec::new());
        empty.move_selection(1);
        assert_eq!(empty.selected, 0);
    }

    #[test]
    fn report_scroll_clamps_to_body() {
        let mut screen = ReportScreen::new("Report", "a\nb\nc\n".to_string());
        screen.scroll_by(-1);
        assert_eq!(screen.scroll, 0);
        screen.scroll_by(10);
        assert_eq!(screen.scroll, 2);
    }
}
