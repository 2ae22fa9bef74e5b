use std::cmp::min;

use crate::report::generate_report;
use crate::store::RecordStore;

/// The three tabs of the main window.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Tab {
    Patients,
    Medicines,
    Report,
}

impl Tab {
    pub(crate) const ALL: [Tab; 3] = [Tab::Patients, Tab::Medicines, Tab::Report];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Tab::Patients => "Patients",
            Tab::Medicines => "Medicines",
            Tab::Report => "Final Report",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Tab::Patients => 0,
            Tab::Medicines => 1,
            Tab::Report => 2,
        }
    }

    pub(crate) fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub(crate) fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Selection state for a record list. The records themselves live in the
/// store, so every call takes the current length.
#[derive(Default)]
pub(crate) struct ListScreen {
    pub(crate) selected: usize,
}

impl ListScreen {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let len = len as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }
}

/// Cached report text plus scroll position. The text is only rebuilt when
/// [`ReportScreen::refresh`] runs, matching the explicit refresh action.
#[derive(Default)]
pub(crate) struct ReportScreen {
    pub(crate) text: String,
    pub(crate) scroll: u16,
}

impl ReportScreen {
    pub(crate) fn new(store: &RecordStore) -> Self {
        let mut screen = Self::default();
        screen.refresh(store);
        screen
    }

    /// Regenerate the report and keep the scroll offset in range.
    pub(crate) fn refresh(&mut self, store: &RecordStore) {
        self.text = generate_report(store);
        self.scroll = min(self.scroll, self.max_scroll());
    }

    pub(crate) fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub(crate) fn max_scroll(&self) -> u16 {
        u16::try_from(self.line_count().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    pub(crate) fn scroll_by(&mut self, delta: isize) {
        let max = self.max_scroll() as isize;
        let new = (self.scroll as isize + delta).clamp(0, max);
        self.scroll = new as u16;
    }

    pub(crate) fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub(crate) fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[test]
    fn tabs_wrap_in_both_directions() {
        assert_eq!(Tab::Report.next(), Tab::Patients);
        assert_eq!(Tab::Patients.previous(), Tab::Report);
        assert_eq!(Tab::Medicines.next(), Tab::Report);
    }

    #[test]
    fn list_selection_is_clamped() {
        let mut list = ListScreen::default();
        list.move_selection(5, 3);
        assert_eq!(list.selected, 2);
        list.move_selection(-10, 3);
        assert_eq!(list.selected, 0);
        list.select_last(4);
        assert_eq!(list.selected, 3);
        list.move_selection(1, 0);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn report_scroll_stays_within_text() {
        let mut store = RecordStore::new();
        store
            .add_patient("Ann", 20, "Flu", Gender::Female, "Dr. Who")
            .unwrap();
        let mut report = ReportScreen::new(&store);
        let lines = report.line_count();
        assert!(lines > 10);

        report.scroll_by(1_000);
        assert_eq!(report.scroll as usize, lines - 1);
        report.scroll_by(-3);
        assert_eq!(report.scroll as usize, lines - 4);
        report.scroll_to_top();
        assert_eq!(report.scroll, 0);
    }

    #[test]
    fn refresh_picks_up_new_records() {
        let mut store = RecordStore::new();
        let mut report = ReportScreen::new(&store);
        assert_eq!(report.line_count(), 1);

        store
            .add_patient("Ann", 20, "Flu", Gender::Female, "Dr. Who")
            .unwrap();
        assert_eq!(report.line_count(), 1);
        report.refresh(&store);
        assert!(report.text.contains("Name: Ann"));
    }
}
