use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::config::APP_TITLE;
use crate::store::{RecordError, RecordStore};

use super::forms::{MedicineField, MedicineForm, Notice, PatientField, PatientForm};
use super::helpers::{centered_rect, cursor_column};
use super::screens::{ListScreen, ReportScreen, Tab};

/// Height of the tab bar, borders included.
const TABS_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows moved by PgUp/PgDn.
const PAGE_STEP: isize = 10;

/// Fine-grained modes layered over the active tab.
enum Mode {
    Normal,
    AddingPatient(PatientForm),
    AddingMedicine(MedicineForm),
    Notice(Notice),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state. Owns the record store for the whole session;
/// every mutation goes through the key handlers below.
pub struct App {
    store: RecordStore,
    tab: Tab,
    patients: ListScreen,
    medicines: ListScreen,
    report: ReportScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: RecordStore) -> Self {
        let report = ReportScreen::new(&store);
        Self {
            store,
            tab: Tab::Patients,
            patients: ListScreen::default(),
            medicines: ListScreen::default(),
            report,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Read-only view of the records entered so far.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Text currently shown on the report tab. It only changes when the tab
    /// is opened or refreshed.
    pub fn report_text(&self) -> &str {
        &self.report.text
    }

    /// Dispatch a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingPatient(form) => self.handle_add_patient(code, form),
            Mode::AddingMedicine(form) => self.handle_add_medicine(code, form),
            Mode::Notice(notice) => match code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Mode::Normal,
                _ => Mode::Notice(notice),
            },
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Left | KeyCode::BackTab => self.switch_tab(self.tab.previous()),
            KeyCode::Right | KeyCode::Tab => self.switch_tab(self.tab.next()),
            KeyCode::Char('1') => self.switch_tab(Tab::Patients),
            KeyCode::Char('2') => self.switch_tab(Tab::Medicines),
            KeyCode::Char('3') => self.switch_tab(Tab::Report),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                match self.tab {
                    Tab::Patients => return Mode::AddingPatient(PatientForm::default()),
                    Tab::Medicines => return Mode::AddingMedicine(MedicineForm::default()),
                    Tab::Report => self.set_status(
                        "Switch to Patients or Medicines to add a record.",
                        StatusKind::Error,
                    ),
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') if self.tab == Tab::Report => {
                self.refresh_report();
                if self.store.is_empty() {
                    self.set_status(
                        "Report refreshed. No patients or medicines recorded yet.",
                        StatusKind::Info,
                    );
                } else {
                    self.set_status("Report refreshed.", StatusKind::Info);
                }
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_add_patient(&mut self, code: KeyCode, mut form: PatientForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add patient cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left => {
                form.cycle_gender(false);
            }
            KeyCode::Right => {
                form.cycle_gender(true);
            }
            KeyCode::Char(' ') if form.active == PatientField::Gender => {
                form.cycle_gender(true);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_patient(&form) {
                Ok(notice) => return Mode::Notice(notice),
                Err(err) => {
                    let message = err.to_string();
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingPatient(form)
    }

    fn handle_add_medicine(&mut self, code: KeyCode, mut form: MedicineForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add medicine cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_medicine(&form) {
                Ok(notice) => return Mode::Notice(notice),
                Err(err) => {
                    let message = err.to_string();
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingMedicine(form)
    }

    fn save_patient(&mut self, form: &PatientForm) -> Result<Notice, RecordError> {
        self.store.add_patient(
            &form.name,
            form.age.as_str(),
            &form.disease,
            form.gender,
            &form.doctor,
        )?;
        self.patients.select_last(self.store.patients().len());
        self.set_status(format!("Added patient {}.", form.name), StatusKind::Info);
        Ok(Notice::success("Patient added successfully!"))
    }

    fn save_medicine(&mut self, form: &MedicineForm) -> Result<Notice, RecordError> {
        self.store
            .add_medicine(&form.name, form.stock.as_str(), &form.disease)?;
        self.medicines.select_last(self.store.medicines().len());
        self.set_status(format!("Added medicine {}.", form.name), StatusKind::Info);
        Ok(Notice::success("Medicine added successfully!"))
    }

    fn switch_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        debug!(from = self.tab.title(), to = tab.title(), "switching tab");
        self.clear_status();
        self.tab = tab;
        if tab == Tab::Report {
            self.refresh_report();
        }
    }

    fn refresh_report(&mut self) {
        self.report.refresh(&self.store);
        debug!(lines = self.report.line_count(), "report regenerated");
    }

    fn move_selection(&mut self, offset: isize) {
        match self.tab {
            Tab::Patients => self
                .patients
                .move_selection(offset, self.store.patients().len()),
            Tab::Medicines => self
                .medicines
                .move_selection(offset, self.store.medicines().len()),
            Tab::Report => self.report.scroll_by(offset),
        }
    }

    fn select_first(&mut self) {
        match self.tab {
            Tab::Patients => self.patients.select_first(),
            Tab::Medicines => self.medicines.select_first(),
            Tab::Report => self.report.scroll_to_top(),
        }
    }

    fn select_last(&mut self) {
        match self.tab {
            Tab::Patients => self.patients.select_last(self.store.patients().len()),
            Tab::Medicines => self.medicines.select_last(self.store.medicines().len()),
            Tab::Report => self.report.scroll_to_bottom(),
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TABS_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_tabs(frame, chunks[0]);
        match self.tab {
            Tab::Patients => self.draw_patient_list(frame, chunks[1]),
            Tab::Medicines => self.draw_medicine_list(frame, chunks[1]),
            Tab::Report => self.draw_report(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::AddingPatient(form) => self.draw_patient_form(frame, area, form),
            Mode::AddingMedicine(form) => self.draw_medicine_form(frame, area, form),
            Mode::Notice(notice) => self.draw_notice(frame, area, notice),
            Mode::Normal => {}
        }
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()))
            .block(Block::default().title(APP_TITLE).borders(Borders::ALL))
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_patient_list(&self, frame: &mut Frame, area: Rect) {
        let patients = self.store.patients();
        let block = Block::default()
            .title(format!("Patients ({})", patients.len()))
            .borders(Borders::ALL);
        let items = patients
            .iter()
            .map(|patient| ListItem::new(patient.to_string()))
            .collect();
        self.draw_record_list(frame, area, block, items, &self.patients, "No patients yet.");
    }

    fn draw_medicine_list(&self, frame: &mut Frame, area: Rect) {
        let medicines = self.store.medicines();
        let block = Block::default()
            .title(format!("Medicines ({})", medicines.len()))
            .borders(Borders::ALL);
        let items = medicines
            .iter()
            .map(|medicine| {
                ListItem::new(Line::from(vec![
                    Span::raw(medicine.to_string()),
                    Span::styled(
                        format!("  ({})", medicine.disease()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();
        self.draw_record_list(
            frame,
            area,
            block,
            items,
            &self.medicines,
            "No medicines yet.",
        );
    }

    fn draw_record_list(
        &self,
        frame: &mut Frame,
        area: Rect,
        block: Block,
        items: Vec<ListItem>,
        screen: &ListScreen,
        empty_text: &str,
    ) {
        if items.is_empty() {
            let paragraph = Paragraph::new(format!("{empty_text} Press + to add one."))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");
        let mut state = ListState::default().with_selected(Some(screen.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_report(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Final Report").borders(Borders::ALL);
        let paragraph = Paragraph::new(self.report.text.as_str())
            .block(block)
            .scroll((self.report.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.mode, self.tab) {
            (Mode::AddingPatient(_) | Mode::AddingMedicine(_), _) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Mode::Notice(_), _) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Close"),
            ]),
            (Mode::Normal, Tab::Report) => Line::from(vec![
                Span::styled("[←→]", key_style),
                Span::raw(" Tabs   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[r]", key_style),
                Span::raw(" Refresh Report   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Mode::Normal, _) => Line::from(vec![
                Span::styled("[←→]", key_style),
                Span::raw(" Tabs   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_patient_form(&self, frame: &mut Frame, area: Rect, form: &PatientForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Patient").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = PatientField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        lines.push(form_hint(form.error.as_deref(), "←→ to pick gender"));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        if form.active != PatientField::Gender {
            let x = cursor_column(inner, form.active.label(), form.value_len(form.active));
            let y = inner.y + form.active.row() as u16;
            frame.set_cursor_position((x, y));
        }
    }

    fn draw_medicine_form(&self, frame: &mut Frame, area: Rect, form: &MedicineForm) {
        let popup_area = centered_rect(70, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Medicine").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = MedicineField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        lines.push(form_hint(form.error.as_deref(), "Quantity may be 0"));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let x = cursor_column(inner, form.active.label(), form.value_len(form.active));
        let y = inner.y + form.active.row() as u16;
        frame.set_cursor_position((x, y));
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect, notice: &Notice) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(notice.title).borders(Borders::ALL);
        let lines = vec![
            Line::from(Span::styled(
                notice.message.clone(),
                Style::default().fg(Color::Green),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to continue",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

/// Bottom line of a form popup: the validation error if any, otherwise the
/// key hints.
fn form_hint(error: Option<&str>, extra: &str) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            format!("Enter to save • Tab to switch • {extra} • Esc to cancel"),
            Style::default().fg(Color::Gray),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn add_patient(app: &mut App, name: &str, age: &str, disease: &str) {
        app.handle_key(KeyCode::Char('+'));
        type_text(app, name);
        app.handle_key(KeyCode::Tab);
        type_text(app, age);
        app.handle_key(KeyCode::Tab);
        type_text(app, disease);
        app.handle_key(KeyCode::Enter);
    }

    #[test]
    fn invalid_age_keeps_form_open() {
        let mut app = App::new(RecordStore::new());
        add_patient(&mut app, "Ann", "abc", "Flu");

        assert!(app.store().patients().is_empty());
        match &app.mode {
            Mode::AddingPatient(form) => {
                let expected = RecordError::InvalidAge.to_string();
                assert_eq!(form.error.as_deref(), Some(expected.as_str()));
                assert_eq!(form.name, "Ann");
            }
            _ => panic!("expected the patient form to stay open"),
        }
    }

    #[test]
    fn valid_patient_is_saved_and_acknowledged() {
        let mut app = App::new(RecordStore::new());
        add_patient(&mut app, "Ann", "30", "Flu");

        assert_eq!(app.store().patients().len(), 1);
        assert!(matches!(app.mode, Mode::Notice(_)));
        assert!(render(&app).contains("Patient added successfully!"));

        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Normal));
        assert!(render(&app).contains("Ann | Age: 30 | Disease: Flu | Gender: Male"));
    }

    #[test]
    fn gender_is_picked_from_fixed_set() {
        let mut app = App::new(RecordStore::new());
        app.handle_key(KeyCode::Char('+'));
        type_text(&mut app, "Eve");
        for _ in 0..3 {
            app.handle_key(KeyCode::Tab);
        }
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::BackTab);
        app.handle_key(KeyCode::BackTab);
        type_text(&mut app, "29");
        app.handle_key(KeyCode::Enter);

        let patient = &app.store().patients()[0];
        assert_eq!(patient.gender(), crate::models::Gender::Other);
        assert_eq!(patient.age(), 29);
    }

    #[test]
    fn report_tab_regenerates_on_entry_and_refresh() {
        let mut app = App::new(RecordStore::new());
        add_patient(&mut app, "Bob", "40", "Cold");
        app.handle_key(KeyCode::Enter);
        assert!(!app.report_text().contains("Bob"));

        app.handle_key(KeyCode::Char('3'));
        assert!(app.report_text().contains("Name: Bob"));
        assert!(app
            .report_text()
            .contains("No medicines available for this disease."));

        app.handle_key(KeyCode::Char('1'));
        add_patient(&mut app, "Cy", "41", "Cold");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Char('r'));
        assert!(app.report_text().contains("Patient 2 Details"));
    }

    #[test]
    fn refresh_on_empty_store_says_nothing_is_recorded() {
        let mut app = App::new(RecordStore::new());
        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Char('r'));
        assert!(render(&app).contains("No patients or medicines recorded yet."));

        app.handle_key(KeyCode::Char('2'));
        app.handle_key(KeyCode::Char('+'));
        type_text(&mut app, "Cold");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "Zinc");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "3");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);

        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Char('r'));
        let screen = render(&app);
        assert!(screen.contains("Report refreshed."));
        assert!(!screen.contains("No patients or medicines recorded yet."));
    }

    #[test]
    fn medicine_form_rejects_negative_stock() {
        let mut app = App::new(RecordStore::new());
        app.handle_key(KeyCode::Char('2'));
        app.handle_key(KeyCode::Char('+'));
        type_text(&mut app, "Flu");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "Paracetamol");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "-1");
        app.handle_key(KeyCode::Enter);
        assert!(app.store().medicines().is_empty());
        assert!(render(&app).contains("Invalid stock! Please enter a non-negative number."));

        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        type_text(&mut app, "0");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.store().medicines().len(), 1);
        assert_eq!(app.store().medicines()[0].disease(), "Flu");
    }

    #[test]
    fn quit_keys_only_apply_in_normal_mode() {
        let mut app = App::new(RecordStore::new());
        app.handle_key(KeyCode::Char('+'));
        assert!(!app.handle_key(KeyCode::Char('q')));
        app.handle_key(KeyCode::Esc);
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
