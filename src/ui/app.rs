use std::cmp::min;
use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::registry::Registry;
use crate::reports::{save_course_report, save_student_report};
use crate::store::{save_registry, LoadSummary, StorePaths};

use super::forms::{
    CourseForm, PairAction, PairForm, PromptAction, PromptForm, StudentForm,
};
use super::helpers::{centered_rect, surface_error};
use super::screens::{ListScreen, ReportScreen};

/// Footer space reserved for status messages and key hints.
const FOOTER_HEIGHT: u16 = 3;

/// Every action reachable from the main menu.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MenuAction {
    AddStudent,
    RemoveStudent,
    ListStudents,
    SearchStudents,
    AddCourse,
    RemoveCourse,
    ListCourses,
    Enroll,
    Unenroll,
    CourseReport,
    StudentReport,
    ExportData,
    PopulateSampleData,
    Exit,
}

/// Menu entries in their original groupings; the order here is the order on
/// screen.
const MENU_SECTIONS: &[(&str, &[(MenuAction, &str)])] = &[
    (
        "Student Management",
        &[
            (MenuAction::AddStudent, "Add Student"),
            (MenuAction::RemoveStudent, "Remove Student"),
            (MenuAction::ListStudents, "List Students"),
            (MenuAction::SearchStudents, "Search Students"),
        ],
    ),
    (
        "Course Management",
        &[
            (MenuAction::AddCourse, "Add Course"),
            (MenuAction::RemoveCourse, "Remove Course"),
            (MenuAction::ListCourses, "List Courses"),
        ],
    ),
    (
        "Enrollment",
        &[
            (MenuAction::Enroll, "Enroll Student in Course"),
            (MenuAction::Unenroll, "Remove Student from Course"),
        ],
    ),
    (
        "Reporting",
        &[
            (MenuAction::CourseReport, "Generate Course Report"),
            (MenuAction::StudentReport, "Generate Student Report"),
        ],
    ),
    (
        "Data",
        &[
            (MenuAction::ExportData, "Export Data to CSV"),
            (MenuAction::PopulateSampleData, "Populate Sample Data"),
            (MenuAction::Exit, "Exit"),
        ],
    ),
];

fn menu_len() -> usize {
    MENU_SECTIONS.iter().map(|(_, items)| items.len()).sum()
}

fn menu_action(index: usize) -> MenuAction {
    let mut remaining = index;
    for (_, items) in MENU_SECTIONS {
        if remaining < items.len() {
            return items[remaining].0;
        }
        remaining -= items.len();
    }
    MenuAction::Exit
}

/// High-level navigation states. Keeping this explicit makes it easy to
/// reason about which rendering path runs and what keys should do.
enum Screen {
    Menu,
    List(ListScreen),
    Report(ReportScreen),
}

/// Modal input states layered over the current screen. Esc always cancels
/// back to `Normal`; cancellation is a transition here, never a registry
/// error.
enum Mode {
    Normal,
    Student(StudentForm),
    Course(CourseForm),
    Prompt(PromptForm),
    Pair(PairForm),
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

/// Central application state shared across the TUI. Owns the registry for
/// the lifetime of the session; `main.rs` takes it back for the final save.
pub struct App {
    registry: Registry,
    paths: StorePaths,
    menu_selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(registry: Registry, paths: StorePaths, summary: LoadSummary) -> Self {
        let mut text = format!(
            "Loaded {} students and {} courses.",
            summary.students.loaded, summary.courses.loaded
        );
        if summary.skipped_rows() > 0 {
            text.push_str(&format!(" {} rows skipped.", summary.skipped_rows()));
        }
        Self {
            registry,
            paths,
            menu_selected: 0,
            screen: Screen::Menu,
            mode: Mode::Normal,
            status: Some(StatusMessage {
                text,
                kind: StatusKind::Info,
            }),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Dispatch one key press. Returns `true` when the app should exit.
    pub(crate) fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Student(form) => self.handle_student_form(code, form),
            Mode::Course(form) => self.handle_course_form(code, form),
            Mode::Prompt(form) => self.handle_prompt_form(code, form),
            Mode::Pair(form) => self.handle_pair_form(code, form),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let mut back_to_menu = false;
        let mut run_action = None;

        match &mut self.screen {
            Screen::Menu => match code {
                KeyCode::Char('q') | KeyCode::Esc => *exit = true,
                KeyCode::Up => self.menu_selected = self.menu_selected.saturating_sub(1),
                KeyCode::Down => self.menu_selected = min(self.menu_selected + 1, menu_len() - 1),
                KeyCode::Enter => run_action = Some(menu_action(self.menu_selected)),
                _ => {}
            },
            Screen::List(list) => match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc => back_to_menu = true,
                KeyCode::Up => list.move_selection(-1),
                KeyCode::Down => list.move_selection(1),
                KeyCode::PageUp => list.move_selection(-5),
                KeyCode::PageDown => list.move_selection(5),
                _ => {}
            },
            Screen::Report(report) => match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc => back_to_menu = true,
                KeyCode::Up => report.scroll_by(-1),
                KeyCode::Down => report.scroll_by(1),
                KeyCode::PageUp => report.scroll_by(-5),
                KeyCode::PageDown => report.scroll_by(5),
                _ => {}
            },
        }

        if back_to_menu {
            self.screen = Screen::Menu;
            self.clear_status();
        }
        if let Some(action) = run_action {
            return Ok(self.run_menu_action(action, exit));
        }
        Ok(Mode::Normal)
    }

    fn run_menu_action(&mut self, action: MenuAction, exit: &mut bool) -> Mode {
        self.clear_status();
        match action {
            MenuAction::AddStudent => Mode::Student(StudentForm::default()),
            MenuAction::RemoveStudent => Mode::Prompt(PromptForm::new(PromptAction::RemoveStudent)),
            MenuAction::ListStudents => {
                let rows: Vec<String> = self.registry.students().map(|s| s.summary()).collect();
                self.set_status(format!("{} students.", rows.len()), StatusKind::Info);
                self.screen = Screen::List(ListScreen::new("Students", rows));
                Mode::Normal
            }
            MenuAction::SearchStudents => {
                Mode::Prompt(PromptForm::new(PromptAction::SearchStudents))
            }
            MenuAction::AddCourse => Mode::Course(CourseForm::default()),
            MenuAction::RemoveCourse => Mode::Prompt(PromptForm::new(PromptAction::RemoveCourse)),
            MenuAction::ListCourses => {
                let rows: Vec<String> = self.registry.courses().map(|c| c.summary()).collect();
                self.set_status(format!("{} courses.", rows.len()), StatusKind::Info);
                self.screen = Screen::List(ListScreen::new("Courses", rows));
                Mode::Normal
            }
            MenuAction::Enroll => Mode::Pair(PairForm::new(PairAction::Enroll)),
            MenuAction::Unenroll => Mode::Pair(PairForm::new(PairAction::Unenroll)),
            MenuAction::CourseReport => Mode::Prompt(PromptForm::new(PromptAction::CourseReport)),
            MenuAction::StudentReport => {
                Mode::Prompt(PromptForm::new(PromptAction::StudentReport))
            }
            MenuAction::ExportData => {
                match save_registry(&self.registry, &self.paths) {
                    Ok(()) => self.set_status(
                        format!("Data exported under {}.", self.paths.root().display()),
                        StatusKind::Info,
                    ),
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
                Mode::Normal
            }
            MenuAction::PopulateSampleData => {
                self.registry.populate_sample_data();
                self.set_status(
                    format!(
                        "Sample data populated: {} students, {} courses.",
                        self.registry.student_count(),
                        self.registry.course_count()
                    ),
                    StatusKind::Info,
                );
                Mode::Normal
            }
            MenuAction::Exit => {
                *exit = true;
                Mode::Normal
            }
        }
    }

    fn cancel_form(&mut self) -> Mode {
        self.set_status("Operation cancelled.", StatusKind::Info);
        Mode::Normal
    }

    fn handle_student_form(&mut self, code: KeyCode, mut form: StudentForm) -> Mode {
        match code {
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Tab | KeyCode::Down => {
                form.next_field();
                Mode::Student(form)
            }
            KeyCode::Left | KeyCode::Right => {
                form.toggle_kind();
                Mode::Student(form)
            }
            KeyCode::Backspace => {
                form.backspace();
                Mode::Student(form)
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok((name, id, kind)) => match self.registry.add_student(&name, &id, kind) {
                    Ok(()) => {
                        self.set_status(
                            format!("Student added: {name} ({kind})."),
                            StatusKind::Info,
                        );
                        Mode::Normal
                    }
                    Err(err) => {
                        form.error = Some(err.to_string());
                        Mode::Student(form)
                    }
                },
                Err(err) => {
                    form.error = Some(surface_error(&err));
                    Mode::Student(form)
                }
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
                Mode::Student(form)
            }
            _ => Mode::Student(form),
        }
    }

    fn handle_course_form(&mut self, code: KeyCode, mut form: CourseForm) -> Mode {
        match code {
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                form.toggle_field();
                Mode::Course(form)
            }
            KeyCode::Backspace => {
                form.backspace();
                Mode::Course(form)
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok((name, code)) => match self.registry.add_course(&name, &code) {
                    Ok(()) => {
                        self.set_status(
                            format!("Course added: {name} ({code})."),
                            StatusKind::Info,
                        );
                        Mode::Normal
                    }
                    Err(err) => {
                        form.error = Some(err.to_string());
                        Mode::Course(form)
                    }
                },
                Err(err) => {
                    form.error = Some(surface_error(&err));
                    Mode::Course(form)
                }
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
                Mode::Course(form)
            }
            _ => Mode::Course(form),
        }
    }

    fn handle_prompt_form(&mut self, code: KeyCode, mut form: PromptForm) -> Mode {
        match code {
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Backspace => {
                form.backspace();
                Mode::Prompt(form)
            }
            KeyCode::Enter => match form.parse_input() {
                Ok(value) => match self.run_prompt(form.action, &value) {
                    Ok(()) => Mode::Normal,
                    Err(message) => {
                        form.error = Some(message);
                        Mode::Prompt(form)
                    }
                },
                Err(err) => {
                    form.error = Some(surface_error(&err));
                    Mode::Prompt(form)
                }
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
                Mode::Prompt(form)
            }
            _ => Mode::Prompt(form),
        }
    }

    /// Run a prompt-driven action. `Err` carries the message to show inside
    /// the still-open prompt.
    fn run_prompt(&mut self, action: PromptAction, value: &str) -> Result<(), String> {
        match action {
            PromptAction::RemoveStudent => {
                self.registry
                    .remove_student(value)
                    .map_err(|err| err.to_string())?;
                self.set_status(format!("Student removed: {value}."), StatusKind::Info);
            }
            PromptAction::RemoveCourse => {
                self.registry
                    .remove_course(value)
                    .map_err(|err| err.to_string())?;
                self.set_status(format!("Course removed: {value}."), StatusKind::Info);
            }
            PromptAction::SearchStudents => {
                let rows: Vec<String> = self
                    .registry
                    .search_students(value)
                    .map(|s| s.summary())
                    .collect();
                if rows.is_empty() {
                    self.set_status("No matching student found.", StatusKind::Info);
                } else {
                    self.set_status(format!("{} matching students.", rows.len()), StatusKind::Info);
                }
                self.screen = Screen::List(ListScreen::new(
                    format!("Search Results for \"{value}\""),
                    rows,
                ));
            }
            PromptAction::CourseReport => {
                let saved = save_course_report(&self.registry, value, &self.paths)
                    .map_err(|err| surface_error(&err))?;
                self.set_status(
                    format!("Report saved to {}.", saved.path.display()),
                    StatusKind::Info,
                );
                self.screen = Screen::Report(ReportScreen::new(
                    format!("Course Report for {value}"),
                    saved.body,
                ));
            }
            PromptAction::StudentReport => {
                let saved = save_student_report(&self.registry, value, &self.paths)
                    .map_err(|err| surface_error(&err))?;
                self.set_status(
                    format!("Report saved to {}.", saved.path.display()),
                    StatusKind::Info,
                );
                self.screen = Screen::Report(ReportScreen::new(
                    format!("Student Report for {value}"),
                    saved.body,
                ));
            }
        }
        Ok(())
    }

    fn handle_pair_form(&mut self, code: KeyCode, mut form: PairForm) -> Mode {
        match code {
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                form.toggle_field();
                Mode::Pair(form)
            }
            KeyCode::Backspace => {
                form.backspace();
                Mode::Pair(form)
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok((student_id, course_code)) => {
                    let outcome = match form.action {
                        PairAction::Enroll => self.registry.enroll(&student_id, &course_code),
                        PairAction::Unenroll => self.registry.unenroll(&student_id, &course_code),
                    };
                    match outcome {
                        Ok(()) => {
                            let message = match form.action {
                                PairAction::Enroll => format!(
                                    "Enrolled student {student_id} in course {course_code}."
                                ),
                                PairAction::Unenroll => format!(
                                    "Removed student {student_id} from course {course_code}."
                                ),
                            };
                            self.set_status(message, StatusKind::Info);
                            Mode::Normal
                        }
                        Err(err) => {
                            form.error = Some(err.to_string());
                            Mode::Pair(form)
                        }
                    }
                }
                Err(err) => {
                    form.error = Some(surface_error(&err));
                    Mode::Pair(form)
                }
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
                Mode::Pair(form)
            }
            _ => Mode::Pair(form),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Menu => self.draw_menu(frame, content_area),
            Screen::List(list) => self.draw_list(frame, content_area, list),
            Screen::Report(report) => self.draw_report(frame, content_area, report),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Student(form) => self.draw_form(
                frame,
                area,
                "Add Student",
                form.build_lines(),
                form.error.as_deref(),
            ),
            Mode::Course(form) => self.draw_form(
                frame,
                area,
                "Add Course",
                form.build_lines(),
                form.error.as_deref(),
            ),
            Mode::Prompt(form) => self.draw_form(
                frame,
                area,
                form.action.title(),
                form.build_lines(),
                form.error.as_deref(),
            ),
            Mode::Pair(form) => self.draw_form(
                frame,
                area,
                form.action.title(),
                form.build_lines(),
                form.error.as_deref(),
            ),
            Mode::Normal => {}
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        let mut index = 0;
        for (section, items) in MENU_SECTIONS {
            lines.push(Line::from(Span::styled(
                *section,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            for (_, label) in *items {
                let style = if index == self.menu_selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(format!("  {label}"), style)));
                index += 1;
            }
            lines.push(Line::from(""));
        }

        let menu = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Student Roster Manager"),
        );
        frame.render_widget(menu, area);
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect, list: &ListScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", list.title, list.rows.len()));

        if list.rows.is_empty() {
            let message = Paragraph::new("Nothing to show.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let lines: Vec<Line> = list
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                if idx == list.selected {
                    Line::from(Span::styled(
                        format!("> {row}"),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {row}"))
                }
            })
            .collect();

        // Keep the selection roughly centered once the list outgrows the
        // viewport.
        let visible = area.height.saturating_sub(2) as usize;
        let offset = list.selected.saturating_sub(visible / 2) as u16;

        let body = Paragraph::new(lines).scroll((offset, 0)).block(block);
        frame.render_widget(body, area);
    }

    fn draw_report(&self, frame: &mut Frame, area: Rect, report: &ReportScreen) {
        let body = Paragraph::new(report.body.as_str())
            .scroll((report.scroll, 0))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(report.title.clone()),
            );
        frame.render_widget(body, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(status) => Line::from(Span::styled(status.text.clone(), status.kind.style())),
            None => {
                let hint = match (&self.mode, &self.screen) {
                    (Mode::Normal, Screen::Menu) => "Up/Down: Select  Enter: Run  q: Quit",
                    (Mode::Normal, _) => "Up/Down: Scroll  Esc: Back  q: Quit",
                    _ => "Enter: Confirm  Tab: Next field  Esc: Cancel",
                };
                Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
            }
        };

        let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }

    fn draw_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        mut lines: Vec<Line<'static>>,
        error: Option<&str>,
    ) {
        let rect = centered_rect(60, 40, area);
        frame.render_widget(Clear, rect);

        if let Some(error) = error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter: Save  Tab: Next field  Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let form = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        frame.render_widget(form, rect);
    }
}
