//! Form state for the modal inputs. Each form owns its raw text fields,
//! tracks which field has focus, and validates on submit, so the app layer
//! only ever sees typed values. Validation lives here at the boundary: the
//! registry itself only re-checks key uniqueness.

use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::StudentKind;

/// Student ids follow the fixed `Sxxx` shape: a literal `S` and exactly
/// three digits.
pub(crate) fn is_valid_student_id(id: &str) -> bool {
    let mut chars = id.chars();
    if chars.next() != Some('S') {
        return false;
    }
    let digits: Vec<char> = chars.collect();
    digits.len() == 3 && digits.iter().all(char::is_ascii_digit)
}

/// The persisted format uses `,` and `;` as delimiters, so field values may
/// not contain them.
fn is_storable_char(ch: char) -> bool {
    !ch.is_control() && ch != ',' && ch != ';'
}

fn render_field_line(field_name: &str, value: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        "<required>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, style),
    ])
}

/// Fields available within the student form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum StudentField {
    #[default]
    Name,
    Id,
    Kind,
}

/// Internal representation of the "add student" form.
#[derive(Clone)]
pub(crate) struct StudentForm {
    pub(crate) name: String,
    pub(crate) id: String,
    pub(crate) kind: StudentKind,
    pub(crate) active: StudentField,
    pub(crate) error: Option<String>,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            id: String::new(),
            kind: StudentKind::Undergraduate,
            active: StudentField::Name,
            error: None,
        }
    }
}

impl StudentForm {
    /// Cycle focus through name, id, kind.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            StudentField::Name => StudentField::Id,
            StudentField::Id => StudentField::Kind,
            StudentField::Kind => StudentField::Name,
        };
    }

    /// Append a character to the active text field; the kind field is a
    /// selector and ignores typed text.
    pub(crate) fn push_char(&mut self, ch: char) {
        match self.active {
            StudentField::Name => {
                if is_storable_char(ch) {
                    self.name.push(ch);
                }
            }
            StudentField::Id => {
                if ch.is_ascii_alphanumeric() && self.id.chars().count() < 4 {
                    self.id.push(ch);
                }
            }
            StudentField::Kind => {}
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            StudentField::Name => {
                self.name.pop();
            }
            StudentField::Id => {
                self.id.pop();
            }
            StudentField::Kind => {}
        }
    }

    /// Flip between the two kinds when the selector has focus.
    pub(crate) fn toggle_kind(&mut self) {
        if self.active == StudentField::Kind {
            self.kind = match self.kind {
                StudentKind::Undergraduate => StudentKind::Postgraduate,
                StudentKind::Postgraduate => StudentKind::Undergraduate,
            };
        }
    }

    /// Validate the inputs and return typed values ready for the registry.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, StudentKind)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Student name is required."));
        }
        let id = self.id.trim();
        if !is_valid_student_id(id) {
            return Err(anyhow!("Student ID must match the format Sxxx (e.g. S001)."));
        }
        Ok((name.to_string(), id.to_string(), self.kind))
    }

    pub(crate) fn build_lines(&self) -> Vec<Line<'static>> {
        let kind_style = if self.active == StudentField::Kind {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        vec![
            render_field_line("Name", &self.name, self.active == StudentField::Name),
            render_field_line("ID (Sxxx)", &self.id, self.active == StudentField::Id),
            Line::from(vec![
                Span::raw("Type: "),
                Span::styled(self.kind.label().to_string(), kind_style),
                Span::styled(
                    "  (Left/Right to change)",
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        ]
    }
}

/// Fields available within the course form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum CourseField {
    #[default]
    Name,
    Code,
}

/// Internal representation of the "add course" form.
#[derive(Default, Clone)]
pub(crate) struct CourseForm {
    pub(crate) name: String,
    pub(crate) code: String,
    pub(crate) active: CourseField,
    pub(crate) error: Option<String>,
}

impl CourseForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            CourseField::Name => CourseField::Code,
            CourseField::Code => CourseField::Name,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        if !is_storable_char(ch) {
            return;
        }
        match self.active {
            CourseField::Name => self.name.push(ch),
            CourseField::Code => self.code.push(ch),
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            CourseField::Name => {
                self.name.pop();
            }
            CourseField::Code => {
                self.code.pop();
            }
        }
    }

    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Course name is required."));
        }
        let code = self.code.trim();
        if code.is_empty() {
            return Err(anyhow!("Course code is required."));
        }
        Ok((name.to_string(), code.to_string()))
    }

    pub(crate) fn build_lines(&self) -> Vec<Line<'static>> {
        vec![
            render_field_line("Course name", &self.name, self.active == CourseField::Name),
            render_field_line("Course code", &self.code, self.active == CourseField::Code),
        ]
    }
}

/// Menu actions that need exactly one key typed in before they can run.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum PromptAction {
    RemoveStudent,
    SearchStudents,
    RemoveCourse,
    CourseReport,
    StudentReport,
}

impl PromptAction {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            PromptAction::RemoveStudent => "Remove Student",
            PromptAction::SearchStudents => "Search Students",
            PromptAction::RemoveCourse => "Remove Course",
            PromptAction::CourseReport => "Course Report",
            PromptAction::StudentReport => "Student Report",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            PromptAction::RemoveStudent => "Student ID to remove",
            PromptAction::SearchStudents => "Keyword (name, ID, or course code)",
            PromptAction::RemoveCourse => "Course code to remove",
            PromptAction::CourseReport => "Course code for report",
            PromptAction::StudentReport => "Student ID for report",
        }
    }
}

/// Single-field prompt shared by the remove/search/report actions.
#[derive(Clone)]
pub(crate) struct PromptForm {
    pub(crate) action: PromptAction,
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl PromptForm {
    pub(crate) fn new(action: PromptAction) -> Self {
        Self {
            action,
            value: String::new(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.value.push(ch);
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn parse_input(&self) -> Result<String> {
        let value = self.value.trim();
        if value.is_empty() {
            return Err(anyhow!("Input cannot be empty."));
        }
        Ok(value.to_string())
    }

    pub(crate) fn build_lines(&self) -> Vec<Line<'static>> {
        vec![render_field_line(self.action.label(), &self.value, true)]
    }
}

/// The two enrollment directions share one two-field form.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum PairAction {
    Enroll,
    Unenroll,
}

impl PairAction {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            PairAction::Enroll => "Enroll Student in Course",
            PairAction::Unenroll => "Remove Student from Course",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum PairField {
    #[default]
    StudentId,
    CourseCode,
}

/// Student-id + course-code input used by enroll and unenroll.
#[derive(Clone)]
pub(crate) struct PairForm {
    pub(crate) action: PairAction,
    pub(crate) student_id: String,
    pub(crate) course_code: String,
    pub(crate) active: PairField,
    pub(crate) error: Option<String>,
}

impl PairForm {
    pub(crate) fn new(action: PairAction) -> Self {
        Self {
            action,
            student_id: String::new(),
            course_code: String::new(),
            active: PairField::StudentId,
            error: None,
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            PairField::StudentId => PairField::CourseCode,
            PairField::CourseCode => PairField::StudentId,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        if !is_storable_char(ch) {
            return;
        }
        match self.active {
            PairField::StudentId => self.student_id.push(ch),
            PairField::CourseCode => self.course_code.push(ch),
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            PairField::StudentId => {
                self.student_id.pop();
            }
            PairField::CourseCode => {
                self.course_code.pop();
            }
        }
    }

    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        let student_id = self.student_id.trim();
        if student_id.is_empty() {
            return Err(anyhow!("Student ID is required."));
        }
        let course_code = self.course_code.trim();
        if course_code.is_empty() {
            return Err(anyhow!("Course code is required."));
        }
        Ok((student_id.to_string(), course_code.to_string()))
    }

    pub(crate) fn build_lines(&self) -> Vec<Line<'static>> {
        vec![
            render_field_line(
                "Student ID",
                &self.student_id,
                self.active == PairField::StudentId,
            ),
            render_field_line(
                "Course code",
                &self.course_code,
                self.active == PairField::CourseCode,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_id_format_is_enforced() {
        assert!(is_valid_student_id("S001"));
        assert!(is_valid_student_id("S999"));
        assert!(!is_valid_student_id("s001"));
        assert!(!is_valid_student_id("S01"));
        assert!(!is_valid_student_id("S0001"));
        assert!(!is_valid_student_id("X001"));
        assert!(!is_valid_student_id("S0a1"));
    }

    #[test]
    fn student_form_rejects_delimiters_in_name() {
        let mut form = StudentForm::default();
        for ch in "Alice,;Johnson".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.name, "AliceJohnson");
    }

    #[test]
    fn student_form_validates_on_submit() {
        let mut form = StudentForm::default();
        assert!(form.parse_inputs().is_err());

        for ch in "Alice Johnson".chars() {
            form.push_char(ch);
        }
        form.next_field();
        for ch in "S001".chars() {
            form.push_char(ch);
        }
        let (name, id, kind) = form.parse_inputs().unwrap();
        assert_eq!(name, "Alice Johnson");
        assert_eq!(id, "S001");
        assert_eq!(kind, StudentKind::Undergraduate);
    }

    #[test]
    fn kind_selector_toggles_only_when_focused() {
        let mut form = StudentForm::default();
        form.toggle_kind();
        assert_eq!(form.kind, StudentKind::Undergraduate);

        form.active = StudentField::Kind;
        form.toggle_kind();
        assert_eq!(form.kind, StudentKind::Postgraduate);
    }
}
