use lazy_static::lazy_static;
use log::{error, warn};
use regex::Regex;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::error::GradeError;
use crate::grade::Grade;
use crate::gradesheet::GradeSheet;
use crate::layout::ReportFormat;
use crate::subject::{SubjectField, parse_credits};

lazy_static! {
    static ref SEMESTER_REGEX: Regex =
        Regex::new(r"^(add|remove)\s+semester(?:\s+(\d+))?$").unwrap();
    static ref SUBJECT_REGEX: Regex =
        Regex::new(r"^(add|remove)\s+subject\s+(\d+)(?:\s+(\d+))?$").unwrap();
    static ref SET_REGEX: Regex =
        Regex::new(r"^set\s+(\d+)\s+(\d+)\s+(name|grade|credits)(?:\s+(.*))?$").unwrap();
}

/// A parsed line of user input.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    AddSemester,
    RemoveSemester(usize),
    AddSubject(usize),
    RemoveSubject(usize, usize),
    UpdateSubject(usize, usize, SubjectField),
    Show,
    Grades,
    Json,
    Export,
    DisableOutput,
    EnableOutput,
    Help,
    Quit,
}

/// A user-visible notification, the terminal stand-in for a toast.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl Notice {
    fn info(title: &str, description: String) -> Self {
        Notice {
            title: title.to_string(),
            description,
            destructive: false,
        }
    }

    fn destructive(title: &str, description: String) -> Self {
        Notice {
            title: title.to_string(),
            description,
            destructive: true,
        }
    }

    pub fn print(&self) {
        if self.destructive {
            eprintln!("!! {}: {}", self.title, self.description);
        } else {
            println!("{}: {}", self.title, self.description);
        }
    }
}

/// Notice shown when an edit is rejected.
pub fn notice_for(err: &GradeError) -> Notice {
    if err.is_capacity() {
        Notice::destructive("Maximum limit reached", err.to_string())
    } else {
        Notice::destructive("Invalid input", err.to_string())
    }
}

/// The single notice shown for any export failure.
pub fn export_failed_notice() -> Notice {
    Notice::destructive(
        "Download Failed",
        "There was an error generating your grade report.".to_string(),
    )
}

/// Why a line of input did not become a [`Command`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CommandError {
    /// The line is not a command, or a position is not a number.
    #[error("{0}")]
    Syntax(String),
    /// A `set` line whose grade or credits value was rejected.
    #[error("{status}")]
    Value { status: String, notice: Notice },
}

impl CommandError {
    fn syntax(reason: &str) -> Self {
        CommandError::Syntax(reason.to_string())
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            CommandError::Syntax(_) => None,
            CommandError::Value { notice, .. } => Some(notice),
        }
    }
}

impl From<GradeError> for CommandError {
    fn from(err: GradeError) -> Self {
        CommandError::Value {
            status: err.to_string(),
            notice: notice_for(&err),
        }
    }
}

/// Parses a command line
///
/// A line that is not a command gives [`CommandError::Syntax`] with a status
/// such as "invalid command". A bad grade or credits value in `set` gives
/// [`CommandError::Value`], which carries the same "Invalid input" notice as
/// an edit rejected by [`App::execute`].
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::syntax("invalid command"));
    }

    match line {
        "show" => return Ok(Command::Show),
        "grades" => return Ok(Command::Grades),
        "json" => return Ok(Command::Json),
        "export" => return Ok(Command::Export),
        "disable_output" => return Ok(Command::DisableOutput),
        "enable_output" => return Ok(Command::EnableOutput),
        "help" => return Ok(Command::Help),
        "q" => return Ok(Command::Quit),
        _ => {}
    }

    if let Some(captures) = SEMESTER_REGEX.captures(line) {
        let position = captures.get(2).map(|m| parse_position(m.as_str()));
        return match (&captures[1], position) {
            ("add", None) => Ok(Command::AddSemester),
            ("remove", Some(position)) => Ok(Command::RemoveSemester(position?)),
            _ => Err(CommandError::syntax("invalid command")),
        };
    }

    if let Some(captures) = SUBJECT_REGEX.captures(line) {
        let semester = parse_position(&captures[2])?;
        let subject = captures.get(3).map(|m| parse_position(m.as_str()));
        return match (&captures[1], subject) {
            ("add", None) => Ok(Command::AddSubject(semester)),
            ("remove", Some(subject)) => Ok(Command::RemoveSubject(semester, subject?)),
            _ => Err(CommandError::syntax("invalid command")),
        };
    }

    if let Some(captures) = SET_REGEX.captures(line) {
        let semester = parse_position(&captures[1])?;
        let subject = parse_position(&captures[2])?;
        let value = captures.get(4).map_or("", |m| m.as_str()).trim();
        let field = match &captures[3] {
            "name" => SubjectField::Name(value.to_string()),
            "grade" if value.is_empty() || value == "-" => SubjectField::Grade(None),
            "grade" => SubjectField::Grade(Some(value.parse::<Grade>()?)),
            _ => SubjectField::Credits(parse_credits(value)?),
        };
        return Ok(Command::UpdateSubject(semester, subject, field));
    }

    Err(CommandError::syntax("invalid command"))
}

fn parse_position(s: &str) -> Result<usize, CommandError> {
    s.parse::<usize>()
        .map_err(|_| CommandError::syntax("invalid position"))
}

/// Result of executing one command.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub status: String,
    pub notice: Option<Notice>,
    /// Text the command asked to print (`show`, `grades`, `json`, `help`).
    pub output: Option<String>,
}

impl Outcome {
    fn ok() -> Self {
        Outcome {
            status: "ok".to_string(),
            notice: None,
            output: None,
        }
    }

    fn printing(output: String) -> Self {
        Outcome {
            output: Some(output),
            ..Outcome::ok()
        }
    }

    fn rejected(err: &GradeError) -> Self {
        let status = if err.is_capacity() {
            "limit reached".to_string()
        } else {
            err.to_string()
        };
        Outcome {
            status,
            notice: Some(notice_for(err)),
            output: None,
        }
    }
}

/// Interactive session: owns the grade sheet for the lifetime of the process.
pub struct App {
    sheet: GradeSheet,
    format: ReportFormat,
    output_dir: PathBuf,
    show: bool,
}

impl App {
    pub fn new(format: ReportFormat, output_dir: PathBuf) -> Self {
        App {
            sheet: GradeSheet::gradesheet_create(),
            format,
            output_dir,
            show: true,
        }
    }

    pub fn sheet(&self) -> &GradeSheet {
        &self.sheet
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        let result = match command {
            Command::AddSemester => self.sheet.add_semester().map(|_| ()),
            Command::RemoveSemester(position) => self.sheet.remove_semester(position).map(|_| ()),
            Command::AddSubject(position) => self.sheet.add_subject(position).map(|_| ()),
            Command::RemoveSubject(semester, subject) => {
                self.sheet.remove_subject(semester, subject).map(|_| ())
            }
            Command::UpdateSubject(semester, subject, field) => {
                self.sheet.update_subject(semester, subject, field)
            }
            Command::Show => return Outcome::printing(self.sheet.gradesheet_render()),
            Command::Grades => return Outcome::printing(grade_table()),
            Command::Json => {
                return match serde_json::to_string_pretty(&self.sheet) {
                    Ok(json) => Outcome::printing(json),
                    Err(e) => Outcome::rejected(&GradeError::Format(e)),
                };
            }
            Command::Export => return self.export_report(),
            Command::DisableOutput => {
                self.show = false;
                Ok(())
            }
            Command::EnableOutput => {
                self.show = true;
                Ok(())
            }
            Command::Help => return Outcome::printing(HELP.to_string()),
            Command::Quit => Ok(()),
        };

        match result {
            Ok(()) => Outcome::ok(),
            Err(e) => {
                if !e.is_capacity() {
                    warn!("command rejected: {}", e);
                }
                Outcome::rejected(&e)
            }
        }
    }

    #[cfg(feature = "export")]
    fn export_report(&self) -> Outcome {
        use crate::downloader::{export, save_artifact};
        use crate::layout::ExportPlan;

        let saved = export(&self.sheet, &self.format)
            .and_then(|artifact| save_artifact(&artifact, &self.output_dir).map(|_| artifact));

        match saved {
            Ok(artifact) => {
                let description = match artifact.plan {
                    ExportPlan::Image => {
                        format!("Your grade report has been saved as {}", artifact.filename)
                    }
                    ExportPlan::Document { .. } => format!(
                        "Your complete grade report has been saved as {}",
                        artifact.filename
                    ),
                };
                Outcome {
                    notice: Some(Notice::info("Grade Report Downloaded", description)),
                    ..Outcome::ok()
                }
            }
            Err(e) => {
                error!("export failed: {}", e);
                Outcome {
                    status: "export failed".to_string(),
                    notice: Some(export_failed_notice()),
                    output: None,
                }
            }
        }
    }

    #[cfg(not(feature = "export"))]
    fn export_report(&self) -> Outcome {
        error!("export failed: built without the `export` feature");
        Outcome {
            status: "export failed".to_string(),
            notice: Some(export_failed_notice()),
            output: None,
        }
    }
}

/// Selector listing, e.g. `O (10 points)`.
pub fn grade_table() -> String {
    Grade::ALL
        .iter()
        .map(|grade| format!("{} ({} points)", grade, grade.points()))
        .collect::<Vec<_>>()
        .join("\n")
}

const HELP: &str = "Commands:
  add semester: Add a semester (up to 10)
  remove semester <s>: Remove the semester at position s
  add subject <s>: Add a subject to semester s (up to 20)
  remove subject <s> <n>: Remove subject n of semester s
  set <s> <n> name <text>: Rename a subject
  set <s> <n> grade <G|->: Set or clear a grade (O, A+, A, B+, B, C, U, SA, W)
  set <s> <n> credits <x>: Set credits (0.5 to 5, step 0.5)
  show: Print the grade sheet
  grades: Print the grade point table
  json: Print the grade sheet as JSON
  export: Save grade_report.png (up to 4 semesters) or grade_report.pdf
  disable_output: Disable output display
  enable_output: Enable output display
  q: Quit";

/// Runs the command loop on stdin until `q` or end of input.
pub fn run(format: ReportFormat, output_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(format, output_dir);
    let mut status = String::from("ok");
    // `show` already printed the sheet, so the next prompt skips it
    let mut redraw = true;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if app.show && redraw {
            app.sheet.gradesheet_display();
        }
        redraw = true;

        print!("[CGPA {:.2}] ({}) > ", app.sheet.cgpa(), status);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                if let Some(notice) = err.notice() {
                    warn!("command rejected: {}", err);
                    notice.print();
                }
                status = err.to_string();
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        redraw = command != Command::Show;

        let outcome = app.execute(command);
        if let Some(output) = &outcome.output {
            println!("{}", output);
        }
        if let Some(notice) = &outcome.notice {
            notice.print();
        }
        status = outcome.status;
    }

    Ok(())
}
