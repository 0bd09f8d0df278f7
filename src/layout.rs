//! Report page layout.
//!
//! Turns the semesters of one page into a flat list of [`DrawCommand`]s. All
//! geometry is read from [`ReportFormat`], so the report can be checked without
//! rasterizing anything.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{GradeError, Result};
use crate::semester::Semester;

/// Number of semester blocks in the 2×2 page grid.
pub const GRID_SLOTS: usize = 4;

/// An sRGB color, serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const fn gray(level: u8) -> Self {
        Color(level, level, level)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A single primitive painted onto the page canvas.
///
/// Coordinates are pixels from the top-left corner; a text `y` is its baseline.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Text {
        content: String,
        x: f64,
        y: f64,
        size: u32,
        bold: bool,
        color: Color,
        align: Align,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub title: Color,
    pub subtitle: Color,
    pub muted: Color,
    pub semester_bar: Color,
    pub column_bar: Color,
    pub row_even: Color,
    pub row_odd: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color(0x00, 0x00, 0x00),
            title: Color(0xff, 0xff, 0xff),
            subtitle: Color::gray(0xcc),
            muted: Color::gray(0x88),
            semester_bar: Color(0x4b, 0x00, 0x82),
            column_bar: Color(0x2d, 0x1b, 0x69),
            row_even: Color::gray(0x1a),
            row_odd: Color::gray(0x0f),
            text: Color(0xff, 0xff, 0xff),
        }
    }
}

/// Geometry and wording of a report page.
///
/// Every field has a default, so a JSON file only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportFormat {
    pub width: u32,
    pub height: u32,
    pub semesters_per_page: usize,
    pub margin: f64,
    pub column_gap: f64,
    pub row_gap: f64,
    pub grid_top: f64,
    /// Vertical space kept free for the title band and the footer.
    pub reserved_height: f64,
    pub semester_bar_height: f64,
    pub column_bar_height: f64,
    pub row_height: f64,
    /// Grade and credits column centers, as fractions of the block width.
    pub grade_column: f64,
    pub credits_column: f64,
    pub name_max_chars: usize,
    pub cgpa_panel_width: f64,
    pub cgpa_panel_height: f64,
    /// Distance from the bottom edge to the top of the CGPA panel.
    pub cgpa_panel_offset: f64,
    pub title: String,
    pub subtitle: String,
    pub footer: String,
    pub palette: Palette,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            semesters_per_page: 4,
            margin: 60.0,
            column_gap: 20.0,
            row_gap: 20.0,
            grid_top: 120.0,
            reserved_height: 200.0,
            semester_bar_height: 35.0,
            column_bar_height: 30.0,
            row_height: 25.0,
            grade_column: 0.65,
            credits_column: 0.85,
            name_max_chars: 20,
            cgpa_panel_width: 400.0,
            cgpa_panel_height: 70.0,
            cgpa_panel_offset: 120.0,
            title: "Grade Report".to_string(),
            subtitle: "Generated by GradeMate CGPA Calculator".to_string(),
            footer: "Made with 💜 by Abhishek Kumaran CSE A [23CS052]".to_string(),
            palette: Palette::default(),
        }
    }
}

impl ReportFormat {
    pub fn from_json(json: &str) -> Result<Self> {
        let format: Self = serde_json::from_str(json)?;
        format.validate()?;
        Ok(format)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Checks that the page grid can hold what pagination puts on a page.
    ///
    /// `semesters_per_page` drives both pagination and the PNG/PDF threshold,
    /// while a page only has [`GRID_SLOTS`] blocks, so it must be 1 to 4.
    pub fn validate(&self) -> Result<()> {
        if !(1..=GRID_SLOTS).contains(&self.semesters_per_page) {
            return Err(GradeError::InvalidFormat(format!(
                "semesters_per_page must be between 1 and {}, got {}",
                GRID_SLOTS, self.semesters_per_page
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(GradeError::InvalidFormat(format!(
                "page size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Width of one of the two grid columns.
    pub fn column_width(&self) -> f64 {
        (self.width as f64 - 2.0 * self.margin) / 2.0
    }

    /// Height allotted to one grid cell.
    pub fn block_height(&self) -> f64 {
        (self.height as f64 - self.reserved_height) / 2.0 - self.row_gap
    }

    /// Number of subject rows that fit in a block below its two header bars.
    pub fn rows_per_block(&self) -> usize {
        let available = self.block_height() - self.semester_bar_height - self.column_bar_height;
        if available <= 0.0 || self.row_height <= 0.0 {
            return 0;
        }
        (available / self.row_height).floor() as usize
    }

    /// Top-left corner of the grid cell at `slot` (0..GRID_SLOTS, row-major).
    pub fn block_origin(&self, slot: usize) -> (f64, f64) {
        let x = if slot % 2 == 0 {
            self.margin
        } else {
            self.margin + self.column_width() + self.column_gap
        };
        let y = if slot < 2 {
            self.grid_top
        } else {
            self.grid_top + self.block_height() + self.row_gap
        };
        (x, y)
    }
}

/// How a report is serialized for a given number of semesters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportPlan {
    /// A single PNG holding at most one page of semesters.
    Image,
    /// A multi-page PDF, one page image per group of semesters.
    Document { pages: usize },
}

pub fn page_count(semester_count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    semester_count.div_ceil(per_page)
}

pub fn paginate(semesters: &[Semester], per_page: usize) -> impl Iterator<Item = &[Semester]> {
    semesters.chunks(per_page.max(1))
}

pub fn plan_export(semester_count: usize, format: &ReportFormat) -> ExportPlan {
    if semester_count <= format.semesters_per_page {
        ExportPlan::Image
    } else {
        ExportPlan::Document {
            pages: page_count(semester_count, format.semesters_per_page),
        }
    }
}

/// Shortest decimal form of a credit value: `4`, `3.5`.
pub fn format_credits(credits: f64) -> String {
    credits.to_string()
}

/// Lays out one page of the report.
///
/// `page_number` is 1-based. The CGPA panel is only drawn when `page_number`
/// equals `total_pages`, and the page indicator only when there is more than
/// one page. At most [`GRID_SLOTS`] semesters are placed; [`ReportFormat::validate`]
/// keeps pagination from handing over more.
pub fn layout_page(
    format: &ReportFormat,
    semesters: &[Semester],
    page_number: usize,
    total_pages: usize,
    cgpa: f64,
) -> Vec<DrawCommand> {
    let palette = &format.palette;
    let width = format.width as f64;
    let height = format.height as f64;
    let center = width / 2.0;
    let mut commands = Vec::new();

    commands.push(DrawCommand::FillRect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        color: palette.background,
    });
    commands.push(text(&format.title, center, 60.0, 48, true, palette.title, Align::Center));
    commands.push(text(&format.subtitle, center, 90.0, 24, false, palette.subtitle, Align::Center));

    if total_pages > 1 {
        commands.push(text(
            &format!("Page {} of {}", page_number, total_pages),
            width - format.margin,
            90.0,
            18,
            false,
            palette.muted,
            Align::Right,
        ));
    }

    for (slot, semester) in semesters.iter().take(GRID_SLOTS).enumerate() {
        let (x, y) = format.block_origin(slot);
        layout_semester(format, semester, x, y, &mut commands);
    }

    if page_number == total_pages {
        let panel_y = height - format.cgpa_panel_offset;
        let panel_x = (width - format.cgpa_panel_width) / 2.0;
        commands.push(DrawCommand::FillRect {
            x: panel_x,
            y: panel_y,
            width: format.cgpa_panel_width,
            height: format.cgpa_panel_height,
            color: palette.semester_bar,
        });
        commands.push(text("Overall CGPA", center, panel_y + 25.0, 24, true, palette.text, Align::Center));
        commands.push(text(&format!("{:.2}", cgpa), center, panel_y + 55.0, 36, true, palette.text, Align::Center));
    }

    commands.push(text(&format.footer, center, height - 20.0, 18, false, palette.muted, Align::Center));
    commands
}

fn layout_semester(
    format: &ReportFormat,
    semester: &Semester,
    x: f64,
    y: f64,
    commands: &mut Vec<DrawCommand>,
) {
    if semester.subjects.is_empty() {
        return;
    }

    let palette = &format.palette;
    let column_width = format.column_width();
    let grade_x = x + column_width * format.grade_column;
    let credits_x = x + column_width * format.credits_column;
    let mut current_y = y;

    commands.push(DrawCommand::FillRect {
        x,
        y: current_y,
        width: column_width,
        height: format.semester_bar_height,
        color: palette.semester_bar,
    });
    commands.push(text(
        &format!("Semester {}", semester.number),
        x + 15.0,
        current_y + 25.0,
        20,
        true,
        palette.text,
        Align::Left,
    ));
    commands.push(text(
        &format!("GPA: {:.2}", semester.gpa),
        x + column_width - 15.0,
        current_y + 25.0,
        20,
        true,
        palette.text,
        Align::Right,
    ));
    current_y += format.semester_bar_height;

    commands.push(DrawCommand::FillRect {
        x,
        y: current_y,
        width: column_width,
        height: format.column_bar_height,
        color: palette.column_bar,
    });
    let header_y = current_y + 20.0;
    commands.push(text("Subject", x + 10.0, header_y, 16, true, palette.text, Align::Left));
    commands.push(text("Grade", grade_x, header_y, 16, true, palette.text, Align::Center));
    commands.push(text("Credits", credits_x, header_y, 16, true, palette.text, Align::Center));
    current_y += format.column_bar_height;

    // The row budget is spent before blank rows are skipped.
    for (index, subject) in semester
        .subjects
        .iter()
        .take(format.rows_per_block())
        .enumerate()
    {
        let Some(grade) = subject.grade else {
            continue;
        };
        if subject.name.is_empty() {
            continue;
        }

        let shade = if index % 2 == 0 {
            palette.row_even
        } else {
            palette.row_odd
        };
        commands.push(DrawCommand::FillRect {
            x,
            y: current_y,
            width: column_width,
            height: format.row_height,
            color: shade,
        });

        let baseline = current_y + 17.0;
        let name: String = subject.name.chars().take(format.name_max_chars).collect();
        commands.push(text(&name, x + 10.0, baseline, 14, false, palette.text, Align::Left));
        commands.push(text(grade.as_str(), grade_x, baseline, 14, false, palette.text, Align::Center));
        commands.push(text(
            &format_credits(subject.credits),
            credits_x,
            baseline,
            14,
            false,
            palette.text,
            Align::Center,
        ));
        current_y += format.row_height;
    }
}

fn text(content: &str, x: f64, y: f64, size: u32, bold: bool, color: Color, align: Align) -> DrawCommand {
    DrawCommand::Text {
        content: content.to_string(),
        x,
        y,
        size,
        bold,
        color,
        align,
    }
}
