#![cfg(not(tarpaulin_include))]
#![cfg(feature = "export")]
use crate::error::{GradeError, Result};
use crate::layout::{Align, Color as PageColor, DrawCommand, ReportFormat, layout_page};
use crate::semester::Semester;
use image::{ImageOutputFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;

/// Paints draw commands onto a fresh page canvas
///
/// The canvas is an RGB buffer of `format.width` × `format.height` pixels drawn
/// through the plotters bitmap backend. Commands are painted in order, so later
/// commands cover earlier ones.
///
/// # Arguments
/// * `format` - Page geometry; only the canvas size is read here
/// * `commands` - Output of [`layout_page`]
///
/// # Returns
/// * `Result<RgbImage>` - The painted page or a render error
///
/// # Notes
/// * Text is drawn with the system sans-serif font. A missing font surfaces as
///   `GradeError::Render`.
pub fn rasterize(format: &ReportFormat, commands: &[DrawCommand]) -> Result<RgbImage> {
    let (width, height) = (format.width, format.height);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();

        for command in commands {
            match command {
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    let top_left = (x.round() as i32, y.round() as i32);
                    let bottom_right = ((x + width).round() as i32, (y + height).round() as i32);
                    root.draw(&Rectangle::new(
                        [top_left, bottom_right],
                        rgb(*color).filled(),
                    ))
                    .map_err(render_error)?;
                }
                DrawCommand::Text {
                    content,
                    x,
                    y,
                    size,
                    bold,
                    color,
                    align,
                } => {
                    let weight = if *bold {
                        FontStyle::Bold
                    } else {
                        FontStyle::Normal
                    };
                    let hpos = match align {
                        Align::Left => HPos::Left,
                        Align::Center => HPos::Center,
                        Align::Right => HPos::Right,
                    };
                    let fill = rgb(*color);
                    let style = TextStyle::from(FontDesc::new(
                        FontFamily::SansSerif,
                        *size as f64,
                        weight,
                    ))
                    .color(&fill)
                    .pos(Pos::new(hpos, VPos::Bottom));

                    root.draw(&Text::new(
                        content.as_str(),
                        (x.round() as i32, y.round() as i32),
                        style,
                    ))
                    .map_err(render_error)?;
                }
            }
        }

        root.present().map_err(render_error)?;
    }

    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| GradeError::Render("canvas buffer has the wrong size".to_string()))
}

/// Lays out and paints one report page
///
/// # Arguments
/// * `format` - Page geometry and wording
/// * `semesters` - The semesters placed on this page (at most four are drawn)
/// * `page_number` - 1-based page index
/// * `total_pages` - Number of pages in the report
/// * `cgpa` - Overall CGPA, shown on the last page
pub fn render_page(
    format: &ReportFormat,
    semesters: &[Semester],
    page_number: usize,
    total_pages: usize,
    cgpa: f64,
) -> Result<RgbImage> {
    let commands = layout_page(format, semesters, page_number, total_pages, cgpa);
    rasterize(format, &commands)
}

/// Encodes a page canvas as PNG bytes
pub fn encode_png(page: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    page.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

/// Encodes a page canvas as baseline JPEG bytes, as embedded in PDF pages
pub fn encode_jpeg(page: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    page.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Jpeg(quality))?;
    Ok(bytes)
}

fn rgb(color: PageColor) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn render_error<E: std::fmt::Display>(e: E) -> GradeError {
    GradeError::Render(e.to_string())
}
