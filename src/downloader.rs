#![cfg(not(tarpaulin_include))]
#![cfg(feature = "export")]

use crate::error::{GradeError, Result};
use crate::gradesheet::GradeSheet;
use crate::layout::{ExportPlan, ReportFormat, page_count, paginate, plan_export};
use crate::render::{encode_jpeg, encode_png, render_page};
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const PNG_FILENAME: &str = "grade_report.png";
pub const PDF_FILENAME: &str = "grade_report.pdf";

/// JPEG quality of the page images embedded in a PDF.
pub const PDF_IMAGE_QUALITY: u8 = 90;

// printpdf converts millimetres to points with this factor
const PT_PER_MM: f32 = 2.834_646;

/// Serialized report, ready to be written out
#[derive(Clone, Debug, PartialEq)]
pub struct ExportArtifact {
    pub plan: ExportPlan,
    pub filename: &'static str,
    pub bytes: Vec<u8>,
}

/// Render the first page of semesters as a PNG image
///
/// Only the first `semesters_per_page` semesters are drawn. The page is always
/// "page 1 of 1", so it carries the overall CGPA panel and no page indicator.
///
/// # Arguments
/// * `sheet` - The grade sheet to report on
/// * `format` - Page geometry and wording
///
/// # Returns
/// * `Result<Vec<u8>>` - PNG file content as bytes or an error
pub fn to_png(sheet: &GradeSheet, format: &ReportFormat) -> Result<Vec<u8>> {
    let semesters = sheet.semesters();
    let shown = &semesters[..semesters.len().min(format.semesters_per_page)];
    let page = render_page(format, shown, 1, 1, sheet.cgpa())?;
    encode_png(&page)
}

/// Render every page of semesters into a multi-page PDF
///
/// Semesters are grouped `semesters_per_page` at a time. Each group is rendered
/// to its own canvas, which then fills exactly one page of the document. Pages
/// are sized in points equal to the canvas pixels and images are placed at
/// 72 dpi, so nothing is scaled. Each canvas is embedded as a JPEG stream
/// (`DCTDecode`) so a page costs a few hundred kilobytes instead of raw RGB.
///
/// # Arguments
/// * `sheet` - The grade sheet to report on
/// * `format` - Page geometry and wording
///
/// # Returns
/// * `Result<Vec<u8>>` - PDF file content as bytes or an error
pub fn to_pdf(sheet: &GradeSheet, format: &ReportFormat) -> Result<Vec<u8>> {
    use printpdf::{
        ColorBits, ColorSpace, Image, ImageFilter, ImageTransform, ImageXObject, Mm,
        PdfDocument, Px,
    };

    let total_pages = page_count(sheet.len(), format.semesters_per_page).max(1);
    let cgpa = sheet.cgpa();
    let page_width = Mm(format.width as f32 / PT_PER_MM);
    let page_height = Mm(format.height as f32 / PT_PER_MM);

    let (doc, first_page, first_layer) =
        PdfDocument::new(format.title.as_str(), page_width, page_height, "Page 1");

    let mut groups: Vec<_> = paginate(sheet.semesters(), format.semesters_per_page).collect();
    if groups.is_empty() {
        groups.push(&[]);
    }

    for (index, group) in groups.into_iter().enumerate() {
        let page_number = index + 1;
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(page_width, page_height, format!("Page {}", page_number))
        };
        let layer = doc.get_page(page).get_layer(layer);

        let canvas = render_page(format, group, page_number, total_pages, cgpa)?;
        let (width, height) = canvas.dimensions();
        let image = Image::from(ImageXObject {
            width: Px(width as usize),
            height: Px(height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: encode_jpeg(&canvas, PDF_IMAGE_QUALITY)?,
            image_filter: Some(ImageFilter::DCT),
            clipping_bbox: None,
            smask: None,
        });
        image.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(Mm(0.0)),
                dpi: Some(72.0),
                ..Default::default()
            },
        );
        debug!("page {} of {} added to document", page_number, total_pages);
    }

    doc.save_to_bytes()
        .map_err(|e| GradeError::Pdf(e.to_string()))
}

/// Build the report artifact the grade sheet calls for
///
/// Up to `semesters_per_page` semesters (including none) give a PNG; more give
/// a PDF. Everything is produced in memory, so a failure yields no artifact.
pub fn export(sheet: &GradeSheet, format: &ReportFormat) -> Result<ExportArtifact> {
    format.validate()?;
    let plan = plan_export(sheet.len(), format);
    let (filename, bytes) = match plan {
        ExportPlan::Image => (PNG_FILENAME, to_png(sheet, format)?),
        ExportPlan::Document { .. } => (PDF_FILENAME, to_pdf(sheet, format)?),
    };
    info!("{} generated ({} bytes)", filename, bytes.len());
    Ok(ExportArtifact {
        plan,
        filename,
        bytes,
    })
}

/// Write an artifact into `dir` under its fixed filename
///
/// The bytes go to a temporary file in the same directory which is then renamed
/// into place, so an interrupted write never leaves a partial report.
pub fn save_artifact(artifact: &ExportArtifact, dir: &Path) -> Result<PathBuf> {
    let target = dir.join(artifact.filename);
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(&artifact.bytes)?;
    file.flush()?;
    file.persist(&target).map_err(|e| GradeError::Io(e.error))?;
    info!("report written to {}", target.display());
    Ok(target)
}
