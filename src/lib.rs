/*!
# GradeMate

A GPA and CGPA calculator with exportable grade reports.

## Overview

Users enter subjects per semester, each with a letter grade and a credit
weight. Every edit recomputes the owning semester's GPA and the overall,
credit-weighted CGPA. The current state can be exported as a report: a single
PNG for up to four semesters, or a multi-page PDF with four semesters per page.

## Architecture

### Grade Aggregator
- `grade` - The closed letter-grade set and its point table
  (O=10, A+=9, A=8, B+=7, B=6, C=5, U/SA/W=0)
- `aggregator` - Credit-weighted averages, used per semester (GPA) and across
  all semesters (CGPA)

### Session State
- `subject`, `semester`, `gradesheet` - Semesters (up to 10) holding subjects
  (up to 20 each); cached GPAs are recomputed on every mutation

### Report Renderer/Exporter
- `layout` - Pure page layout: semesters to draw commands, geometry from
  `ReportFormat`
- `render` - Rasterizes draw commands onto a 1920×1080 canvas with plotters and
  encodes PNG
- `downloader` - Chooses PNG or PDF, assembles the PDF and writes the file

### Interactive Session
- `app` - Command parsing, execution and user notices for the `grademate` binary

## Usage

```text
grademate [output_dir] [format.json]
> add semester
> add subject 1
> set 1 1 name Data Structures
> set 1 1 grade O
> set 1 1 credits 4
> export
```
*/

pub mod aggregator;
pub mod app;
pub mod downloader;
pub mod error;
pub mod grade;
pub mod gradesheet;
pub mod layout;
pub mod render;
pub mod semester;
pub mod subject;

/// Re-export everything from these modules to make it easier to use
pub use aggregator::*;
pub use error::*;
pub use grade::*;
pub use gradesheet::*;
pub use layout::*;
pub use semester::*;
pub use subject::*;
