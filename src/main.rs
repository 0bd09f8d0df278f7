use grademate::app;
use grademate::layout::ReportFormat;
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    // Default values: write into the working directory with the stock layout
    let mut output_dir = PathBuf::from(".");
    let mut format = ReportFormat::default();

    if args.len() > 3 {
        eprintln!("Usage: {} [output_dir] [format.json]", args[0]);
        return Ok(());
    }
    if let Some(dir) = args.get(1) {
        output_dir = PathBuf::from(dir);
    }
    if let Some(path) = args.get(2) {
        format = ReportFormat::from_json_file(path)?;
    }

    if !output_dir.is_dir() {
        eprintln!("Error: {} is not a directory", output_dir.display());
        return Ok(());
    }

    app::run(format, output_dir)
}
