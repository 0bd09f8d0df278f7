use grademate::app::{
    App, Command, CommandError, export_failed_notice, grade_table, notice_for, parse_command,
};
use grademate::error::GradeError;
use grademate::grade::Grade;
use grademate::layout::ReportFormat;
use grademate::subject::SubjectField;
use std::path::PathBuf;

fn run_lines(app: &mut App, lines: &[&str]) {
    for line in lines {
        let command = parse_command(line).unwrap_or_else(|e| panic!("'{}' failed: {}", line, e));
        let outcome = app.execute(command);
        assert_eq!(outcome.status, "ok", "'{}' was rejected", line);
    }
}

#[test]
fn test_parse_command() {
    println!("\n====== Testing command parsing ======");
    assert_eq!(parse_command("add semester"), Ok(Command::AddSemester));
    assert_eq!(parse_command("  remove semester 3 "), Ok(Command::RemoveSemester(3)));
    assert_eq!(parse_command("add subject 2"), Ok(Command::AddSubject(2)));
    assert_eq!(parse_command("remove subject 2 5"), Ok(Command::RemoveSubject(2, 5)));
    println!("✓ Add and remove commands parsed");

    assert_eq!(
        parse_command("set 1 2 name Operating Systems"),
        Ok(Command::UpdateSubject(
            1,
            2,
            SubjectField::Name("Operating Systems".to_string())
        ))
    );
    assert_eq!(
        parse_command("set 1 2 grade a+"),
        Ok(Command::UpdateSubject(1, 2, SubjectField::Grade(Some(Grade::APlus))))
    );
    assert_eq!(
        parse_command("set 1 2 grade -"),
        Ok(Command::UpdateSubject(1, 2, SubjectField::Grade(None)))
    );
    assert_eq!(
        parse_command("set 1 2 credits 2.5"),
        Ok(Command::UpdateSubject(1, 2, SubjectField::Credits(2.5)))
    );
    assert_eq!(
        parse_command("set 1 2 credits"),
        Ok(Command::UpdateSubject(1, 2, SubjectField::Credits(1.0)))
    );
    println!("✓ Set commands parsed, empty credits fall back to 1");

    for simple in ["show", "grades", "json", "export", "help", "q"] {
        assert!(parse_command(simple).is_ok(), "'{}' should parse", simple);
    }
    println!("✓ Single-word commands parsed");

    assert!(parse_command("").is_err());
    assert!(parse_command("add semester 2").is_err());
    assert!(parse_command("remove semester").is_err());
    assert!(parse_command("add subject 1 2").is_err());
    assert!(parse_command("set 1 1 grade D").is_err());
    assert!(parse_command("set 1 1 credits 7").is_err());
    assert!(parse_command("launch rockets").is_err());
    println!("✓ Invalid commands rejected with a status");

    let err = parse_command("launch rockets").unwrap_err();
    assert_eq!(err, CommandError::Syntax("invalid command".to_string()));
    assert!(err.notice().is_none());
    assert_eq!(
        parse_command("remove semester x").unwrap_err().to_string(),
        "invalid command"
    );
    println!("✓ Unrecognised lines only change the status, with no notice");
}

#[test]
fn test_invalid_set_values_raise_notice() {
    println!("\n====== Testing invalid set values ======");
    let err = parse_command("set 1 1 grade D").unwrap_err();
    assert_eq!(err.to_string(), "invalid grade 'D'");
    let notice = err.notice().unwrap();
    assert_eq!(notice.title, "Invalid input");
    assert_eq!(notice.description, "invalid grade 'D'");
    assert!(notice.destructive);
    println!("✓ An unknown grade gives the Invalid input notice");

    for bad in ["7", "abc", "2.25"] {
        let err = parse_command(&format!("set 1 1 credits {}", bad)).unwrap_err();
        assert!(matches!(err, CommandError::Value { .. }), "'{}' should be a value error", bad);
        assert_eq!(err.notice().unwrap().title, "Invalid input");
        assert!(err.to_string().starts_with("invalid credits"));
    }
    println!("✓ Out-of-range and malformed credits give the same notice");

    // Same notice whether the value fails to parse or the edit is rejected
    let rejected = notice_for(&GradeError::InvalidGrade("D".to_string()));
    assert_eq!(parse_command("set 1 1 grade D").unwrap_err().notice(), Some(&rejected));
    println!("✓ Parse-time and execute-time rejections share one notice");
}

#[test]
fn test_session_commands() {
    println!("\n====== Testing session commands ======");
    let mut app = App::new(ReportFormat::default(), PathBuf::from("."));
    run_lines(
        &mut app,
        &[
            "add semester",
            "add subject 1",
            "set 1 1 name Compilers",
            "set 1 1 grade O",
            "set 1 1 credits 4",
            "add subject 1",
            "set 1 2 name Networks",
            "set 1 2 grade B",
            "set 1 2 credits 3",
        ],
    );
    let gpa = app.sheet().semester(1).unwrap().gpa;
    assert_eq!(format!("{:.2}", gpa), "8.29");
    assert_eq!(format!("{:.2}", app.sheet().cgpa()), "8.29");
    println!("✓ GPA and CGPA follow each command");

    run_lines(&mut app, &["remove subject 1 1"]);
    assert_eq!(app.sheet().semester(1).unwrap().gpa, 6.0);
    println!("✓ Removing a subject recomputes the GPA");

    let outcome = app.execute(Command::RemoveSemester(4));
    assert_eq!(outcome.status, "no semester at position 4");
    assert!(outcome.notice.unwrap().destructive);
    println!("✓ Unknown semester reported in the status");
}

#[test]
fn test_capacity_notice() {
    println!("\n====== Testing capacity notices ======");
    let mut app = App::new(ReportFormat::default(), PathBuf::from("."));
    for _ in 0..10 {
        assert_eq!(app.execute(Command::AddSemester).status, "ok");
    }
    let outcome = app.execute(Command::AddSemester);
    assert_eq!(outcome.status, "limit reached");
    let notice = outcome.notice.unwrap();
    assert_eq!(notice.title, "Maximum limit reached");
    assert_eq!(notice.description, "You can only add up to 10 semesters.");
    assert!(notice.destructive);
    assert_eq!(app.sheet().len(), 10);
    println!("✓ The 11th semester produces a warning and no semester");

    let notice = notice_for(&GradeError::SubjectLimit { limit: 20 });
    assert_eq!(notice.description, "You can only add up to 20 subjects per semester.");
    println!("✓ Subject limit notice worded for subjects");

    let failed = export_failed_notice();
    assert_eq!(failed.title, "Download Failed");
    assert_eq!(failed.description, "There was an error generating your grade report.");
    println!("✓ Export failures share one generic notice");
}

#[test]
fn test_printing_commands() {
    println!("\n====== Testing printing commands ======");
    let mut app = App::new(ReportFormat::default(), PathBuf::from("."));

    let table = grade_table();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "O (10 points)");
    assert_eq!(lines[1], "A+ (9 points)");
    assert_eq!(lines[8], "W (0 points)");
    assert_eq!(app.execute(Command::Grades).output, Some(table));
    println!("✓ Grade table lists every grade with its points");

    run_lines(&mut app, &["add semester", "add subject 1", "set 1 1 grade A+"]);
    let json = app.execute(Command::Json).output.unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let subject = &value["semesters"][0]["subjects"][0];
    assert_eq!(subject["grade"], "A+");
    assert_eq!(subject["credits"], 1.0);
    assert_eq!(value["semesters"][0]["gpa"], 9.0);
    println!("✓ JSON dump reflects the session state");

    assert!(app.execute(Command::Help).output.unwrap().contains("add semester"));
    println!("✓ Help lists the commands");
}

#[test]
fn test_show_returns_sheet_text() {
    println!("\n====== Testing show ======");
    let mut app = App::new(ReportFormat::default(), PathBuf::from("."));
    let outcome = app.execute(Command::Show);
    assert_eq!(outcome.status, "ok");
    assert_eq!(outcome.output.as_deref(), Some("(no semesters)"));
    println!("✓ An empty sheet shows a placeholder");

    run_lines(
        &mut app,
        &["add semester", "add subject 1", "set 1 1 name Compilers", "set 1 1 grade A"],
    );
    let shown = app.execute(Command::Show).output.unwrap();
    assert_eq!(shown, app.sheet().gradesheet_render());
    assert!(shown.contains("Semester 1"));
    assert!(shown.contains("Compilers"));
    assert!(shown.ends_with("CGPA: 8.00"));
    println!("✓ Show hands the sheet back as output instead of printing it");
}
