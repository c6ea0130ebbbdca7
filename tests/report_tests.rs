use anyhow::Result;
use geometry_overhead_rs::report::{DocumentState, ReportDocument, ReportError};
use std::fs;
use tempfile::TempDir;

fn sample_document() -> Result<ReportDocument> {
    let mut doc = ReportDocument::new();
    doc.append_section("Geometry Overhead Analysis", 1)?;
    doc.append_section("Memory Footprint Analysis", 2)?;
    doc.append_table(
        &["Config", "Geometry MB"],
        &[vec!["Development", "8.54"], vec!["Production", "1534.79"]],
    )?;
    doc.append_section("Summary", 2)?;
    doc.append_bullet_list(&["first", "second", "third"])?;
    Ok(doc)
}

/// Written file reproduces the appended fragments, in order
#[test]
fn test_write_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("report.md");

    let mut doc = sample_document()?;
    let fragments = doc.sections().to_vec();
    doc.write_document(&path)?;

    let text = fs::read_to_string(&path)?;
    assert_eq!(text, fragments.concat());

    let mut cursor = 0;
    for fragment in &fragments {
        assert_eq!(&text[cursor..cursor + fragment.len()], fragment.as_str());
        cursor += fragment.len();
    }
    assert_eq!(cursor, text.len());
    Ok(())
}

#[test]
fn test_write_creates_parent_directories() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("nested").join("deeper").join("report.md");

    let mut doc = sample_document()?;
    doc.write_document(&path)?;

    assert!(path.exists());
    assert_eq!(doc.state(), DocumentState::Written);
    Ok(())
}

#[test]
fn test_document_closed_after_write() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut doc = sample_document()?;
    doc.write_document(temp_dir.path().join("report.md"))?;

    assert!(matches!(
        doc.append_section("Late", 2),
        Err(ReportError::DocumentClosed)
    ));
    assert!(matches!(
        doc.append_bullet_list(&["late"]),
        Err(ReportError::DocumentClosed)
    ));
    assert!(matches!(
        doc.append_table(&["A"], &[vec!["1"]]),
        Err(ReportError::DocumentClosed)
    ));
    assert!(matches!(
        doc.write_document(temp_dir.path().join("again.md")),
        Err(ReportError::DocumentClosed)
    ));
    assert!(!temp_dir.path().join("again.md").exists());
    Ok(())
}

#[test]
fn test_failed_write_leaves_document_open() -> Result<()> {
    let temp_dir = TempDir::new()?;
    // A regular file where a directory is expected
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory")?;

    let mut doc = sample_document()?;
    let err = doc.write_document(blocker.join("report.md")).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
    assert_eq!(doc.state(), DocumentState::Open);

    doc.write_document(temp_dir.path().join("report.md"))?;
    assert!(doc.is_written());
    Ok(())
}

#[test]
fn test_column_mismatch_on_any_row() {
    let mut doc = ReportDocument::new();
    let err = doc
        .append_table(&["A", "B"], &[vec!["1", "2"], vec!["3"]])
        .unwrap_err();
    assert!(matches!(
        err,
        ReportError::ColumnMismatch {
            row: 1,
            expected: 2,
            found: 1
        }
    ));
    assert!(doc.sections().is_empty());
}

#[test]
fn test_table_separator_line() {
    let mut doc = ReportDocument::new();
    doc.append_table(&["Metric", "Value"], &[vec!["Base registers per thread", "64"]])
        .unwrap();
    let text = doc.render();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "|---------------------------|-------|");
    assert_eq!(lines[0].len(), lines[2].len());
}
