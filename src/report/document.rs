//! Append-only Markdown document
//!
//! A document is built from formatted fragments and written exactly once.
//! After a successful write it is closed and rejects further appends.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("heading level must be between 1 and 3, got {0}")]
    InvalidLevel(u8),

    #[error("table row {row} has {found} columns, expected {expected}")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("table must have at least one header column")]
    EmptyHeader,

    #[error("document has already been written and cannot be modified")]
    DocumentClosed,

    #[error("failed to write report to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Open,
    Written,
}

#[derive(Debug, Clone)]
pub struct ReportDocument {
    sections: Vec<String>,
    state: DocumentState,
}

impl Default for ReportDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportDocument {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            state: DocumentState::Open,
        }
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn is_written(&self) -> bool {
        self.state == DocumentState::Written
    }

    /// Full document text, sections in append order
    pub fn render(&self) -> String {
        self.sections.concat()
    }

    fn ensure_open(&self) -> Result<(), ReportError> {
        match self.state {
            DocumentState::Open => Ok(()),
            DocumentState::Written => Err(ReportError::DocumentClosed),
        }
    }

    fn push(&mut self, fragment: String) -> Result<(), ReportError> {
        self.ensure_open()?;
        self.sections.push(fragment);
        Ok(())
    }

    /// Append a `#`/`##`/`###` heading
    pub fn append_section(&mut self, title: &str, level: u8) -> Result<(), ReportError> {
        self.ensure_open()?;
        if !(1..=3).contains(&level) {
            return Err(ReportError::InvalidLevel(level));
        }
        self.push(format!(
            "{} {}\n\n",
            "#".repeat(level as usize),
            single_line(title)
        ))
    }

    pub fn append_paragraph(&mut self, text: &str) -> Result<(), ReportError> {
        self.push(format!("{}\n\n", text))
    }

    /// Append a pipe table, columns padded to their widest cell
    pub fn append_table<H, C>(&mut self, headers: &[H], rows: &[Vec<C>]) -> Result<(), ReportError>
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        self.ensure_open()?;
        if headers.is_empty() {
            return Err(ReportError::EmptyHeader);
        }
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != headers.len())
        {
            return Err(ReportError::ColumnMismatch {
                row,
                expected: headers.len(),
                found: cells.len(),
            });
        }

        let header_cells: Vec<String> = headers.iter().map(|h| escape_cell(h.as_ref())).collect();
        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|cells| cells.iter().map(|c| escape_cell(c.as_ref())).collect())
            .collect();

        let mut widths: Vec<usize> = header_cells.iter().map(|h| h.chars().count()).collect();
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut table = String::new();
        table.push_str(&format_row(&header_cells, &widths));
        table.push('|');
        for width in &widths {
            table.push_str(&"-".repeat(width + 2));
            table.push('|');
        }
        table.push('\n');
        for cells in &body {
            table.push_str(&format_row(cells, &widths));
        }
        table.push('\n');

        self.push(table)
    }

    /// Append one `- item` line per item; an empty list appends nothing
    pub fn append_bullet_list<S: AsRef<str>>(&mut self, items: &[S]) -> Result<(), ReportError> {
        self.ensure_open()?;
        if items.is_empty() {
            return Ok(());
        }
        let mut list: String = items
            .iter()
            .map(|item| format!("- {}\n", item.as_ref()))
            .collect();
        list.push('\n');
        self.push(list)
    }

    /// Append `1. item`, `2. item`, ...
    pub fn append_numbered_list<S: AsRef<str>>(&mut self, items: &[S]) -> Result<(), ReportError> {
        self.ensure_open()?;
        if items.is_empty() {
            return Ok(());
        }
        let mut list: String = items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}\n", i + 1, item.as_ref()))
            .collect();
        list.push('\n');
        self.push(list)
    }

    /// Write every section to `path`, creating missing parent directories
    ///
    /// The file handle lives only inside this call. On failure the document
    /// stays open so the caller may retry elsewhere.
    pub fn write_document<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ReportError> {
        self.ensure_open()?;
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ReportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let io_err = |source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        };
        {
            let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
            for section in &self.sections {
                writer.write_all(section.as_bytes()).map_err(io_err)?;
            }
            writer.flush().map_err(io_err)?;
        }

        self.state = DocumentState::Written;
        tracing::info!(path = %path.display(), sections = self.sections.len(), "wrote report");
        Ok(())
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

fn escape_cell(cell: &str) -> String {
    single_line(&cell.replace('|', "\\|"))
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
        line.push_str(" |");
    }
    line.push('\n');
    line
}
