use colored::Colorize;
use grrs::{FileResult, Match, SearchOutcome};
use std::io::{self, Write};

/// What to print for a finished search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Every matching line
    Lines,
    /// One match count per file
    Count,
    /// Only the summary line
    Stats,
}

/// Renders search results the way grep does
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub mode: OutputMode,
    /// Prefix lines with the file path
    pub with_path: bool,
    pub line_numbers: bool,
    pub color: bool,
}

impl Printer {
    pub fn write_outcome(&self, outcome: &SearchOutcome, out: &mut impl Write) -> io::Result<()> {
        match self.mode {
            OutputMode::Stats => {
                writeln!(
                    out,
                    "Found {} matches in {} files",
                    outcome.total_matches, outcome.files_with_matches
                )?;
            }
            OutputMode::Count => {
                for file_result in &outcome.file_results {
                    self.write_prefix_path(file_result, out)?;
                    writeln!(out, "{}", file_result.matches.len())?;
                }
            }
            OutputMode::Lines => {
                for file_result in &outcome.file_results {
                    for m in &file_result.matches {
                        self.write_prefix_path(file_result, out)?;
                        self.write_match(m, out)?;
                    }
                }
            }
        }
        out.flush()
    }

    fn write_prefix_path(&self, file_result: &FileResult, out: &mut impl Write) -> io::Result<()> {
        if !self.with_path {
            return Ok(());
        }
        let path = file_result.path.display().to_string();
        if self.color {
            write!(out, "{}:", path.blue())
        } else {
            write!(out, "{}:", path)
        }
    }

    fn write_match(&self, m: &Match, out: &mut impl Write) -> io::Result<()> {
        if self.line_numbers {
            if self.color {
                write!(out, "{}:", m.line_number.to_string().green())?;
            } else {
                write!(out, "{}:", m.line_number)?;
            }
        }

        if !self.color {
            return writeln!(out, "{}", m.line_content);
        }

        let line = &m.line_content;
        let mut last = 0;
        for &(start, end) in &m.spans {
            write!(out, "{}", &line[last..start])?;
            write!(out, "{}", line[start..end].red().bold())?;
            last = end;
        }
        writeln!(out, "{}", &line[last..])
    }
}
