//! Console output
//!
//! All text the menu prints goes through [`Printer`], so the same code
//! writes to stdout in the binary and to a buffer in tests.

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};

use crate::config::DisplayConfig;
use crate::operations::Statistics;
use crate::types::{format_grade, StudentRecord};

use super::menu::MenuChoice;

pub struct Printer<W: Write> {
    writer: W,
    color: bool,
    separator_width: usize,
}

impl<W: Write> Printer<W> {
    pub fn new(writer: W, display: &DisplayConfig) -> Self {
        Self {
            writer,
            color: display.color,
            separator_width: display.separator_width,
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.color {
            queue!(self.writer, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            self.writer.write_all(text.as_bytes())
        }
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    /// Prompt text without a newline, flushed so it shows before the read
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.writer, "{}", text)?;
        self.writer.flush()
    }

    fn message(&mut self, text: &str, color: Color) -> io::Result<()> {
        writeln!(self.writer)?;
        self.colored(text, color)?;
        writeln!(self.writer)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        self.message(text, Color::Green)
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        self.message(text, Color::Red)
    }

    pub fn info(&mut self, text: &str) -> io::Result<()> {
        self.message(text, Color::Cyan)
    }

    fn separator(&mut self) -> io::Result<()> {
        writeln!(self.writer, "{}", "-".repeat(self.separator_width))
    }

    pub fn menu(&mut self) -> io::Result<()> {
        writeln!(self.writer)?;
        self.colored("===== Student Record Menu =====", Color::Cyan)?;
        writeln!(self.writer)?;
        for choice in MenuChoice::ALL {
            writeln!(self.writer, "{}. {}", choice.number(), choice.label())?;
        }
        self.writer.flush()
    }

    /// Numbered record table under a title
    pub fn table(&mut self, title: &str, records: &[StudentRecord]) -> io::Result<()> {
        writeln!(self.writer)?;
        self.colored(title, Color::Cyan)?;
        writeln!(self.writer)?;
        self.separator()?;
        for (idx, r) in records.iter().enumerate() {
            writeln!(
                self.writer,
                "{}. Name: {}, Age: {}, Grade: {}",
                idx + 1,
                r.name,
                r.age,
                format_grade(r.grade)
            )?;
        }
        self.separator()?;
        writeln!(self.writer)?;
        self.writer.flush()
    }

    pub fn matches(&mut self, records: &[&StudentRecord]) -> io::Result<()> {
        writeln!(self.writer)?;
        self.colored("Matches found:", Color::Green)?;
        writeln!(self.writer)?;
        for r in records {
            writeln!(
                self.writer,
                "- {} (Age: {}, Grade: {})",
                r.name,
                r.age,
                format_grade(r.grade)
            )?;
        }
        writeln!(self.writer)?;
        self.writer.flush()
    }

    pub fn statistics(&mut self, stats: &Statistics) -> io::Result<()> {
        writeln!(self.writer)?;
        self.colored("Statistics", Color::Cyan)?;
        writeln!(self.writer)?;
        self.separator()?;
        writeln!(self.writer, "Total students: {}", stats.count)?;
        writeln!(self.writer, "Average age: {:.2}", stats.average_age)?;
        writeln!(self.writer, "Average grade: {:.2}", stats.average_grade)?;
        writeln!(self.writer, "Top grade: {:.2} ({})", stats.top.grade, stats.top.name)?;
        writeln!(self.writer, "Lowest grade: {:.2} ({})", stats.lowest.grade, stats.lowest.name)?;
        self.separator()?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> DisplayConfig {
        DisplayConfig {
            color: false,
            separator_width: 10,
        }
    }

    fn rendered(f: impl FnOnce(&mut Printer<Vec<u8>>) -> io::Result<()>) -> String {
        let mut printer = Printer::new(Vec::new(), &plain());
        f(&mut printer).unwrap();
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn test_table_layout() {
        let records = vec![
            StudentRecord::new("Alice", 20, 8.5),
            StudentRecord::new("bob", 21, 7.0),
        ];
        let out = rendered(|p| p.table("Student Records", &records));
        assert_eq!(
            out,
            "\nStudent Records\n----------\n\
             1. Name: Alice, Age: 20, Grade: 8.5\n\
             2. Name: bob, Age: 21, Grade: 7.0\n\
             ----------\n\n"
        );
    }

    #[test]
    fn test_menu_lists_all_choices() {
        let out = rendered(|p| p.menu());
        assert!(out.contains("1. Add Student"));
        assert!(out.contains("6. View Students Sorted"));
        assert!(out.contains("8. Exit"));
    }

    #[test]
    fn test_statistics_two_decimals() {
        let stats = Statistics {
            count: 2,
            average_age: 20.5,
            average_grade: 7.75,
            top: StudentRecord::new("Alice", 20, 8.5),
            lowest: StudentRecord::new("bob", 21, 7.0),
        };
        let out = rendered(|p| p.statistics(&stats));
        assert!(out.contains("Total students: 2\n"));
        assert!(out.contains("Average age: 20.50\n"));
        assert!(out.contains("Average grade: 7.75\n"));
        assert!(out.contains("Top grade: 8.50 (Alice)\n"));
        assert!(out.contains("Lowest grade: 7.00 (bob)\n"));
    }

    #[test]
    fn test_color_adds_escape_codes() {
        let mut printer = Printer::new(Vec::new(), &DisplayConfig::default());
        printer.success("done").unwrap();
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert!(out.contains("\x1b["));
        assert!(out.contains("done"));

        let out = rendered(|p| p.success("done"));
        assert_eq!(out, "\ndone\n\n");
    }
}
