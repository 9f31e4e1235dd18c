//! Terminal output sink for the plugin.
//!
//! Messages and tables go to stdout; failures go to stderr. Styling is
//! applied only when the run configuration says colors are enabled.

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

/// Output surface the command handlers write to.
pub trait Ui: Send + Sync {
    /// Print an informational line.
    fn say(&self, message: &str);

    /// Print the success marker.
    fn ok(&self);

    /// Report a failure. The message lands on stderr.
    fn failed(&self, message: &str);

    /// Render a table with a header row.
    fn print_table(&self, headers: &[&str], rows: &[Vec<String>]);
}

/// Standard UI writing to the process stdout/stderr.
pub struct StdUi {
    color_enabled: bool,
}

impl StdUi {
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }
}

impl Ui for StdUi {
    fn say(&self, message: &str) {
        println!("{message}");
    }

    fn ok(&self) {
        if self.color_enabled {
            println!("{}", "OK".green().bold());
        } else {
            println!("OK");
        }
    }

    fn failed(&self, message: &str) {
        if self.color_enabled {
            eprintln!("{}", "FAILED".red().bold());
        } else {
            eprintln!("FAILED");
        }
        eprintln!("{message}");
    }

    fn print_table(&self, headers: &[&str], rows: &[Vec<String>]) {
        let rendered = format_table(headers, rows);
        if self.color_enabled {
            let mut lines = rendered.lines();
            if let Some(header_line) = lines.next() {
                println!("{}", header_line.bold());
            }
            for line in lines {
                println!("{line}");
            }
        } else {
            print!("{rendered}");
        }
    }
}

/// Lay out a table, padding every column to its widest cell.
fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.width());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, &widths, headers.iter().copied());
    for row in rows {
        push_row(&mut out, &widths, row.iter().map(String::as_str));
    }
    out
}

fn push_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        let pad = widths.get(i).copied().unwrap_or(0).saturating_sub(cell.width());
        line.push_str(cell);
        // No trailing padding on the last visible cell.
        line.push_str(&" ".repeat(pad + 3));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Capturing UI double for command tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingUi {
    pub events: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingUi {
    pub fn lines(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Ui for RecordingUi {
    fn say(&self, message: &str) {
        self.events.lock().unwrap().push(format!("say: {message}"));
    }

    fn ok(&self) {
        self.events.lock().unwrap().push("ok".to_string());
    }

    fn failed(&self, message: &str) {
        self.events.lock().unwrap().push(format!("failed: {message}"));
    }

    fn print_table(&self, headers: &[&str], rows: &[Vec<String>]) {
        let mut events = self.events.lock().unwrap();
        events.push(format!("table: {}", headers.join("|")));
        for row in rows {
            events.push(format!("row: {}", row.join("|")));
        }
    }
}
