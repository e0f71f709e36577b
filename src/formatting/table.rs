use colored::*;
use std::io::{self, IsTerminal, Write};

use super::utils::{display_width, pad_right, truncate};
use crate::constants::{DEFAULT_COLUMNS, RIGHT_PAD};

/// Terminal settings handed to a [`Renderer`] when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub enable_colors: bool,
    /// Usable width for a table row.
    pub cols: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enable_colors: false,
            cols: DEFAULT_COLUMNS - RIGHT_PAD,
        }
    }
}

impl RenderConfig {
    /// Colors only when asked for and stdout is a terminal. Width comes from
    /// `COLUMNS` when set.
    pub fn detect(colors_wanted: bool) -> Self {
        let cols = std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.parse::<usize>().ok())
            .filter(|c| *c > RIGHT_PAD)
            .unwrap_or(DEFAULT_COLUMNS);

        Self {
            enable_colors: colors_wanted && io::stdout().is_terminal(),
            cols: cols - RIGHT_PAD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Bold,
    Faint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub style: Style,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: Style::Plain }
    }

    pub fn faint(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: Style::Faint }
    }

    pub fn empty() -> Self {
        Self::plain("")
    }
}

/// Rows of cells, aligned into columns at render time.
#[derive(Debug, Clone, Default)]
pub struct Table {
    header: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
    gap: usize,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            header: headers
                .iter()
                .map(|h| Cell { text: h.to_string(), style: Style::Bold })
                .collect(),
            rows: Vec::new(),
            gap: 2,
        }
    }

    pub fn gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    pub fn row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|c| display_width(&c.text)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let w = display_width(&cell.text);
                match widths.get_mut(i) {
                    Some(current) => *current = (*current).max(w),
                    None => widths.push(w),
                }
            }
        }
        widths
    }
}

/// Writes tables and summary lines to any output.
pub struct Renderer<W: Write> {
    out: W,
    config: RenderConfig,
}

impl Renderer<io::Stdout> {
    pub fn stdout(config: RenderConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, config: RenderConfig) -> Self {
        Self { out, config }
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn styled(&self, text: &str, style: Style) -> String {
        if !self.config.enable_colors {
            return text.to_string();
        }
        match style {
            Style::Plain => text.to_string(),
            Style::Bold => text.bold().to_string(),
            Style::Faint => text.dimmed().to_string(),
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.styled(text, Style::Bold)
    }

    pub fn faint(&self, text: &str) -> String {
        self.styled(text, Style::Faint)
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Write the table. The last column is cut short when a row would not
    /// fit in the configured width.
    pub fn table(&mut self, table: &Table) -> io::Result<()> {
        let mut widths = table.widths();
        if let Some((last, leading)) = widths.split_last_mut() {
            let used: usize = leading.iter().map(|w| w + table.gap).sum();
            let room = self.config.cols.saturating_sub(used).max(8);
            *last = (*last).min(room);
        }

        self.write_row(&table.header, &widths, table.gap)?;
        for row in &table.rows {
            self.write_row(row, &widths, table.gap)?;
        }
        Ok(())
    }

    fn write_row(&mut self, cells: &[Cell], widths: &[usize], gap: usize) -> io::Result<()> {
        let last = cells.len().saturating_sub(1);
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(0);
            let text = truncate(&cell.text, width.max(1));
            let styled = if text.is_empty() {
                String::new()
            } else {
                self.styled(&text, cell.style)
            };
            if i == last {
                line.push_str(&styled);
            } else {
                line.push_str(&pad_right(&text, styled, width + gap));
            }
        }
        writeln!(self.out, "{}", line.trim_end())
    }
}
