//! Plain-text rendering of the bill rows and totals.

use colored::Colorize;

use crate::core::Totals;
use crate::domain::BillDraft;

const NAME_MAX_WIDTH: usize = 24;

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct TableColumn {
    pub header: &'static str,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    const fn new(header: &'static str, alignment: Alignment) -> Self {
        Self {
            header,
            max_width: None,
            alignment,
        }
    }
}

pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = column.header.chars().count();
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(cell.chars().count());
                    }
                }
                column.max_width.map_or(width, |max| width.min(max))
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let header: Vec<String> = self.columns.iter().map(|c| c.header.to_string()).collect();
        let mut lines = vec![self.render_row(&header, &widths)];
        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        lines.push("-".repeat(rule_width));
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, widths[idx], column.alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

fn truncate_text(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = truncate_text(text, width);
    match alignment {
        Alignment::Left => format!("{:<width$}", fitted, width = width),
        Alignment::Right => format!("{:>width$}", fitted, width = width),
    }
}

/// Renders the bill rows with 1-based row numbers.
pub fn bills_table(rows: &[BillDraft]) -> String {
    let mut name = TableColumn::new("Name", Alignment::Left);
    name.max_width = Some(NAME_MAX_WIDTH);
    let table = Table {
        columns: vec![
            TableColumn::new("#", Alignment::Right),
            TableColumn::new("Date", Alignment::Left),
            name,
            TableColumn::new("Amount", Alignment::Right),
            TableColumn::new("Paid", Alignment::Left),
        ],
        rows: rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                vec![
                    (idx + 1).to_string(),
                    row.due_date.clone(),
                    row.name.clone(),
                    row.amount.clone(),
                    if row.paid { "[x]" } else { "[ ]" }.to_string(),
                ]
            })
            .collect(),
    };
    table.render()
}

/// Formats the totals line without styling.
pub fn totals_line(totals: &Totals) -> String {
    format!(
        "Total unpaid: ${:.2} | Remaining balance: ${:.2}",
        totals.unpaid_total, totals.remaining_balance
    )
}

/// Formats the totals line, highlighting an over-budget balance in red.
pub fn styled_totals_line(totals: &Totals) -> String {
    let line = totals_line(totals);
    if totals.is_over_budget() {
        line.red().to_string()
    } else {
        line
    }
}
