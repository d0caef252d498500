//! Status command: daily and weekly listings and per-task totals.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use hv_core::{
    DateRange, Session, StatusLine, StatusReport, StatusView, TaskTotal, TimeTracking, ViewMode,
    format_duration,
};

const COLUMN_GAP: &str = "  ";

/// A text table whose columns grow to fit their widest cell.
struct Table {
    widths: Vec<usize>,
    lines: Vec<Line>,
}

enum Line {
    Cells(Vec<String>),
    Rule,
}

impl Table {
    fn new(header: &[&str]) -> Self {
        let mut table = Self {
            widths: vec![0; header.len()],
            lines: Vec::new(),
        };
        table.push(header.iter().map(ToString::to_string).collect());
        table.rule();
        table
    }

    fn push(&mut self, cells: Vec<String>) {
        for (width, cell) in self.widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.chars().count());
        }
        self.lines.push(Line::Cells(cells));
    }

    fn rule(&mut self) {
        self.lines.push(Line::Rule);
    }

    fn render(&self, output: &mut String) {
        for line in &self.lines {
            let text = match line {
                Line::Cells(cells) => cells
                    .iter()
                    .zip(&self.widths)
                    .map(|(cell, &width)| format!("{cell:<width$}"))
                    .collect::<Vec<_>>()
                    .join(COLUMN_GAP),
                Line::Rule => self
                    .widths
                    .iter()
                    .map(|&width| "─".repeat(width))
                    .collect::<Vec<_>>()
                    .join(COLUMN_GAP),
            };
            output.push_str(text.trim_end());
            output.push('\n');
        }
    }
}

fn week_description(range: DateRange) -> String {
    format!(
        "Week of {} (through {})",
        range.from.format("%b %-d, %Y"),
        range.to.format("%A")
    )
}

fn day_description(date: NaiveDate) -> String {
    date.format("%A, %b %-d, %Y").to_string()
}

fn format_report(report: &StatusReport, weekly: bool) -> String {
    let mut output = if weekly {
        format!("TIME ENTRIES: {}\n\n", week_description(report.range))
    } else {
        format!("TIME ENTRIES: {}\n\n", day_description(report.range.from))
    };

    let mut header = vec!["Client", "Project", "Task", "Start", "End", "Duration", "Running"];
    if weekly {
        header.insert(0, "Date");
    }
    let mut table = Table::new(&header);

    for line in &report.lines {
        let StatusLine::Entry(row) = line else {
            table.rule();
            continue;
        };
        let mut cells = vec![
            row.client.clone(),
            row.project.clone(),
            row.task.clone(),
            row.start.clone(),
            row.end.clone(),
            format_duration(row.duration),
            row.running_marker().to_string(),
        ];
        if weekly {
            cells.insert(0, row.date.clone());
        }
        table.push(cells);
    }

    if !report.is_empty() {
        table.rule();
    }
    let mut total = vec![String::new(); header.len()];
    total[0] = "Total".to_string();
    total[header.len() - 2] = format_duration(report.total);
    table.push(total);

    table.render(&mut output);
    output
}

fn format_totals(range: DateRange, totals: &[TaskTotal]) -> String {
    let mut output = format!("TASK TOTALS: {}\n\n", week_description(range));

    if totals.is_empty() {
        output.push_str("No time entries this week.\n");
        return output;
    }

    let mut table = Table::new(&["Client", "Project", "Task", "Total"]);
    for total in totals {
        table.push(vec![
            total.client.clone(),
            total.project.clone(),
            total.task.clone(),
            format_duration(total.total),
        ]);
    }

    table.render(&mut output);
    output
}

/// Renders a view as human-readable text.
pub fn format_view(view: &StatusView) -> String {
    match view {
        StatusView::Daily(report) => format_report(report, false),
        StatusView::Weekly(report) => format_report(report, true),
        StatusView::WeeklyTotals { range, totals } => format_totals(*range, totals),
    }
}

pub fn format_view_json(view: &StatusView) -> Result<String> {
    serde_json::to_string_pretty(view).context("failed to serialize status")
}

/// Fetches entries for the view anchored on `anchor` and prints them.
pub fn run<W: Write, R: TimeTracking>(
    writer: &mut W,
    session: &Session<R>,
    mode: ViewMode,
    anchor: NaiveDate,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let view = session
        .status(mode, anchor, now)
        .context("failed to load time entries")?;

    if json {
        writeln!(writer, "{}", format_view_json(&view)?)?;
    } else {
        write!(writer, "{}", format_view(&view))?;
    }

    Ok(())
}
