//! Plain-text tables for the listing operations.
//!
//! Column widths are computed on the unstyled text; styling is applied
//! after padding so ANSI escapes never disturb alignment.

use colored::{ColoredString, Colorize};

use openfactory_core::availability::AvailabilityStatus;
use openfactory_core::references::Deployment;

use crate::listing::{ApplicationRow, AssetRow, DeviceRow, Inspection};

const COLUMN_GAP: &str = "  ";
const RULE: char = '─';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Key,
    Good,
    Bad,
    Warn,
    Dim,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub style: Style,
}

impl Cell {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::Plain)
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: Vec<&'static str>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Render the table. A rule separates the header and every row.
    pub fn render(&self, color: bool) -> String {
        let widths = self.column_widths();
        let total = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
        let rule: String = std::iter::repeat(RULE).take(total).collect();

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');

        let header: Vec<Cell> = self
            .headers
            .iter()
            .map(|h| Cell::new(*h, Style::Plain))
            .collect();
        out.push_str(&render_line(&header, &widths, color, true));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');

        for row in &self.rows {
            out.push_str(&render_line(row, &widths, color, false));
            out.push('\n');
            out.push_str(&rule);
            out.push('\n');
        }
        out
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.width());
                }
            }
        }
        widths
    }
}

fn render_line(cells: &[Cell], widths: &[usize], color: bool, header: bool) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).cloned().unwrap_or_else(|| Cell::plain(""));
            let text = format!("{:<width$}", cell.text);
            if !color {
                text
            } else if header {
                text.bold().to_string()
            } else {
                styled(text, cell.style).to_string()
            }
        })
        .collect();
    padded.join(COLUMN_GAP).trim_end().to_string()
}

fn styled(text: String, style: Style) -> ColoredString {
    match style {
        Style::Plain => text.normal(),
        Style::Key => text.cyan(),
        Style::Good => text.green(),
        Style::Bad => text.red().bold(),
        Style::Warn => text.yellow(),
        Style::Dim => text.dimmed(),
    }
}

pub fn availability_cell(status: &AvailabilityStatus) -> Cell {
    let style = match status {
        AvailabilityStatus::Available => Style::Good,
        AvailabilityStatus::Unavailable => Style::Bad,
        AvailabilityStatus::Other(_) => Style::Warn,
        AvailabilityStatus::Unknown => Style::Dim,
    };
    Cell::new(status.label(), style)
}

pub fn deployment_cell(deployment: &Deployment) -> Cell {
    let style = if deployment.is_deployed() {
        Style::Good
    } else {
        Style::Bad
    };
    Cell::new(deployment.label(), style)
}

pub fn devices_table(rows: &[DeviceRow]) -> Table {
    let mut table = Table::new(
        "Deployed Devices",
        vec![
            "Asset UUID",
            "Availability",
            "MTConnect Agent",
            "Kafka Producer",
            "Supervisor",
        ],
    );
    for row in rows {
        table.push(vec![
            Cell::new(row.uuid.as_str(), Style::Key),
            availability_cell(&row.availability),
            deployment_cell(&row.agent),
            deployment_cell(&row.producer),
            deployment_cell(&row.supervisor),
        ]);
    }
    table
}

pub fn applications_table(rows: &[ApplicationRow]) -> Table {
    let mut table = Table::new(
        "Deployed Apps",
        vec!["Asset UUID", "Availability", "Vendor", "Version", "License"],
    );
    for row in rows {
        table.push(vec![
            Cell::new(row.uuid.as_str(), Style::Key),
            availability_cell(&row.availability),
            Cell::plain(&row.manufacturer),
            Cell::plain(&row.version),
            Cell::plain(&row.license),
        ]);
    }
    table
}

pub fn assets_table(rows: &[AssetRow]) -> Table {
    let mut table = Table::new(
        "Deployed Assets",
        vec!["Asset UUID", "Availability", "Type", "Docker container"],
    );
    for row in rows {
        table.push(vec![
            Cell::new(row.uuid.as_str(), Style::Key),
            availability_cell(&row.availability),
            Cell::plain(&row.asset_type),
            Cell::plain(&row.docker_service),
        ]);
    }
    table
}

pub fn inspection_table(inspection: &Inspection) -> Table {
    let mut table = Table::new(inspection.uuid.as_str(), vec!["ID", "Value", "Type", "Tag"]);
    for row in &inspection.rows {
        table.push(vec![
            Cell::new(&row.id, Style::Key),
            Cell::plain(&row.value),
            Cell::plain(row.attribute_type.label()),
            Cell::plain(&row.tag),
        ]);
    }
    table
}
