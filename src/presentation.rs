use crate::models::ResultRow;

pub const HIDDEN_MARKER: &str = "hidden";

pub const COLUMNS: [&str; 6] = ["Channel", "Created", "Subscribers", "Total Views", "Videos", "Link"];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A result row with every column rendered as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub name: String,
    pub created: String,
    pub subscribers: String,
    pub views: String,
    pub videos: String,
    pub link: String,
}

impl DisplayRow {
    pub fn from_result(row: &ResultRow) -> Self {
        let record = &row.record;
        Self {
            name: record.name.clone(),
            // wall-clock time as published, offset dropped
            created: record
                .created_at
                .map(|t| t.naive_local().format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            subscribers: if record.hidden_subscriber_count {
                HIDDEN_MARKER.to_string()
            } else {
                format_count(record.subscriber_count)
            },
            views: format_count(record.view_count),
            videos: format_count(record.video_count),
            link: record.url(),
        }
    }

    pub fn cells(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.created.as_str(),
            self.subscribers.as_str(),
            self.views.as_str(),
            self.videos.as_str(),
            self.link.as_str(),
        ]
    }
}

pub fn display_rows(rows: &[ResultRow]) -> Vec<DisplayRow> {
    rows.iter().map(DisplayRow::from_result).collect()
}

/// Format a count with `,` thousands separators
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render rows as a plain-text table, numeric columns right-aligned
pub fn render_table(rows: &[DisplayRow]) -> String {
    const RIGHT_ALIGNED: [bool; 6] = [false, false, true, true, true, false];

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: [&str; 6]| {
        let mut line = cells
            .iter()
            .zip(widths)
            .zip(RIGHT_ALIGNED)
            .map(|((cell, width), right)| {
                let pad = " ".repeat(width - cell.chars().count());
                if right {
                    format!("{}{}", pad, cell)
                } else {
                    format!("{}{}", cell, pad)
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        line.truncate(line.trim_end().len());
        line
    };

    let mut output = String::new();
    output.push_str(&format_line(COLUMNS));
    output.push('\n');
    output.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    output.push('\n');
    for row in rows {
        output.push_str(&format_line(row.cells()));
        output.push('\n');
    }
    output
}
