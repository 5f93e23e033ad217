/*!
 * Reporting functionality for dirbook
 *
 * Prints a console summary of a run using the tabled library.
 */

use std::collections::HashMap;
use std::time::Duration;

use strum::IntoEnumIterator;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::assembler::DocumentStats;
use crate::types::IgnoreReason;

/// Information about a file in the report
#[derive(Debug, Clone, Default)]
pub struct FileReportInfo {
    /// Number of lines rendered for the file
    pub lines: usize,
    /// Number of characters rendered for the file
    pub chars: usize,
    /// Classification label
    pub status: &'static str,
}

/// Statistics for a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to scan, assemble and write
    pub duration: Duration,
    /// Number of file sections in the document
    pub files_processed: usize,
    /// Total number of included lines
    pub total_lines: usize,
    /// Total number of included characters
    pub total_chars: usize,
    /// Number of files per classification label
    pub by_label: HashMap<&'static str, usize>,
    /// Number of ignored files per rule
    pub by_reason: HashMap<IgnoreReason, usize>,
    /// Details for each file
    pub file_details: HashMap<String, FileReportInfo>,
}

impl RunReport {
    /// Build a report from the assembled document statistics
    pub fn new(output_file: String, duration: Duration, stats: DocumentStats) -> Self {
        Self {
            output_file,
            duration,
            files_processed: stats.files_processed,
            total_lines: stats.total_lines,
            total_chars: stats.total_chars,
            by_label: stats.by_label,
            by_reason: stats.by_reason,
            file_details: stats.file_details,
        }
    }
}

/// Report generator for run results
pub struct Reporter;

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Shorten a path to at most `max_len` characters, keeping the tail
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        // Keep as many trailing segments as fit after the ellipsis
        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.split('/').rev() {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        // A single segment longer than the limit is cut by characters
        if segments.is_empty() {
            let tail: String = path
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    /// Generate the report text
    pub fn generate_report(&self, report: &RunReport) -> String {
        let files_title = if report.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  PROCESSED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title,
            self.create_files_table(report),
            "✅  COMPILATION COMPLETE",
            self.create_summary_table(report)
        )
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        // Add rows to the summary table
        let count = |label: &str| report.by_label.get(label).copied().unwrap_or(0);

        let mut rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Processed".to_string(),
                value: self.format_number(report.files_processed),
            },
            SummaryRow {
                key: "📝 Included".to_string(),
                value: format!(
                    "{} files, {} lines",
                    self.format_number(count("included")),
                    self.format_number(report.total_lines)
                ),
            },
            SummaryRow {
                key: "🖼️ Media".to_string(),
                value: self.format_number(count("media")),
            },
            SummaryRow {
                key: "📦 Too Large".to_string(),
                value: self.format_number(count("too-large")),
            },
            SummaryRow {
                key: "❓ Unreadable".to_string(),
                value: self.format_number(count("unreadable")),
            },
        ];

        // Break ignored files down by rule, in declaration order
        let ignored: Vec<String> = IgnoreReason::iter()
            .filter_map(|reason| {
                report
                    .by_reason
                    .get(&reason)
                    .map(|n| format!("{} {}", n, reason))
            })
            .collect();
        rows.push(SummaryRow {
            key: "🚫 Ignored".to_string(),
            value: if ignored.is_empty() {
                "0".to_string()
            } else {
                ignored.join(", ")
            },
        });

        // Create and style the table
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Status")]
            status: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Chars")]
            chars: String,
        }

        // Sort files by character count, largest first, then by path
        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|(pa, a), (pb, b)| b.chars.cmp(&a.chars).then_with(|| pa.cmp(pb)));

        // Only show the top 10 when the list is long
        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                status: info.status.to_string(),
                lines: self.format_number(info.lines),
                chars: self.format_number(info.chars),
            })
            .collect();

        // Create and style the table
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
