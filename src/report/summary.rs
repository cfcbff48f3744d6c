//! Run summary report generation

use std::path::PathBuf;
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of one visualization run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub columns_loaded: usize,
    pub rows_retained: usize,
    pub overweight_share: f64,
    pub cholesterol_share: f64,
    pub gluc_share: f64,
    pub outputs: Vec<PathBuf>,
    pub load_time: Option<Duration>,
    pub preprocess_time: Option<Duration>,
    pub catplot_time: Option<Duration>,
    pub heatmap_time: Option<Duration>,
}

impl RunSummary {
    pub fn new(rows_loaded: usize, columns_loaded: usize) -> Self {
        Self {
            rows_loaded,
            columns_loaded,
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = Some(elapsed);
    }

    pub fn set_preprocess_time(&mut self, elapsed: Duration) {
        self.preprocess_time = Some(elapsed);
    }

    pub fn set_catplot_time(&mut self, elapsed: Duration) {
        self.catplot_time = Some(elapsed);
    }

    pub fn set_heatmap_time(&mut self, elapsed: Duration) {
        self.heatmap_time = Some(elapsed);
    }

    pub fn add_output(&mut self, path: PathBuf) {
        self.outputs.push(path);
    }

    /// Percentage of loaded rows that survived the heatmap filter
    pub fn retained_pct(&self) -> f64 {
        if self.rows_loaded == 0 {
            return 0.0;
        }
        self.rows_retained as f64 / self.rows_loaded as f64 * 100.0
    }

    pub fn total_time(&self) -> Duration {
        [
            self.load_time,
            self.preprocess_time,
            self.catplot_time,
            self.heatmap_time,
        ]
        .iter()
        .flatten()
        .sum()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Rows Loaded"),
            Cell::new(self.rows_loaded),
        ]);
        table.add_row(vec![
            Cell::new("🧮 Columns"),
            Cell::new(self.columns_loaded),
        ]);

        let retained = self.retained_pct();
        let color = if retained >= 90.0 {
            Color::Green
        } else if retained >= 70.0 {
            Color::Yellow
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new("🔥 Rows in Heatmap"),
            Cell::new(format!("{} ({:.1}%)", self.rows_retained, retained)).fg(color),
        ]);

        for (label, share) in [
            ("⚖️  Overweight", self.overweight_share),
            ("🩸 Cholesterol Above Normal", self.cholesterol_share),
            ("🍬 Glucose Above Normal", self.gluc_share),
        ] {
            table.add_row(vec![
                Cell::new(label),
                Cell::new(format!("{:.1}%", share * 100.0)).fg(Color::Cyan),
            ]);
        }

        table.add_row(vec![
            Cell::new("⏱️  Total Time"),
            Cell::new(format_duration(self.total_time()))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.outputs.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("🖼️").cyan(),
                style("OUTPUT FILES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for path in &self.outputs {
                println!("        {} {}", style("•").dim(), path.display());
            }
        }
    }
}

/// Format a duration as seconds or milliseconds, whichever reads better
pub fn format_duration(elapsed: Duration) -> String {
    if elapsed.as_secs_f64() >= 1.0 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}
