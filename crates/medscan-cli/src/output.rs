//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use medscan_domain::{Entity, MatchCandidate};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format extracted entities.
    pub fn format_entities(&self, entities: &[Entity]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entities)?),
            OutputFormat::Table => Ok(self.format_entities_table(entities)),
            OutputFormat::Quiet => Ok(entities
                .iter()
                .map(|e| e.code.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_entities_table(&self, entities: &[Entity]) -> String {
        if entities.is_empty() {
            return self.colorize("No entities found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Term", "Span", "Code", "Description", "Confidence"]);

        for entity in entities {
            builder.push_record([
                entity.term.clone(),
                format!("{}..{}", entity.start, entity.end),
                entity.code.clone(),
                entity.description.clone(),
                format!("{:.2}", entity.confidence),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format search candidates.
    pub fn format_candidates(&self, candidates: &[MatchCandidate]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_candidates_json(candidates),
            OutputFormat::Table => Ok(self.format_candidates_table(candidates)),
            OutputFormat::Quiet => Ok(candidates
                .iter()
                .map(|c| c.entry.code.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_candidates_json(&self, candidates: &[MatchCandidate]) -> Result<String> {
        let json_candidates: Vec<serde_json::Value> = candidates
            .iter()
            .map(|c| {
                serde_json::json!({
                    "code": c.entry.code,
                    "description": c.entry.description,
                    "category": c.entry.category,
                    "field": c.field,
                    "distance": c.distance,
                    "confidence": c.confidence(),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_candidates)?)
    }

    fn format_candidates_table(&self, candidates: &[MatchCandidate]) -> String {
        if candidates.is_empty() {
            return self.colorize("No matching entries.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Code", "Description", "Category", "Matched", "Confidence"]);

        for candidate in candidates {
            builder.push_record([
                candidate.entry.code.clone(),
                candidate.entry.description.clone(),
                candidate.entry.category.clone(),
                format!("{:?}", candidate.field).to_lowercase(),
                format!("{:.2}", candidate.confidence()),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a progress line.
    pub fn progress(&self, percent: u8) -> String {
        self.colorize(&format!("Analyzing... {:>3}%", percent), "cyan")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
