//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Document, Record};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Record {
    fn pretty_print(&self) -> String {
        let header = format!("Record: {}", self.id.as_deref().unwrap_or("(no id)"));
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref custom_id) = self.custom_id {
            lines.push(format!("Custom ID:      {}", custom_id));
        }

        if let Some(ref name) = self.name {
            lines.push(format!("Name:           {}", name));
        }

        if let Some(record_type) = self.type_text() {
            lines.push(format!("Type:           {}", record_type));
        }

        if let Some(ref module) = self.module {
            lines.push(format!("Module:         {}", module));
        }

        if let Some(status) = self.status_text() {
            lines.push(format!("Status:         {}", status));
        }

        if let Some(ref opened) = self.opened_date {
            lines.push(format!("Opened:         {}", opened));
        }

        if let Some(ref closed) = self.closed_date {
            lines.push(format!("Closed:         {}", closed));
        }

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Document {
    fn pretty_print(&self) -> String {
        let header = format!("Document #{}", self.id);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref file_name) = self.file_name {
            lines.push(format!("File:           {}", file_name));
        }

        if let Some(ref content_type) = self.content_type {
            lines.push(format!("Content Type:   {}", content_type));
        }

        if let Some(size) = self.size {
            lines.push(format!("Size:           {} bytes", size));
        }

        if let Some(ref entity_id) = self.entity_id {
            lines.push(format!("Attached To:    {}", entity_id));
        }

        if let Some(ref uploaded) = self.uploaded_date {
            let by = self
                .uploaded_by
                .as_deref()
                .map(|u| format!(" by {}", u))
                .unwrap_or_default();
            lines.push(format!("Uploaded:       {}{}", uploaded.format("%Y-%m-%d %H:%M:%S"), by));
        }

        if let Some(ref modified) = self.modified_date {
            lines.push(format!("Modified:       {}", modified.format("%Y-%m-%d %H:%M:%S")));
        }

        lines.join("\n")
    }
}
