//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use kinship_domain::{FamilyRelationship, FamilyTreeNode, Person, RelationshipType, RuleTable};
use kinship_engine::{Suggestion, ValidationResult};
use serde_json::{json, Value};
use std::collections::BTreeSet;
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

    /// The active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a list of people.
    pub fn format_persons(&self, persons: &[Person]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = persons.iter().map(person_json).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(persons
                .iter()
                .map(|p| p.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if persons.is_empty() {
                    return Ok(self.colorize("No people found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "First Name", "Last Name", "Photo"]);
                for person in persons {
                    builder.push_record([
                        person.id.as_str(),
                        &person.first_name,
                        &person.last_name,
                        person.profile_photo.as_deref().unwrap_or("-"),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a single person with their relationships.
    pub fn format_person(&self, person: &Person, edges: &[FamilyRelationship]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut value = person_json(person);
                value["relationships"] = Value::Array(edges.iter().map(edge_json).collect());
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(person.id.to_string()),
            OutputFormat::Table => {
                let header = self.colorize(
                    &format!("{} ({})", person.full_name(), person.id),
                    "cyan",
                );
                Ok(format!("{}\n{}", header, self.format_relationships(edges)?))
            }
        }
    }

    /// Format relationship edges.
    pub fn format_relationships(&self, edges: &[FamilyRelationship]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = edges.iter().map(edge_json).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(edges
                .iter()
                .map(|e| e.relationship_id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if edges.is_empty() {
                    return Ok(self.colorize("No relationships found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Person A", "Is", "Of Person B", "Subtype", "Dates", "Active"]);
                for edge in edges {
                    let dates = format!(
                        "{} - {}",
                        edge.start_date.as_deref().unwrap_or("?"),
                        edge.end_date.as_deref().unwrap_or("")
                    );
                    builder.push_record([
                        edge.relationship_id.to_string().as_str(),
                        edge.person_a_id.as_str(),
                        &edge.relationship_type.label(),
                        edge.person_b_id.as_str(),
                        edge.relationship_subtype.as_deref().unwrap_or("-"),
                        dates.trim_end(),
                        if edge.is_active { "yes" } else { "no" },
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a family tree.
    pub fn format_tree(&self, tree: &FamilyTreeNode) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&tree_json(tree))?),
            OutputFormat::Quiet => {
                let mut seen = BTreeSet::new();
                let mut ids = vec![tree.id.to_string()];
                seen.insert(tree.id.clone());
                for (_, relative, _) in tree.flatten() {
                    if seen.insert(relative.clone()) {
                        ids.push(relative.to_string());
                    }
                }
                Ok(ids.join("\n"))
            }
            OutputFormat::Table => {
                let mut lines = vec![self.colorize(&node_title(tree), "cyan")];
                self.render_branches(tree, "", &mut lines);
                Ok(lines.join("\n"))
            }
        }
    }

    fn render_branches(&self, node: &FamilyTreeNode, prefix: &str, lines: &mut Vec<String>) {
        let count = node.relationships.len();
        for (i, rel) in node.relationships.iter().enumerate() {
            let last = i + 1 == count;
            let (branch, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
            let label = self.colorize(&rel.relationship_type.label(), "magenta");
            lines.push(format!("{}{}{}: {}", prefix, branch, label, node_title(&rel.person)));
            self.render_branches(&rel.person, &format!("{}{}", prefix, indent), lines);
        }
    }

    /// Format relationship suggestions.
    pub fn format_suggestions(&self, suggestions: &[Suggestion]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = suggestions
                    .iter()
                    .map(|s| {
                        json!({
                            "relationship_type": s.relationship_type.as_str(),
                            "confidence": s.confidence,
                            "reason": s.reason,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(suggestions
                .iter()
                .map(|s| s.relationship_type.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if suggestions.is_empty() {
                    return Ok(self.colorize("No suggestions.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Type", "Confidence", "Reason"]);
                for s in suggestions {
                    builder.push_record([
                        s.relationship_type.label().as_str(),
                        format!("{:.2}", s.confidence).as_str(),
                        &s.reason,
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a validation result.
    pub fn format_validation(&self, result: &ValidationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "valid": result.valid,
                    "error": result.error.as_ref().map(|e| e.to_string()),
                    "warnings": result.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(if result.valid { "valid" } else { "invalid" }.to_string()),
            OutputFormat::Table => {
                let mut lines = Vec::new();
                match &result.error {
                    None => lines.push(self.success("Relationship is valid")),
                    Some(reason) => lines.push(self.error(&reason.to_string())),
                }
                for warning in &result.warnings {
                    lines.push(self.warning(&warning.to_string()));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the relationship type catalogue.
    pub fn format_types(&self, rules: &RuleTable) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = RelationshipType::ALL
                    .iter()
                    .map(|t| {
                        let rule = rules.rule(*t);
                        json!({
                            "type": t.as_str(),
                            "label": t.label(),
                            "category": t.category().as_str(),
                            "inverse": rule.inverse.map(|i| i.as_str()),
                            "bidirectional": rule.bidirectional,
                            "auto_create_inverse": rule.auto_create_inverse,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(RelationshipType::ALL
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Type", "Label", "Category", "Inverse", "Auto Inverse"]);
                for t in RelationshipType::ALL {
                    let rule = rules.rule(t);
                    builder.push_record([
                        t.as_str(),
                        &t.label(),
                        t.category().as_str(),
                        rule.inverse.map(|i| i.as_str()).unwrap_or("-"),
                        if rule.auto_create_inverse { "yes" } else { "no" },
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
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
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn node_title(node: &FamilyTreeNode) -> String {
    let name = format!("{} {}", node.first_name, node.last_name);
    format!("{} ({})", name.trim(), node.id)
}

fn person_json(person: &Person) -> Value {
    json!({
        "id": person.id.as_str(),
        "first_name": person.first_name,
        "last_name": person.last_name,
        "profile_photo": person.profile_photo,
    })
}

fn edge_json(edge: &FamilyRelationship) -> Value {
    json!({
        "relationship_id": edge.relationship_id.to_string(),
        "person_a_id": edge.person_a_id.as_str(),
        "person_b_id": edge.person_b_id.as_str(),
        "relationship_type": edge.relationship_type.as_str(),
        "relationship_subtype": edge.relationship_subtype,
        "start_date": edge.start_date,
        "end_date": edge.end_date,
        "is_active": edge.is_active,
        "notes": edge.notes,
        "created_date": edge.created_date,
        "created_by": edge.created_by,
    })
}

fn tree_json(node: &FamilyTreeNode) -> Value {
    let ids = |nodes: &[FamilyTreeNode]| -> Vec<String> {
        nodes.iter().map(|n| n.id.to_string()).collect()
    };

    json!({
        "id": node.id.as_str(),
        "first_name": node.first_name,
        "last_name": node.last_name,
        "profile_photo": node.profile_photo,
        "spouse": node.spouse.as_ref().map(|s| s.id.to_string()),
        "children": ids(&node.children),
        "parents": ids(&node.parents),
        "siblings": ids(&node.siblings),
        "relationships": node
            .relationships
            .iter()
            .map(|r| json!({
                "person_id": r.person_id.as_str(),
                "relationship_type": r.relationship_type.as_str(),
                "person": tree_json(&r.person),
            }))
            .collect::<Vec<_>>(),
    })
}
