//! Table rendering for terminals.

use std::fmt::Write as _;

use certscope::{CheckLevel, CheckResult, DecodedObject, NameMap};
use colored::{ColoredString, Colorize};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Check")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

#[derive(Tabled)]
struct ExtensionRow {
    #[tabled(rename = "Extension")]
    name: String,
    #[tabled(rename = "Critical")]
    critical: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn render(decoded: &DecodedObject, verbose: bool) -> String {
    let mut out = String::new();

    let mut header = format!("{} ({})", decoded.kind, decoded.encoding);
    if let Some(source) = &decoded.source {
        let _ = write!(header, " {source}");
    }
    let _ = writeln!(out, "{}", header.cyan().bold());
    out.push('\n');

    let properties: Vec<FieldRow> = decoded
        .properties()
        .into_iter()
        .map(|(field, value)| FieldRow {
            field: field.to_string(),
            value,
        })
        .collect();
    section(&mut out, "Properties", &properties);

    section(&mut out, "Subject", &name_rows(&decoded.subject));
    if let Some(issuer) = &decoded.issuer {
        section(&mut out, "Issuer", &name_rows(issuer));
    }

    if !decoded.extensions.is_empty() {
        let rows: Vec<ExtensionRow> = decoded
            .extensions
            .iter()
            .map(|ext| ExtensionRow {
                name: ext.name.clone(),
                critical: if ext.critical { "yes" } else { "no" }.to_string(),
                value: ext.value.clone(),
            })
            .collect();
        section(&mut out, "Extensions", &rows);
    }

    let checks: Vec<CheckRow> = decoded
        .checks
        .iter()
        .map(|check| CheckRow {
            name: check.name.clone(),
            status: paint(check).to_string(),
            message: match (&check.detail, verbose) {
                (Some(detail), true) => format!("{}\n{}", check.message, detail.dimmed()),
                _ => check.message.clone(),
            },
        })
        .collect();
    section(&mut out, "Checks", &checks);

    out
}

fn section<T: Tabled>(out: &mut String, title: &str, rows: &[T]) {
    let _ = writeln!(out, "{}", title.bold().underline());
    let table = Table::new(rows).with(Style::rounded()).to_string();
    let _ = writeln!(out, "{table}");
    out.push('\n');
}

fn name_rows(name: &NameMap) -> Vec<FieldRow> {
    name.iter()
        .map(|(attr, value)| FieldRow {
            field: attr.clone(),
            value: value.clone(),
        })
        .collect()
}

fn paint(check: &CheckResult) -> ColoredString {
    let label = check.status.label();
    match check.status.level() {
        CheckLevel::Ok => label.green().bold(),
        CheckLevel::Warn => label.yellow().bold(),
        CheckLevel::Fail => label.red().bold(),
        CheckLevel::Na => label.dimmed(),
    }
}
