//! Flat `Section;Field;Value` export.

use anyhow::Result;
use certscope::DecodedObject;

/// Rows in section order: Checks, Subject, Issuer (certificates only),
/// Properties.
pub fn csv_rows(decoded: &DecodedObject) -> Vec<[String; 3]> {
    let mut rows = Vec::new();

    for check in &decoded.checks {
        rows.push([
            "Checks".to_string(),
            check.name.clone(),
            format!("{} - {}", check.status.label(), check.message),
        ]);
    }
    for (attr, value) in &decoded.subject {
        rows.push(["Subject".to_string(), attr.clone(), value.clone()]);
    }
    if let Some(issuer) = &decoded.issuer {
        for (attr, value) in issuer {
            rows.push(["Issuer".to_string(), attr.clone(), value.clone()]);
        }
    }
    for (field, value) in decoded.properties() {
        rows.push(["Properties".to_string(), field.to_string(), value]);
    }

    rows
}

pub fn to_csv(decoded: &DecodedObject) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer.write_record(["Section", "Field", "Value"])?;
    for row in csv_rows(decoded) {
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(String::from_utf8(bytes)?)
}
