use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One uploaded tabular file, owned by a farm's storage directory.
///
/// Nothing about the contents is validated before upload - column names like
/// `animal_id` or `milk_yield` are conventions the prompts rely on, not a
/// schema this crate enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
  pub name: String,
  pub farm: String,
  pub path: PathBuf,
}

/// Header row plus the first few data rows, for display before analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetPreview {
  pub header: Vec<String>,
  pub rows: Vec<Vec<String>>,
}

impl Dataset {
  /// Read the header and up to `rows` data rows from the stored file
  pub fn preview(&self, rows: usize) -> Result<DatasetPreview> {
    let content = fs::read_to_string(&self.path)?;
    let mut lines = content.lines();

    let header = match lines.next() {
      Some(line) => split_row(line),
      None => Vec::new(),
    };

    let rows = lines.take(rows).map(split_row).collect();

    Ok(DatasetPreview { header, rows })
  }
}

/// Split one comma-separated row, honoring double-quoted fields
fn split_row(line: &str) -> Vec<String> {
  let mut fields = Vec::new();
  let mut field = String::new();
  let mut in_quotes = false;
  let mut chars = line.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '"' if in_quotes && chars.peek() == Some(&'"') => {
        // escaped quote inside a quoted field
        field.push('"');
        chars.next();
      }
      '"' => in_quotes = !in_quotes,
      ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
      _ => field.push(c),
    }
  }
  fields.push(field);

  fields
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn splits_plain_rows() {
    assert_eq!(split_row("a,b,c"), vec!["a", "b", "c"]);
    assert_eq!(split_row("animal_id,milk_yield,date"), vec!["animal_id", "milk_yield", "date"]);
  }

  #[test]
  fn splits_quoted_rows() {
    assert_eq!(split_row(r#"1,"Brown Swiss, imported",22.4"#), vec!["1", "Brown Swiss, imported", "22.4"]);
    assert_eq!(split_row(r#""she said ""moo""",ok"#), vec![r#"she said "moo""#, "ok"]);
  }

  #[test]
  fn keeps_empty_fields() {
    assert_eq!(split_row("a,,c"), vec!["a", "", "c"]);
    assert_eq!(split_row(""), vec![""]);
  }
}
