//! Best-effort recovery of structured payloads from free-form model output.
//!
//! Extraction failure is terminal for one invocation - there is no retry
//! here, and callers are expected to surface the raw text verbatim whenever
//! the result is not [`ExtractionResult::Parsed`].

use serde_json::Value;

use crate::report::Section;

/// What shape of payload the caller expects in the raw output
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeHint {
  /// A single JSON object somewhere in the text
  JsonObject,
  /// Sections introduced by a heading marker at the start of a line
  TitledMarkdownSections { heading: String },
}

impl ShapeHint {
  /// The usual Markdown shape: level-2 headings
  pub fn sections() -> Self {
    ShapeHint::TitledMarkdownSections { heading: "## ".to_string() }
  }
}

/// Structured payload recovered from raw output
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
  Json(Value),
  Sections(Vec<Section>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
  Parsed(Payload),
  /// The text contains nothing resembling the expected shape
  NotFound,
  /// A candidate span was found but could not be parsed
  MalformedPayload(String),
}

pub fn extract_structured(raw_text: &str, expected: &ShapeHint) -> ExtractionResult {
  match expected {
    ShapeHint::JsonObject => extract_json(raw_text),
    ShapeHint::TitledMarkdownSections { heading } => {
      let sections = split_sections(raw_text, heading);
      if sections.is_empty() {
        ExtractionResult::NotFound
      } else {
        ExtractionResult::Parsed(Payload::Sections(sections))
      }
    }
  }
}

/// Find the first syntactically complete JSON object in the text.
///
/// Models wrap their JSON in prose and code fences, and sometimes emit more
/// than one brace-delimited block; scanning for the first span that actually
/// parses avoids capturing unintended trailing content the way a widest-span
/// match would.
fn extract_json(raw_text: &str) -> ExtractionResult {
  // Prefer a ```json fence when the model used one; fall back to scanning
  // the whole text so a payload outside the fence is still found
  if let Some(block) = fenced_json_block(raw_text) {
    if let ExtractionResult::Parsed(payload) = scan_json(block) {
      return ExtractionResult::Parsed(payload);
    }
  }
  scan_json(raw_text)
}

fn scan_json(text: &str) -> ExtractionResult {
  let mut first_error: Option<String> = None;
  let mut saw_brace = false;
  let mut search_from = 0usize;

  while let Some(offset) = text[search_from..].find('{') {
    let start = search_from + offset;
    saw_brace = true;

    match balanced_span(&text[start..]) {
      Some(span) => match serde_json::from_str::<Value>(span) {
        Ok(value @ Value::Object(_)) => return ExtractionResult::Parsed(Payload::Json(value)),
        Ok(_) => {
          first_error.get_or_insert_with(|| "candidate span is not a JSON object".to_string());
        }
        Err(e) => {
          first_error.get_or_insert_with(|| e.to_string());
        }
      },
      None => {
        first_error.get_or_insert_with(|| "unbalanced braces in candidate span".to_string());
      }
    }

    search_from = start + 1;
  }

  if !saw_brace {
    return ExtractionResult::NotFound;
  }
  ExtractionResult::MalformedPayload(
    first_error.unwrap_or_else(|| "no parseable JSON object".to_string()),
  )
}

/// Span from the leading `{` to the brace that balances it, string-aware.
/// Returns `None` when the text ends before the object closes.
fn balanced_span(text: &str) -> Option<&str> {
  let mut depth = 0usize;
  let mut in_string = false;
  let mut escaped = false;

  for (i, c) in text.char_indices() {
    if in_string {
      if escaped {
        escaped = false;
      } else if c == '\\' {
        escaped = true;
      } else if c == '"' {
        in_string = false;
      }
      continue;
    }

    match c {
      '"' => in_string = true,
      '{' => depth += 1,
      '}' => {
        depth -= 1;
        if depth == 0 {
          return Some(&text[..i + 1]);
        }
      }
      _ => {}
    }
  }

  None
}

/// Contents of a ```json fence, if the model wrapped its output in one
fn fenced_json_block(text: &str) -> Option<&str> {
  let start = text.find("```json")?;
  let after_fence = &text[start + 7..];
  let end = after_fence.find("```")?;
  Some(after_fence[..end].trim())
}

/// Split Markdown text into (title, body) sections in document order.
///
/// Text before the first heading is not a section and is dropped, as are
/// segments that are empty after trimming.
pub fn split_sections(text: &str, heading: &str) -> Vec<Section> {
  let mut sections: Vec<Section> = Vec::new();
  let mut current: Option<(String, Vec<&str>)> = None;

  for line in text.lines() {
    if let Some(rest) = line.strip_prefix(heading) {
      if let Some((title, body)) = current.take() {
        push_section(&mut sections, title, &body);
      }
      current = Some((rest.trim().to_string(), Vec::new()));
    } else if let Some((_, body)) = current.as_mut() {
      body.push(line);
    }
  }
  if let Some((title, body)) = current.take() {
    push_section(&mut sections, title, &body);
  }

  sections
}

fn push_section(sections: &mut Vec<Section>, title: String, body_lines: &[&str]) {
  let body = strip_fence_wrapper(body_lines.join("\n").trim());
  if title.is_empty() && body.is_empty() {
    return;
  }
  sections.push(Section { title, body });
}

/// Remove a fenced code-block wrapper the model may have added around a body
fn strip_fence_wrapper(body: &str) -> String {
  let lines: Vec<&str> = body.lines().collect();
  if lines.len() >= 2 && lines[0].trim_start().starts_with("```") && lines[lines.len() - 1].trim() == "```" {
    return lines[1..lines.len() - 1].join("\n").trim().to_string();
  }
  body.to_string()
}
