use std::path::Path;

use crate::error::{ExportError, Result};
use crate::review::ReviewRecord;

/// Report template, kept as lines so each can be expanded on its own.
pub struct Template {
    lines: Vec<String>,
}

impl Template {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ExportError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Expands every line and terminates each with a newline.
    pub fn render(&self, record: &ReviewRecord) -> Result<String> {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&expand_line(line, record)?);
            out.push('\n');
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordField {
    ReviewId,
    SubmissionId,
    DateCompleted,
    ArticleTitle,
    Recommendation,
    DateGenerated,
    JournalTitle,
    ReviewerName,
}

impl RecordField {
    fn value(self, record: &ReviewRecord) -> String {
        match self {
            RecordField::ReviewId => record.review_id.to_string(),
            RecordField::SubmissionId => record.submission_id.to_string(),
            RecordField::DateCompleted => record.date_completed.clone(),
            RecordField::ArticleTitle => record.article_title.clone(),
            RecordField::Recommendation => record.recommendation.label().to_string(),
            RecordField::DateGenerated => record.date_generated.clone(),
            RecordField::JournalTitle => record.journal_title.clone(),
            RecordField::ReviewerName => record.reviewer_name.clone(),
        }
    }
}

/// What a placeholder name stands for.
enum Symbol {
    Field(RecordField),
    Formatter(fn(&ReviewRecord) -> String),
}

fn symbol(name: &str) -> Option<Symbol> {
    let symbol = match name {
        "REVIEW_ID" => Symbol::Field(RecordField::ReviewId),
        "ARTICLE_ID" => Symbol::Field(RecordField::SubmissionId),
        "SUBMISSION_DATE" => Symbol::Field(RecordField::DateCompleted),
        "ARTICLE_TITLE" => Symbol::Field(RecordField::ArticleTitle),
        "FORM_RESPONSES" => Symbol::Formatter(format_responses),
        "RECOMMENDATION" => Symbol::Field(RecordField::Recommendation),
        "CURRENT_DATE" => Symbol::Field(RecordField::DateGenerated),
        "JOURNAL_TITLE" => Symbol::Field(RecordField::JournalTitle),
        "REVIEWER_NAME" => Symbol::Field(RecordField::ReviewerName),
        "AUTHORS" => Symbol::Formatter(format_authors),
        _ => return None,
    };
    Some(symbol)
}

/// Replaces each `{{ NAME }}` in `line`, left to right.
///
/// An opening `{{` with no closing `}}` after it is copied through as is.
pub fn expand_line(line: &str, record: &ReviewRecord) -> Result<String> {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            break;
        };

        out.push_str(&rest[..start]);
        let name = after_open[..end].trim();
        let value = match symbol(name) {
            Some(Symbol::Field(field)) => field.value(record),
            Some(Symbol::Formatter(formatter)) => formatter(record),
            None => {
                return Err(ExportError::UnknownPlaceholder {
                    name: name.to_string(),
                })
            }
        };
        out.push_str(&value);
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

pub fn format_responses(record: &ReviewRecord) -> String {
    let mut out = String::new();

    for field in &record.fields {
        out.push_str("<li>\n");
        out.push_str(&format!("<h3>{}</h3>\n", field.question));
        out.push_str(&format!(
            "<div class=\"question-description\">{}</div>\n",
            field.description
        ));

        match &field.possible_responses {
            Some(options) => {
                out.push_str("<ol class=\"options\">");
                for (i, option) in options.iter().enumerate() {
                    if field.response.is_selected(i) {
                        out.push_str(&format!("<li class=\"option-selected\">{}</li>", option));
                    } else {
                        out.push_str(&format!("<li>{}</li>", option));
                    }
                }
                out.push_str("</ol>");
            }
            None => {
                out.push_str(&format!(
                    "<div class=\"comment-text\">{}</div>",
                    field.response.to_text().replace('\n', "<br>")
                ));
            }
        }

        out.push_str("</li>");
    }

    out
}

pub fn format_authors(record: &ReviewRecord) -> String {
    format!(
        "<p class=\"authors\">Authors: <strong>{}</strong></p>",
        record.authors.join(", ")
    )
}
