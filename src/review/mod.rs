mod assemble;
mod fields;
mod locale;

pub use assemble::assemble_review;
pub use fields::aggregate_fields;
pub use locale::select_preferred;

use chrono::NaiveDate;
use serde_json::Value;

pub const VIEWABLE_COMMENT_LABEL: &str = "Comment for author and editor";
pub const NON_VIEWABLE_COMMENT_LABEL: &str = "Comment for editor only";

/// Reviewer recommendation, in the order OJS numbers them on the review form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    None,
    Accept,
    RevisionsRequired,
    ResubmitForReview,
    ResubmitElsewhere,
    Decline,
    SeeComments,
}

impl Recommendation {
    const BY_CODE: [Recommendation; 7] = [
        Recommendation::None,
        Recommendation::Accept,
        Recommendation::RevisionsRequired,
        Recommendation::ResubmitForReview,
        Recommendation::ResubmitElsewhere,
        Recommendation::Decline,
        Recommendation::SeeComments,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::BY_CODE.get(i).copied())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::None => "None",
            Recommendation::Accept => "Accept Submission",
            Recommendation::RevisionsRequired => "Revisions Required",
            Recommendation::ResubmitForReview => "Resubmit for Review",
            Recommendation::ResubmitElsewhere => "Resubmit Elsewhere",
            Recommendation::Decline => "Decline Submission",
            Recommendation::SeeComments => "See Comments",
        }
    }
}

/// A reviewer's answer to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Text(String),
    Index(i64),
    Indices(Vec<i64>),
}

impl Response {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Response::Text(String::new()),
            Value::String(s) => Response::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Response::Index(i),
                None => Response::Text(n.to_string()),
            },
            Value::Array(items) => Response::Indices(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Number(n) => n.as_i64(),
                        Value::String(s) => s.trim().parse().ok(),
                        _ => None,
                    })
                    .collect(),
            ),
            other => Response::Text(other.to_string()),
        }
    }

    /// Whether option `index` was picked. Single-choice answers are stored as
    /// text, so a numeric string matches its index.
    pub fn is_selected(&self, index: usize) -> bool {
        let Ok(index) = i64::try_from(index) else {
            return false;
        };
        match self {
            Response::Index(i) => *i == index,
            Response::Indices(indices) => indices.contains(&index),
            Response::Text(s) => s.trim().parse::<i64>() == Ok(index),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Response::Text(s) => s.clone(),
            Response::Index(i) => i.to_string(),
            Response::Indices(indices) => indices
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// One question on the review, from either a structured form or a free-form comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: i64,
    pub question: String,
    pub description: String,
    pub possible_responses: Option<Vec<String>>,
    pub response: Response,
}

impl Field {
    pub fn comment(viewable: bool, text: String) -> Self {
        let question = if viewable {
            VIEWABLE_COMMENT_LABEL
        } else {
            NON_VIEWABLE_COMMENT_LABEL
        };

        Self {
            id: 0,
            question: question.to_string(),
            description: String::new(),
            possible_responses: None,
            response: Response::Text(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub review_id: i64,
    pub submission_id: i64,
    pub publication_id: i64,
    pub date_completed: String,
    pub date_generated: String,
    pub recommendation: Recommendation,
    pub reviewer_name: String,
    pub article_title: String,
    pub journal_title: String,
    pub authors: Vec<String>,
    pub fields: Vec<Field>,
    pub files: Vec<String>,
}

/// Dates in reports read `M/D/YYYY`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
