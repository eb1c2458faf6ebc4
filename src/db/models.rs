use chrono::NaiveDateTime;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ReviewAssignment {
    pub review_id: i64,
    pub submission_id: i64,
    pub recommendation: Option<i64>,
    pub date_completed: NaiveDateTime,
}

/// One locale variant of a setting value (titles, journal names).
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct LocalizedValue {
    pub value: String,
    pub locale: String,
}

/// Given/family name settings paired on a shared locale.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PersonName {
    pub given_name: String,
    pub family_name: String,
    pub locale: String,
}

impl PersonName {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// A review form element setting joined to the reviewer's response for that element.
#[derive(Debug, Clone, FromRow)]
pub struct FormResponseRow {
    pub element_id: i64,
    pub setting_name: String,
    pub setting_value: Option<String>,
    pub setting_type: Option<String>,
    pub response_type: Option<String>,
    pub response_value: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub viewable: Option<i64>,
    pub comments: Option<String>,
}
