//! In-memory `ReviewStore` used by the unit tests.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::{
    CommentRow, DateRange, FormResponseRow, LocalizedValue, PersonName, ReviewAssignment,
    ReviewStore,
};
use crate::error::Result;

#[derive(Default)]
pub struct FixtureStore {
    pub assignments: Vec<ReviewAssignment>,
    pub publications: HashMap<i64, i64>,
    pub titles: HashMap<i64, Vec<LocalizedValue>>,
    pub journals: HashMap<i64, Vec<LocalizedValue>>,
    pub authors: HashMap<i64, Vec<i64>>,
    pub author_names: HashMap<i64, Vec<PersonName>>,
    pub reviewers: HashMap<i64, Vec<PersonName>>,
    pub form_rows: HashMap<(i64, String), Vec<FormResponseRow>>,
    pub comments: HashMap<i64, Vec<CommentRow>>,
    pub attachments: HashMap<i64, Vec<String>>,
}

pub fn localized(value: &str, locale: &str) -> LocalizedValue {
    LocalizedValue {
        value: value.to_string(),
        locale: locale.to_string(),
    }
}

pub fn name(given: &str, family: &str, locale: &str) -> PersonName {
    PersonName {
        given_name: given.to_string(),
        family_name: family.to_string(),
        locale: locale.to_string(),
    }
}

pub fn assignment(review_id: i64, submission_id: i64, recommendation: Option<i64>) -> ReviewAssignment {
    ReviewAssignment {
        review_id,
        submission_id,
        recommendation,
        date_completed: NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(14, 30, 0))
            .expect("valid fixture date"),
    }
}

impl FixtureStore {
    /// A store holding one fully populated review: id 42 on submission 7, publication 70.
    pub fn single_review() -> Self {
        let mut store = Self::default();
        store.assignments.push(assignment(42, 7, Some(1)));
        store.publications.insert(7, 70);
        store.titles.insert(
            70,
            vec![localized("Sur les graphes", "fr_FR"), localized("On Graphs", "en")],
        );
        store.journals.insert(7, vec![localized("Journal of Examples", "en")]);
        store.authors.insert(70, vec![701, 702]);
        store.author_names.insert(701, vec![name("Ada", "Lovelace", "en")]);
        store.author_names.insert(702, vec![name("Alan", "Turing", "en")]);
        store.reviewers.insert(42, vec![name("Jane", "Doe", "en")]);
        store.comments.insert(
            42,
            vec![CommentRow {
                viewable: Some(1),
                comments: Some("Solid work.\nMinor typos.".to_string()),
            }],
        );
        store
            .attachments
            .insert(42, vec!["journals/1/articles/7/manuscript.pdf".to_string()]);
        store
    }
}

impl ReviewStore for FixtureStore {
    async fn completed_reviews(&self, _range: DateRange) -> Result<Vec<ReviewAssignment>> {
        Ok(self.assignments.clone())
    }

    async fn current_publication_id(&self, submission_id: i64) -> Result<Option<i64>> {
        Ok(self.publications.get(&submission_id).copied())
    }

    async fn publication_titles(&self, publication_id: i64) -> Result<Vec<LocalizedValue>> {
        Ok(self.titles.get(&publication_id).cloned().unwrap_or_default())
    }

    async fn journal_titles(&self, submission_id: i64) -> Result<Vec<LocalizedValue>> {
        Ok(self.journals.get(&submission_id).cloned().unwrap_or_default())
    }

    async fn author_ids(&self, publication_id: i64) -> Result<Vec<i64>> {
        Ok(self.authors.get(&publication_id).cloned().unwrap_or_default())
    }

    async fn author_names(&self, author_id: i64) -> Result<Vec<PersonName>> {
        Ok(self.author_names.get(&author_id).cloned().unwrap_or_default())
    }

    async fn reviewer_names(&self, review_id: i64) -> Result<Vec<PersonName>> {
        Ok(self.reviewers.get(&review_id).cloned().unwrap_or_default())
    }

    async fn form_responses(&self, review_id: i64, locale: &str) -> Result<Vec<FormResponseRow>> {
        Ok(self
            .form_rows
            .get(&(review_id, locale.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn comments(&self, review_id: i64) -> Result<Vec<CommentRow>> {
        Ok(self.comments.get(&review_id).cloned().unwrap_or_default())
    }

    async fn attachment_paths(&self, review_id: i64) -> Result<Vec<String>> {
        Ok(self.attachments.get(&review_id).cloned().unwrap_or_default())
    }
}
