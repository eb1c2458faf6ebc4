use tracing::{debug, info, warn};

use super::{aggregate_fields, display_date, select_preferred, Field, Recommendation, ReviewRecord};
use crate::db::{ReviewAssignment, ReviewStore};
use crate::error::{ExportError, Result};

fn missing(review_id: i64, what: &'static str) -> ExportError {
    ExportError::MissingData { review_id, what }
}

/// Joins everything a report needs for one completed review.
///
/// Every lookup must find at least one row; an incomplete review fails the
/// whole run rather than producing a partial report.
pub async fn assemble_review<S: ReviewStore>(
    store: &S,
    locale: &str,
    assignment: &ReviewAssignment,
    date_generated: &str,
) -> Result<ReviewRecord> {
    let review_id = assignment.review_id;
    let submission_id = assignment.submission_id;

    let recommendation = match assignment.recommendation {
        None => Recommendation::None,
        Some(code) => Recommendation::from_code(code)
            .ok_or_else(|| ExportError::UnknownRecommendation { review_id, code })?,
    };

    // Submission and publication ids differ; only the current publication is exported.
    let publication_id = store
        .current_publication_id(submission_id)
        .await?
        .ok_or_else(|| missing(review_id, "current publication"))?;

    let titles = store.publication_titles(publication_id).await?;
    let article_title = select_preferred(&titles, locale)
        .ok_or_else(|| missing(review_id, "article title"))?
        .value
        .clone();

    let journal_titles = store.journal_titles(submission_id).await?;
    let journal_title = select_preferred(&journal_titles, locale)
        .ok_or_else(|| missing(review_id, "journal title"))?
        .value
        .clone();

    let author_ids = store.author_ids(publication_id).await?;
    let mut authors = Vec::with_capacity(author_ids.len());
    for author_id in author_ids {
        let names = store.author_names(author_id).await?;
        let name = select_preferred(&names, locale).ok_or_else(|| missing(review_id, "author name"))?;
        authors.push(name.full_name());
    }

    let reviewer_names = store.reviewer_names(review_id).await?;
    let reviewer_name = select_preferred(&reviewer_names, locale)
        .ok_or_else(|| missing(review_id, "reviewer name"))?
        .full_name();

    let fields = response_fields(store, review_id, locale).await?;
    if fields.is_empty() {
        warn!("Review {} has no form responses or comments", review_id);
    }

    let files = store.attachment_paths(review_id).await?;
    debug!(
        "Review {}: {} authors, {} fields, {} attachments",
        review_id,
        authors.len(),
        fields.len(),
        files.len()
    );

    info!("Assembled review {} of submission {}", review_id, submission_id);

    Ok(ReviewRecord {
        review_id,
        submission_id,
        publication_id,
        date_completed: display_date(assignment.date_completed.date()),
        date_generated: date_generated.to_string(),
        recommendation,
        reviewer_name,
        article_title,
        journal_title,
        authors,
        fields,
        files,
    })
}

/// Structured form responses, or free-form comments when the review used no form.
async fn response_fields<S: ReviewStore>(store: &S, review_id: i64, locale: &str) -> Result<Vec<Field>> {
    let rows = store.form_responses(review_id, locale).await?;
    if !rows.is_empty() {
        return aggregate_fields(&rows);
    }

    let comments = store.comments(review_id).await?;
    Ok(comments
        .into_iter()
        .map(|c| Field::comment(c.viewable == Some(1), c.comments.unwrap_or_default()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixture::{assignment, name, FixtureStore};
    use crate::db::{CommentRow, FormResponseRow};
    use crate::review::{Response, NON_VIEWABLE_COMMENT_LABEL, VIEWABLE_COMMENT_LABEL};

    #[tokio::test]
    async fn test_assembles_complete_record() {
        let store = FixtureStore::single_review();

        let record = assemble_review(&store, "en", &store.assignments[0], "1/1/2024")
            .await
            .unwrap();

        assert_eq!(record.review_id, 42);
        assert_eq!(record.submission_id, 7);
        assert_eq!(record.publication_id, 70);
        assert_eq!(record.article_title, "On Graphs");
        assert_eq!(record.journal_title, "Journal of Examples");
        assert_eq!(record.authors, vec!["Ada Lovelace", "Alan Turing"]);
        assert_eq!(record.reviewer_name, "Jane Doe");
        assert_eq!(record.recommendation, Recommendation::Accept);
        assert_eq!(record.date_completed, "3/5/2024");
        assert_eq!(record.date_generated, "1/1/2024");
        assert_eq!(record.files, vec!["journals/1/articles/7/manuscript.pdf"]);
    }

    #[tokio::test]
    async fn test_title_falls_back_to_other_locale() {
        let store = FixtureStore::single_review();

        let record = assemble_review(&store, "de", &store.assignments[0], "")
            .await
            .unwrap();

        assert_eq!(record.article_title, "Sur les graphes");
    }

    #[tokio::test]
    async fn test_comments_used_without_form() {
        let mut store = FixtureStore::single_review();
        store.comments.insert(
            42,
            vec![
                CommentRow {
                    viewable: Some(1),
                    comments: Some("For everyone".to_string()),
                },
                CommentRow {
                    viewable: Some(0),
                    comments: Some("Editor only".to_string()),
                },
            ],
        );

        let record = assemble_review(&store, "en", &store.assignments[0], "")
            .await
            .unwrap();

        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.fields[0].question, VIEWABLE_COMMENT_LABEL);
        assert_eq!(record.fields[1].question, NON_VIEWABLE_COMMENT_LABEL);
        assert!(record.fields.iter().all(|f| f.id == 0 && f.description.is_empty()));
    }

    #[tokio::test]
    async fn test_form_responses_take_precedence_over_comments() {
        let mut store = FixtureStore::single_review();
        store.form_rows.insert(
            (42, "en".to_string()),
            vec![FormResponseRow {
                element_id: 11,
                setting_name: "question".to_string(),
                setting_value: Some("Is the method sound?".to_string()),
                setting_type: Some("string".to_string()),
                response_type: Some("string".to_string()),
                response_value: Some("Mostly".to_string()),
            }],
        );

        let record = assemble_review(&store, "en", &store.assignments[0], "")
            .await
            .unwrap();

        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.fields[0].id, 11);
        assert_eq!(record.fields[0].response, Response::Text("Mostly".to_string()));
    }

    #[tokio::test]
    async fn test_missing_reviewer_is_fatal() {
        let mut store = FixtureStore::single_review();
        store.reviewers.insert(42, vec![name("", "", "en")]);

        let err = assemble_review(&store, "en", &store.assignments[0], "")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExportError::MissingData { review_id: 42, what: "reviewer name" }
        ));
    }

    #[tokio::test]
    async fn test_missing_publication_is_fatal() {
        let store = FixtureStore::single_review();
        let orphan = assignment(43, 99, None);

        let err = assemble_review(&store, "en", &orphan, "").await.unwrap_err();

        assert!(matches!(err, ExportError::MissingData { what: "current publication", .. }));
    }

    #[tokio::test]
    async fn test_unknown_recommendation_code() {
        let store = FixtureStore::single_review();
        let odd = assignment(42, 7, Some(9));

        let err = assemble_review(&store, "en", &odd, "").await.unwrap_err();

        assert!(matches!(err, ExportError::UnknownRecommendation { code: 9, .. }));
    }
}
