mod models;

#[cfg(test)]
pub mod fixture;

pub use models::*;

use chrono::NaiveDate;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;

use crate::config::DatabaseConfig;
use crate::error::Result;

/// `assoc_type` of submission files attached to a review assignment.
pub const ASSOC_TYPE_REVIEW_ASSIGNMENT: i64 = 517;

/// Which completed reviews a run exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    /// Completed on any day between the two dates, inclusive.
    Between(NaiveDate, NaiveDate),
    /// Completed within the last 24 hours.
    LastDay,
}

/// Query surface the review assembler reads from.
///
/// Each method returns every candidate row; choosing between locale
/// variants and rejecting empty results is left to the caller.
pub trait ReviewStore {
    async fn completed_reviews(&self, range: DateRange) -> Result<Vec<ReviewAssignment>>;

    async fn current_publication_id(&self, submission_id: i64) -> Result<Option<i64>>;

    async fn publication_titles(&self, publication_id: i64) -> Result<Vec<LocalizedValue>>;

    async fn journal_titles(&self, submission_id: i64) -> Result<Vec<LocalizedValue>>;

    async fn author_ids(&self, publication_id: i64) -> Result<Vec<i64>>;

    async fn author_names(&self, author_id: i64) -> Result<Vec<PersonName>>;

    async fn reviewer_names(&self, review_id: i64) -> Result<Vec<PersonName>>;

    async fn form_responses(&self, review_id: i64, locale: &str) -> Result<Vec<FormResponseRow>>;

    async fn comments(&self, review_id: i64) -> Result<Vec<CommentRow>>;

    async fn attachment_paths(&self, review_id: i64) -> Result<Vec<String>>;
}

/// Opens the single connection a run holds for its whole duration.
pub async fn create_pool(database: &DatabaseConfig) -> Result<MySqlPool> {
    let options = match database {
        DatabaseConfig::Url(url) => url.parse::<MySqlConnectOptions>()?,
        DatabaseConfig::Parts {
            host,
            port,
            socket,
            user,
            password,
            name,
        } => {
            let mut options = MySqlConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .database(name);
            if let Some(password) = password {
                options = options.password(password);
            }
            if let Some(socket) = socket {
                options = options.socket(socket);
            }
            options
        }
    };

    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

const NAME_COLUMNS: &str = r#"
    COALESCE(given.setting_value, '') AS given_name,
    COALESCE(family.setting_value, '') AS family_name,
    given.locale AS locale
"#;

impl ReviewStore for MySqlStore {
    async fn completed_reviews(&self, range: DateRange) -> Result<Vec<ReviewAssignment>> {
        const COLUMNS: &str = r#"
            SELECT review_id, submission_id, recommendation, date_completed
            FROM review_assignments
        "#;

        let rows = match range {
            DateRange::Between(from, to) => {
                sqlx::query_as::<_, ReviewAssignment>(&format!(
                    "{COLUMNS} WHERE DATE(date_completed) BETWEEN ? AND ? ORDER BY review_id"
                ))
                .bind(from)
                .bind(to)
                .fetch_all(&self.pool)
                .await?
            }
            DateRange::LastDay => {
                sqlx::query_as::<_, ReviewAssignment>(&format!(
                    "{COLUMNS} WHERE DATE(date_completed) > NOW() - INTERVAL 1 DAY ORDER BY review_id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    async fn current_publication_id(&self, submission_id: i64) -> Result<Option<i64>> {
        let id = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT current_publication_id FROM submissions WHERE submission_id = ?",
        )
        .bind(submission_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id.flatten())
    }

    async fn publication_titles(&self, publication_id: i64) -> Result<Vec<LocalizedValue>> {
        let rows = sqlx::query_as::<_, LocalizedValue>(
            r#"
            SELECT setting_value AS value, locale
            FROM publication_settings
            WHERE publication_id = ?
            AND setting_name = 'title'
            AND setting_value <> ''
            "#,
        )
        .bind(publication_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn journal_titles(&self, submission_id: i64) -> Result<Vec<LocalizedValue>> {
        let rows = sqlx::query_as::<_, LocalizedValue>(
            r#"
            SELECT js.setting_value AS value, js.locale AS locale
            FROM journal_settings js
            INNER JOIN submissions sub
            ON sub.context_id = js.journal_id
            WHERE sub.submission_id = ?
            AND js.setting_name = 'name'
            AND js.setting_value <> ''
            "#,
        )
        .bind(submission_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn author_ids(&self, publication_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT author_id FROM authors WHERE publication_id = ? ORDER BY seq, author_id",
        )
        .bind(publication_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn author_names(&self, author_id: i64) -> Result<Vec<PersonName>> {
        let rows = sqlx::query_as::<_, PersonName>(&format!(
            r#"
            SELECT {NAME_COLUMNS}
            FROM author_settings given
            INNER JOIN author_settings family
            ON given.author_id = family.author_id
            AND given.locale = family.locale
            WHERE given.setting_name = 'givenName'
            AND family.setting_name = 'familyName'
            AND given.author_id = ?
            "#
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn reviewer_names(&self, review_id: i64) -> Result<Vec<PersonName>> {
        let rows = sqlx::query_as::<_, PersonName>(&format!(
            r#"
            SELECT {NAME_COLUMNS}
            FROM user_settings given
            INNER JOIN user_settings family
            ON given.user_id = family.user_id
            AND given.locale = family.locale
            WHERE given.setting_name = 'givenName'
            AND family.setting_name = 'familyName'
            AND given.user_id =
                (SELECT reviewer_id FROM review_assignments WHERE review_id = ?)
            "#
        ))
        .bind(review_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn form_responses(&self, review_id: i64, locale: &str) -> Result<Vec<FormResponseRow>> {
        let rows = sqlx::query_as::<_, FormResponseRow>(
            r#"
            SELECT
                sets.review_form_element_id AS element_id,
                sets.setting_name,
                sets.setting_value,
                sets.setting_type,
                res.response_type,
                res.response_value
            FROM review_form_element_settings sets
            INNER JOIN review_form_responses res
            ON sets.review_form_element_id = res.review_form_element_id
            INNER JOIN review_form_elements el
            ON el.review_form_element_id = sets.review_form_element_id
            WHERE res.review_id = ? AND sets.locale = ?
            ORDER BY el.seq, sets.review_form_element_id
            "#,
        )
        .bind(review_id)
        .bind(locale)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn comments(&self, review_id: i64) -> Result<Vec<CommentRow>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT viewable, comments
            FROM submission_comments
            WHERE assoc_id = ?
            ORDER BY comment_id
            "#,
        )
        .bind(review_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn attachment_paths(&self, review_id: i64) -> Result<Vec<String>> {
        let paths = sqlx::query_scalar::<_, String>(
            r#"
            SELECT f.path
            FROM files f
            INNER JOIN submission_files sf
            ON sf.file_id = f.file_id
            WHERE sf.assoc_type = ? AND sf.assoc_id = ?
            ORDER BY sf.file_id
            "#,
        )
        .bind(ASSOC_TYPE_REVIEW_ASSIGNMENT)
        .bind(review_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(paths)
    }
}
