use tracing::info;

use crate::db::{DateRange, ReviewStore};
use crate::error::Result;
use crate::review::{assemble_review, display_date};
use crate::state::AppState;
use crate::storage;
use crate::templates::Template;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub reviews: usize,
    pub attachments: usize,
}

/// Exports every review completed within `range`.
///
/// Runs in three passes: assemble all records, write all reports, copy all
/// attachments. The first failure aborts the run.
pub async fn run<S: ReviewStore>(state: &AppState<S>, range: DateRange) -> Result<ExportSummary> {
    let config = &state.config;

    let assignments = state.store.completed_reviews(range).await?;
    info!("Found {} completed reviews", assignments.len());
    if assignments.is_empty() {
        return Ok(ExportSummary::default());
    }

    let template = Template::load(&config.template_path)?;
    let date_generated = display_date(chrono::Local::now().date_naive());

    let mut reviews = Vec::with_capacity(assignments.len());
    for assignment in &assignments {
        let record = assemble_review(&state.store, &config.locale, assignment, &date_generated).await?;
        reviews.push(record);
    }

    for record in &reviews {
        storage::write_report(&template, record, &config.output_dir)?;
    }

    let mut attachments = 0;
    for record in &reviews {
        attachments += storage::copy_attachments(record, &config.files_dir, &config.output_dir)?.len();
    }

    Ok(ExportSummary {
        reviews: reviews.len(),
        attachments,
    })
}
