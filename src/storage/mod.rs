use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ExportError, Result};
use crate::review::ReviewRecord;
use crate::templates::Template;

pub fn report_file_name(review_id: i64) -> String {
    format!("Review_{}.html", review_id)
}

/// Copies are prefixed with the review id so attachments of different reviews cannot collide.
pub fn attachment_file_name(review_id: i64, stored_path: &str) -> String {
    let basename = Path::new(stored_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| stored_path.to_string());
    format!("Review_{}_{}", review_id, basename)
}

/// Writes `Review_<id>.html` into `output_dir`, which must already exist.
pub fn write_report(template: &Template, record: &ReviewRecord, output_dir: &Path) -> Result<PathBuf> {
    let html = template.render(record)?;
    let path = output_dir.join(report_file_name(record.review_id));

    std::fs::write(&path, html).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    info!("Wrote {}", path.display());
    Ok(path)
}

/// Copies every attachment of `record` from `files_dir` into `output_dir`.
pub fn copy_attachments(record: &ReviewRecord, files_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::with_capacity(record.files.len());

    for stored_path in &record.files {
        // Stored paths are relative to the files root even when written with a leading slash.
        let from = files_dir.join(stored_path.trim_start_matches('/'));
        let to = output_dir.join(attachment_file_name(record.review_id, stored_path));

        std::fs::copy(&from, &to).map_err(|source| ExportError::Copy {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;

        copied.push(to);
    }

    Ok(copied)
}
