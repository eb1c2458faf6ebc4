use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::db::DateRange;

#[derive(Parser, Debug)]
#[command(name = "ojs-review-export")]
#[command(version, about = "Export completed OJS peer reviews as standalone HTML reports")]
pub struct Cli {
    /// Directory the reports and attachments are written to (must exist)
    #[arg(short = 'p', value_name = "OUTPUT_PATH")]
    pub path: Option<PathBuf>,

    /// Export reviews completed on or after this date (YYYY-MM-DD)
    #[arg(short = 'f', value_name = "DATE_FROM")]
    pub from: Option<NaiveDate>,

    /// Export reviews completed on or before this date (YYYY-MM-DD)
    #[arg(short = 't', value_name = "DATE_TO")]
    pub to: Option<NaiveDate>,
}

impl Cli {
    /// Both ends are needed for an explicit range; otherwise the last day is exported.
    pub fn date_range(&self) -> DateRange {
        match (self.from, self.to) {
            (Some(from), Some(to)) => DateRange::Between(from, to),
            _ => DateRange::LastDay,
        }
    }
}
