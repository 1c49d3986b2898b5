use std::path::{Path, PathBuf};

use mealweek_shared::ShoppingListEntry;
use time::{OffsetDateTime, format_description};

use crate::ExportError;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "[year][month][day]_[hour][minute][second]";

/// How exported shopping lists are named: `<prefix>_<timestamp>.csv`.
#[derive(Debug, Clone)]
pub struct ExportNaming {
    pub prefix: String,
    /// A `time` format description, e.g. `[year][month][day]_[hour][minute][second]`.
    pub timestamp_format: String,
}

impl Default for ExportNaming {
    fn default() -> Self {
        Self {
            prefix: "shopping_list".to_owned(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_owned(),
        }
    }
}

impl ExportNaming {
    pub fn validate(&self) -> Result<(), ExportError> {
        self.timestamp(OffsetDateTime::UNIX_EPOCH).map(|_| ())
    }

    pub fn timestamp(&self, at: OffsetDateTime) -> Result<String, ExportError> {
        format_timestamp(&self.timestamp_format, at)
    }

    pub fn filename(&self, at: OffsetDateTime) -> Result<String, ExportError> {
        timestamped_filename(&self.prefix, &self.timestamp_format, at)
    }
}

fn format_timestamp(format: &str, at: OffsetDateTime) -> Result<String, ExportError> {
    let invalid = |reason: String| ExportError::TimestampFormat {
        format: format.to_owned(),
        reason,
    };

    let items = format_description::parse(format).map_err(|e| invalid(e.to_string()))?;

    at.format(&items).map_err(|e| invalid(e.to_string()))
}

/// `<prefix>_<timestamp>.csv`
pub fn timestamped_filename(
    prefix: &str,
    format: &str,
    at: OffsetDateTime,
) -> Result<String, ExportError> {
    Ok(format!("{prefix}_{}.csv", format_timestamp(format, at)?))
}

/// Local wall-clock time, UTC when the local offset cannot be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Writes `entries` as an `Item,Meals` CSV file named `filename` in `dir`.
pub fn save_csv(
    dir: &Path,
    filename: &str,
    entries: &[ShoppingListEntry],
) -> Result<PathBuf, ExportError> {
    let path = dir.join(filename);
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["Item", "Meals"])?;

    for entry in entries {
        let meals = entry.meals_label();
        writer.write_record([entry.item.as_str(), meals.as_str()])?;
    }

    writer.flush()?;
    tracing::info!(path = %path.display(), items = entries.len(), "shopping list saved");

    Ok(path)
}
