use std::collections::HashMap;

use crate::ExportError;

/// Meals label used when a rendered line carries no `" - "` separator.
pub const UNSPECIFIED: &str = "Unspecified";

/// One rendered shopping-list line, `"item - meal1, meal2"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportLine {
    pub item: String,
    pub meals: String,
}

impl ExportLine {
    /// Splits on the first `" - "`, so item names may not contain it but
    /// meal labels may.
    pub fn parse(line: &str) -> Self {
        match line.split_once(" - ") {
            Some((item, meals)) => Self {
                item: item.to_owned(),
                meals: meals.to_owned(),
            },
            None => Self {
                item: line.to_owned(),
                meals: UNSPECIFIED.to_owned(),
            },
        }
    }
}

/// A row of the downloadable export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub item: String,
    pub quantity: usize,
    pub meals: String,
}

/// Folds repeated item names into a single row.
///
/// Rows keep the order in which each item was first seen. Every repeat bumps
/// the quantity and appends its meals with `", "`. Blank lines are ignored.
pub fn aggregate<I, S>(lines: I) -> Vec<ExportRow>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rows: Vec<ExportRow> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let ExportLine { item, meals } = ExportLine::parse(line);

        match positions.get(&item) {
            Some(&pos) => {
                let row = &mut rows[pos];
                row.quantity += 1;
                row.meals = format!("{}, {meals}", row.meals);
            }
            None => {
                positions.insert(item.clone(), rows.len());
                rows.push(ExportRow {
                    item,
                    quantity: 1,
                    meals,
                });
            }
        }
    }

    rows
}

/// `Item,Quantity,Meals` CSV document for `rows`.
pub fn export_csv(rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Item", "Quantity", "Meals"])?;

    for row in rows {
        let quantity = row.quantity.to_string();
        writer.write_record([row.item.as_str(), quantity.as_str(), row.meals.as_str()])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
