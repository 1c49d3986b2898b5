use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString, VariantArray};

/// One of the seven fixed columns of the weekly planner.
///
/// The lowercase key (`mon`, `tue`, ...) is what travels in paths and form
/// field names; the capitalised label (`Mon`, `Tue`, ...) prefixes session
/// records and shopping-list sources.
#[derive(
    EnumString,
    VariantArray,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub fn all() -> &'static [Day] {
        Day::VARIANTS
    }

    pub fn key(&self) -> &'static str {
        match self {
            Day::Mon => "mon",
            Day::Tue => "tue",
            Day::Wed => "wed",
            Day::Thu => "thu",
            Day::Fri => "fri",
            Day::Sat => "sat",
            Day::Sun => "sun",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Day::Mon => "Monday",
            Day::Tue => "Tuesday",
            Day::Wed => "Wednesday",
            Day::Thu => "Thursday",
            Day::Fri => "Friday",
            Day::Sat => "Saturday",
            Day::Sun => "Sunday",
        }
    }

    /// Form field holding the meal title of this day card.
    pub fn dinner_field(&self) -> String {
        format!("{}_dinner", self.key())
    }

    /// Form field holding the newline separated ingredients of this day card.
    pub fn ingredients_field(&self) -> String {
        format!("{}_ingredients", self.key())
    }

    pub fn card_id(&self) -> String {
        format!("{}_card", self.key())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
