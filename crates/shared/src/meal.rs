use serde::{Deserialize, Serialize};

use crate::Day;

/// A dinner suggestion as rendered in a day card.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Meal {
    pub title: String,
    /// Newline separated ingredient list.
    pub ingredients: String,
}

impl Meal {
    pub fn new(title: impl Into<String>, ingredients: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ingredients: ingredients.into(),
        }
    }
}

/// What the browser submits for a single day card.
#[derive(Clone, Debug, PartialEq)]
pub struct DayPlan {
    pub day: Day,
    pub dinner_title: String,
    pub ingredients_text: String,
}

impl DayPlan {
    pub fn has_ingredients(&self) -> bool {
        !self.ingredients_text.trim().is_empty()
    }
}
