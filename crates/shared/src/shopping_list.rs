use serde::{Deserialize, Serialize};

/// One consolidated item of the weekly shopping list and the meals it feeds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ShoppingListEntry {
    pub item: String,
    pub meals: Vec<String>,
}

impl ShoppingListEntry {
    pub fn new(item: impl Into<String>, meals: Vec<String>) -> Self {
        Self {
            item: item.into(),
            meals,
        }
    }

    pub fn meals_label(&self) -> String {
        self.meals.join(", ")
    }

    /// Text of the rendered list item, `"item - meal1, meal2"`.
    pub fn line(&self) -> String {
        format!("{} - {}", self.item, self.meals_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_joins_meals() {
        let entry = ShoppingListEntry::new(
            "Garlic",
            vec!["Monday: Stew".to_owned(), "Tuesday: Soup".to_owned()],
        );

        assert_eq!(entry.line(), "Garlic - Monday: Stew, Tuesday: Soup");
    }

    #[test]
    fn test_deserialize_from_model_shape() {
        let entry: ShoppingListEntry =
            serde_json::from_str(r#"{"item": "Salt", "meals": ["General ingredient"]}"#).unwrap();

        assert_eq!(entry.item, "Salt");
        assert_eq!(entry.meals_label(), "General ingredient");
    }
}
