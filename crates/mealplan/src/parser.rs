//! Best-effort decoding of generated text.
//!
//! Models asked for JSON still wrap it in prose, truncate it or pick their own
//! shape. Each parser first tries a strict decode, then a recovery pass, and
//! finally hands back a well-defined fallback instead of an error.

use std::{collections::HashSet, sync::LazyLock};

use mealweek_shared::{Meal, ShoppingListEntry};
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::{DEFAULT_INGREDIENTS, MAX_INGREDIENT_SUGGESTIONS};

/// Title substituted when the generated text holds no usable meal.
pub const INVALID_MEAL_TITLE: &str = "Invalid response format";

/// Item substituted when the shopping list cannot be generated.
pub const SHOPPING_LIST_ERROR_ITEM: &str = "Error generating shopping list";

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("quoted string pattern is valid"));

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Malformed(String),

    #[error("unexpected JSON structure: {0}")]
    Structure(String),

    #[error("no valid ingredients found")]
    Empty,
}

/// Decodes `raw` as JSON, falling back to the text between the first `{` and
/// the last `}`.
pub fn decode_embedded_object(raw: &str) -> Result<Value, ParseError> {
    let err = match serde_json::from_str::<Value>(raw.trim()) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => serde_json::from_str(&raw[start..=end])
            .map_err(|e| ParseError::Malformed(e.to_string())),
        _ => Err(ParseError::Malformed(err.to_string())),
    }
}

/// Extracts a `{title, ingredients}` object from generated text.
pub fn try_meal(raw: &str) -> Result<Meal, ParseError> {
    let value = decode_embedded_object(raw)?;

    let Value::Object(map) = &value else {
        return Err(ParseError::Structure(format!("expected an object, got {value}")));
    };

    match (map.get("title"), map.get("ingredients")) {
        (Some(title), Some(ingredients)) => Ok(Meal {
            title: text_of(title),
            ingredients: lines_of(ingredients),
        }),
        _ => Err(ParseError::Structure(format!(
            "missing `title` or `ingredients` in {value}"
        ))),
    }
}

/// Like [`try_meal`] but never fails: unusable text yields the
/// [`INVALID_MEAL_TITLE`] sentinel carrying the caller's own ingredients.
pub fn parse_meal(raw: &str, ingredients: &str) -> Meal {
    match try_meal(raw) {
        Ok(meal) => meal,
        Err(err) => {
            tracing::error!(err = %err, raw, "invalid meal response format");
            Meal::new(INVALID_MEAL_TITLE, ingredients)
        }
    }
}

/// Extracts up to ten unique ingredient names from generated text.
///
/// Accepts `{"ingredients": [...]}` or a bare array. Text that is not JSON at
/// all is scanned for double-quoted strings instead. Duplicates are removed
/// case-sensitively, keeping the first occurrence.
pub fn try_ingredients(raw: &str) -> Result<Vec<String>, ParseError> {
    let entries: Vec<String> = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(mut map)) => match map.remove("ingredients") {
            Some(Value::Array(items)) => items.iter().filter_map(entry_of).collect(),
            Some(other) => {
                return Err(ParseError::Structure(format!(
                    "`ingredients` is not a list: {other}"
                )));
            }
            None => return Err(ParseError::Structure("missing `ingredients` key".to_owned())),
        },
        Ok(Value::Array(items)) => items.iter().filter_map(entry_of).collect(),
        Ok(other) => return Err(ParseError::Structure(other.to_string())),
        Err(_) => QUOTED
            .captures_iter(raw)
            .map(|caps| caps[1].trim().to_owned())
            .collect(),
    };

    let mut seen = HashSet::new();
    let unique: Vec<String> = entries
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .filter(|entry| seen.insert(entry.clone()))
        .take(MAX_INGREDIENT_SUGGESTIONS)
        .collect();

    if unique.is_empty() {
        return Err(ParseError::Empty);
    }

    Ok(unique)
}

pub fn default_ingredients() -> Vec<String> {
    DEFAULT_INGREDIENTS.iter().map(|s| s.to_string()).collect()
}

/// Like [`try_ingredients`] but falls back to [`DEFAULT_INGREDIENTS`].
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    match try_ingredients(raw) {
        Ok(ingredients) => ingredients,
        Err(err) => {
            tracing::error!(err = %err, raw, "failed to parse ingredient suggestions");
            default_ingredients()
        }
    }
}

/// Decodes `{"shopping_list": [{"item": ..., "meals": [...]}, ...]}`.
///
/// The model's ordering is kept exactly as returned.
pub fn try_shopping_list(raw: &str) -> Result<Vec<ShoppingListEntry>, ParseError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ParseError::Malformed(e.to_string()))?;

    let Value::Object(mut map) = value else {
        return Err(ParseError::Structure("expected an object".to_owned()));
    };

    let Some(list @ Value::Array(_)) = map.remove("shopping_list") else {
        return Err(ParseError::Structure(
            "missing `shopping_list` array".to_owned(),
        ));
    };

    serde_json::from_value(list).map_err(|e| ParseError::Structure(e.to_string()))
}

/// Single entry list explaining why no shopping list could be produced.
pub fn shopping_list_sentinel(reason: impl ToString) -> Vec<ShoppingListEntry> {
    vec![ShoppingListEntry::new(
        SHOPPING_LIST_ERROR_ITEM,
        vec![reason.to_string()],
    )]
}

/// Like [`try_shopping_list`] but yields [`shopping_list_sentinel`] on failure.
pub fn parse_shopping_list(raw: &str) -> Vec<ShoppingListEntry> {
    match try_shopping_list(raw) {
        Ok(list) => list,
        Err(err) => {
            tracing::error!(err = %err, raw, "failed to parse shopping list");
            shopping_list_sentinel(err)
        }
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_owned(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lines_of(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(text_of)
            .collect::<Vec<_>>()
            .join("\n"),
        other => text_of(other),
    }
}

/// Falsy entries (null, false, zero, empty string, list or object) are
/// dropped. Booleans read as `True`, other scalars keep their JSON text.
fn entry_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null | Value::Bool(false) => return None,
        Value::Bool(true) => "True".to_owned(),
        Value::Number(n) if n.as_f64() == Some(0.0) => return None,
        Value::String(s) => s.trim().to_owned(),
        Value::Array(items) if items.is_empty() => return None,
        Value::Object(map) if map.is_empty() => return None,
        other => other.to_string(),
    };

    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_well_formed() {
        let meal = try_meal(r#"{"title": "Lentil Stew", "ingredients": "lentils\nonions"}"#)
            .unwrap();

        assert_eq!(meal, Meal::new("Lentil Stew", "lentils\nonions"));
    }

    #[test]
    fn test_meal_embedded_in_prose() {
        let raw = "Sure! Here it is:\n{\"title\": \"Tomato Dal\", \"ingredients\": \"lentils\\ntomatoes\"}\nEnjoy.";

        let meal = try_meal(raw).unwrap();

        assert_eq!(meal.title, "Tomato Dal");
        assert_eq!(meal.ingredients, "lentils\ntomatoes");
    }

    #[test]
    fn test_meal_missing_keys_yields_sentinel() {
        let meal = parse_meal(r#"{"name": "Stew"}"#, "beef\ncarrots");

        assert_eq!(meal.title, INVALID_MEAL_TITLE);
        assert_eq!(meal.ingredients, "beef\ncarrots");
    }

    #[test]
    fn test_meal_not_json_yields_sentinel() {
        let meal = parse_meal("I would cook a nice stew.", "beef");

        assert_eq!(meal, Meal::new(INVALID_MEAL_TITLE, "beef"));
    }

    #[test]
    fn test_meal_array_is_not_a_meal() {
        let meal = parse_meal(r#"[{"title": "a", "ingredients": "b"}]"#, "rice");

        assert_eq!(meal.title, INVALID_MEAL_TITLE);
    }

    #[test]
    fn test_meal_ingredient_list_is_joined() {
        let meal =
            try_meal(r#"{"title": "Salad", "ingredients": ["lettuce", "tomato"]}"#).unwrap();

        assert_eq!(meal.ingredients, "lettuce\ntomato");
    }

    #[test]
    fn test_ingredients_object() {
        let list = try_ingredients(r#"{"ingredients": ["Tofu", " Salmon ", "Tofu", ""]}"#)
            .unwrap();

        assert_eq!(list, ["Tofu", "Salmon"]);
    }

    #[test]
    fn test_ingredients_bare_array_is_truncated() {
        let raw = serde_json::to_string(
            &(1..=14).map(|i| format!("Item {i}")).collect::<Vec<_>>(),
        )
        .unwrap();

        let list = try_ingredients(&raw).unwrap();

        assert_eq!(list.len(), MAX_INGREDIENT_SUGGESTIONS);
        assert_eq!(list[0], "Item 1");
        assert_eq!(list[9], "Item 10");
    }

    #[test]
    fn test_ingredients_dedup_is_case_sensitive() {
        let list = try_ingredients(r#"["Rice", "rice", "Rice", null, false, 3]"#).unwrap();

        assert_eq!(list, ["Rice", "rice", "3"]);
    }

    #[test]
    fn test_ingredients_drop_falsy_entries() {
        let raw = r#"{"ingredients": [0, 0.0, "", "  ", [], {}, true, 2.5, " Leek "]}"#;

        let list = try_ingredients(raw).unwrap();

        assert_eq!(list, ["True", "2.5", "Leek"]);
    }

    #[test]
    fn test_ingredients_quoted_fallback() {
        let raw = r#"Here you go: "Beef", "Chickpeas", "Beef" and "Kale"..."#;

        assert_eq!(try_ingredients(raw).unwrap(), ["Beef", "Chickpeas", "Kale"]);
    }

    #[test]
    fn test_ingredients_default_on_unexpected_shape() {
        assert_eq!(
            try_ingredients(r#"{"items": ["Beef"]}"#),
            Err(ParseError::Structure("missing `ingredients` key".to_owned()))
        );
        assert_eq!(parse_ingredients(r#"{"items": ["Beef"]}"#), default_ingredients());
    }

    #[test]
    fn test_ingredients_default_when_nothing_extracted() {
        assert_eq!(try_ingredients("no quotes at all"), Err(ParseError::Empty));

        let list = parse_ingredients("no quotes at all");
        assert_eq!(list.len(), 10);
        assert_eq!(list[0], "Chicken breast");
        assert_eq!(list[9], "Avocado");
    }

    #[test]
    fn test_shopping_list_passes_order_through() {
        let raw = r#"{"shopping_list": [
            {"item": "Salt", "meals": ["General ingredient"]},
            {"item": "Beef", "meals": ["Mon: Stew"]}
        ]}"#;

        let list = try_shopping_list(raw).unwrap();

        assert_eq!(list[0].item, "Salt");
        assert_eq!(list[1].item, "Beef");
        assert_eq!(list[1].meals, ["Mon: Stew"]);
    }

    #[test]
    fn test_shopping_list_deviation_is_failure() {
        assert!(matches!(
            try_shopping_list(r#"{"items": []}"#),
            Err(ParseError::Structure(_))
        ));
        assert!(matches!(
            try_shopping_list(r#"{"shopping_list": {"item": "Beef"}}"#),
            Err(ParseError::Structure(_))
        ));
        assert!(matches!(
            try_shopping_list(r#"{"shopping_list": [{"item": "Beef"}]}"#),
            Err(ParseError::Structure(_))
        ));
        assert!(matches!(
            try_shopping_list("Beef, Salt"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_shopping_list_sentinel_carries_reason() {
        let list = parse_shopping_list(r#"{"items": []}"#);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].item, SHOPPING_LIST_ERROR_ITEM);
        assert_eq!(
            list[0].meals,
            ["unexpected JSON structure: missing `shopping_list` array"]
        );
    }

    #[test]
    fn test_shopping_list_empty_array_is_valid() {
        assert!(try_shopping_list(r#"{"shopping_list": []}"#).unwrap().is_empty());
    }
}
