use std::sync::Arc;

use mealweek_generation::GenerationClient;
use mealweek_shared::{DayPlan, Meal, ShoppingListEntry};

use crate::{Session, parser, prompt};

/// Runs the three generation pipelines and turns every failure into a value
/// the page can render.
#[derive(Clone)]
pub struct MealPlanService {
    client: Arc<dyn GenerationClient>,
}

impl MealPlanService {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    /// Suggests a dinner for `ingredients`. On failure the title explains what
    /// went wrong and the ingredients are handed back untouched.
    pub async fn generate_meal(&self, ingredients: &str, other_meals: &str) -> Meal {
        tracing::info!(ingredients, other_meals, "generating meal");

        let prompt = prompt::meal(ingredients, other_meals);
        match self.client.generate(&prompt).await {
            Ok(raw) => parser::parse_meal(&raw, ingredients),
            Err(err) => {
                tracing::error!(err = %err, "meal generation failed");
                Meal::new(err.label(), ingredients)
            }
        }
    }

    /// Ten (or fewer) unique primary ingredients, the defaults on failure.
    pub async fn suggest_ingredients(&self) -> Vec<String> {
        tracing::info!("generating primary ingredients");

        let ingredients = match self.client.generate(&prompt::ingredient_suggestions()).await {
            Ok(raw) => parser::parse_ingredients(&raw),
            Err(err) => {
                tracing::error!(err = %err, "ingredient generation failed");
                parser::default_ingredients()
            }
        };

        tracing::info!(?ingredients, "parsed ingredients");

        ingredients
    }

    /// Consolidated list for the week. A blank block yields an empty list
    /// without calling the endpoint.
    pub async fn shopping_list(&self, meals_and_ingredients: &str) -> Vec<ShoppingListEntry> {
        if meals_and_ingredients.trim().is_empty() {
            tracing::warn!("no meals and ingredients provided for shopping list generation");
            return Vec::new();
        }

        tracing::info!(meals_and_ingredients, "generating shopping list");

        match self
            .client
            .generate(&prompt::shopping_list(meals_and_ingredients))
            .await
        {
            Ok(raw) => parser::parse_shopping_list(&raw),
            Err(err) => {
                tracing::error!(err = %err, "shopping list generation failed");
                parser::shopping_list_sentinel(err)
            }
        }
    }
}

/// Builds the shopping-list input from the submitted day cards.
///
/// Days without ingredients are skipped; the others are labelled with the
/// session's title for that day.
pub fn week_block(days: &[DayPlan], session: &Session) -> String {
    days.iter()
        .filter(|plan| plan.has_ingredients())
        .map(|plan| {
            format!(
                "{}\nIngredients: {}",
                session.lookup_title(plan.day),
                plan.ingredients_text.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
