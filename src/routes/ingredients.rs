use axum::{extract::State, response::IntoResponse};

use crate::routes::AppState;
use crate::template::Template;

#[derive(askama::Template)]
#[template(path = "partials/ingredients.html")]
pub struct IngredientsTemplate {
    pub ingredients: Vec<String>,
}

/// Renders draggable primary ingredient chips.
pub async fn action(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let ingredients = app.mealplan.suggest_ingredients().await;

    template.render(IngredientsTemplate { ingredients })
}
