use std::collections::HashMap;

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use mealweek_shared::Day;

use crate::routes::AppState;
use crate::session::SessionId;
use crate::template::{NotFoundTemplate, Template};

#[derive(askama::Template)]
#[template(path = "partials/day-card.html")]
pub struct DayCardTemplate {
    pub day: Day,
    pub title: String,
    pub ingredients: String,
}

impl DayCardTemplate {
    pub fn empty(day: Day) -> Self {
        Self {
            day,
            title: String::new(),
            ingredients: String::new(),
        }
    }
}

/// Generates a dinner for one day card from its ingredients and the meals
/// already planned for the rest of the week.
pub async fn action(
    template: Template,
    session: SessionId,
    State(app): State<AppState>,
    Path(day): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let Ok(day) = day.parse::<Day>() else {
        tracing::warn!(day = %day, "meal requested for unknown day");

        return (StatusCode::NOT_FOUND, template.render(NotFoundTemplate)).into_response();
    };

    let ingredients = form
        .get(&day.ingredients_field())
        .map(|value| value.trim())
        .unwrap_or_default();

    let other_meals = app
        .sessions
        .snapshot(session.as_str())
        .await
        .other_meals(day);

    tracing::debug!(day = day.key(), other_meals = %other_meals, "other meals for the week");

    let meal = app.mealplan.generate_meal(ingredients, &other_meals).await;
    let recorded = app
        .sessions
        .record(session.as_str(), day, meal.title.to_owned())
        .await;
    if !recorded {
        tracing::warn!(
            session = %session.as_str(),
            day = day.key(),
            "meal not kept, session unknown or expired"
        );
    }

    template
        .render(DayCardTemplate {
            day,
            title: meal.title,
            ingredients: meal.ingredients,
        })
        .into_response()
}
