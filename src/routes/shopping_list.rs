use std::{collections::HashMap, path::Path};

use axum::{
    Form,
    extract::State,
    http::header,
    response::IntoResponse,
};
use mealweek_mealplan::week_block;
use mealweek_shared::{Day, DayPlan, ShoppingListEntry};
use serde::Deserialize;

use crate::routes::AppState;
use crate::session::SessionId;
use crate::template::{MessageTemplate, Template};

pub const NO_MEALS_MESSAGE: &str =
    "No meals and ingredients provided. Please add meals and ingredients for the week.";
pub const EMPTY_LIST_MESSAGE: &str = "No items in shopping list";
pub const EXPORT_FAILED_MESSAGE: &str = "Error exporting shopping list";

#[derive(askama::Template)]
#[template(path = "partials/shopping-list.html")]
pub struct ShoppingListTemplate {
    pub entries: Vec<ShoppingListEntry>,
    pub save_message: String,
}

/// Reads the seven day cards out of the submitted planner form.
fn day_plans(form: &HashMap<String, String>) -> Vec<DayPlan> {
    let field = |name: String| form.get(&name).cloned().unwrap_or_default();

    Day::all()
        .iter()
        .map(|day| DayPlan {
            day: *day,
            dinner_title: field(day.dinner_field()),
            ingredients_text: field(day.ingredients_field()),
        })
        .collect()
}

/// Consolidates the week into a shopping list and keeps a copy on disk.
pub async fn action(
    template: Template,
    session: SessionId,
    State(app): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let days = day_plans(&form);
    let snapshot = app.sessions.snapshot(session.as_str()).await;
    let block = week_block(&days, &snapshot);

    if block.is_empty() {
        tracing::warn!("no meals and ingredients collected for shopping list");

        return template.render(MessageTemplate {
            message: NO_MEALS_MESSAGE,
        });
    }

    tracing::info!(block = %block, "collected meals and ingredients for shopping list");

    let entries = app.mealplan.shopping_list(&block).await;
    if entries.is_empty() {
        tracing::warn!("empty shopping list generated");

        return template.render(MessageTemplate {
            message: EMPTY_LIST_MESSAGE,
        });
    }

    let save_message = save(&app, &entries);

    template.render(ShoppingListTemplate {
        entries,
        save_message,
    })
}

fn save(app: &AppState, entries: &[ShoppingListEntry]) -> String {
    let naming = app.config.export.naming();
    let saved = naming
        .filename(mealweek_shopping::now())
        .and_then(|filename| {
            mealweek_shopping::save_csv(Path::new(&app.config.export.directory), &filename, entries)
                .map(|_| filename)
        });

    match saved {
        Ok(filename) => format!("Shopping list saved to {filename}"),
        Err(err) => {
            tracing::error!(err = %err, "failed to save shopping list");

            format!("Shopping list could not be saved: {err}")
        }
    }
}

#[derive(Deserialize)]
pub struct ExportInput {
    #[serde(rename = "shopping-list-item", default)]
    pub items: Vec<String>,
}

/// Downloads the rendered list as `Item,Quantity,Meals`, merging repeated
/// items.
pub async fn export(
    template: Template,
    State(app): State<AppState>,
    axum_extra::extract::Form(input): axum_extra::extract::Form<ExportInput>,
) -> impl IntoResponse {
    tracing::debug!(items = ?input.items, "exporting shopping list");

    let rows = mealweek_shopping::aggregate(&input.items);
    let exported = mealweek_shopping::export_csv(&rows).and_then(|csv| {
        let filename = app
            .config
            .export
            .naming()
            .filename(mealweek_shopping::now())?;

        Ok((filename, csv))
    });

    match exported {
        Ok((filename, csv)) => (
            [
                (header::CONTENT_TYPE, "text/csv".to_owned()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={filename}"),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(err = %err, "failed to export shopping list");

            let message = format!("{EXPORT_FAILED_MESSAGE}: {err}");
            template
                .render(MessageTemplate { message: &message })
                .into_response()
        }
    }
}
