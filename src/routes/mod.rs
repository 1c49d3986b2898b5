use std::sync::Arc;

use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use mealweek_generation::GenerationClient;
use mealweek_mealplan::{MealPlanService, SessionStore};

use crate::template::{NotFoundTemplate, Template};

mod assets;
mod health;
mod index;
mod ingredients;
mod meal;
mod shopping_list;

pub use assets::AssetsService;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mealplan: MealPlanService,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: crate::config::Config, client: Arc<dyn GenerationClient>) -> Self {
        Self {
            sessions: config.session.store(),
            mealplan: MealPlanService::new(client),
            config,
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    (
        axum::http::StatusCode::NOT_FOUND,
        template.render(NotFoundTemplate),
    )
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/generate_ingredients", post(ingredients::action))
        .route("/generate/{day}", post(meal::action))
        .route("/generate_shopping_list", post(shopping_list::action))
        .route("/export_shopping_list", post(shopping_list::export))
        .fallback(fallback)
        .nest_service("/static", AssetsService::new())
        .with_state(app_state)
}
