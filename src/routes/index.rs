use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use mealweek_shared::Day;

use crate::routes::AppState;
use crate::routes::meal::DayCardTemplate;
use crate::session::{ANONYMOUS_SESSION, SessionId, build_cookie, new_session_id};
use crate::template::{Template, filters};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Pre-rendered day cards, Monday first.
    pub cards: Vec<String>,
}

/// Starts a fresh planning session and renders an empty week.
pub async fn page(
    template: Template,
    jar: CookieJar,
    State(app): State<AppState>,
) -> impl IntoResponse {
    let id = match SessionId::from_jar(&jar) {
        Some(id) => id.0,
        None => {
            // Clients that drop the cookie keep planning in the shared session
            app.sessions.reset(ANONYMOUS_SESSION).await;
            new_session_id()
        }
    };
    app.sessions.reset(&id).await;

    tracing::info!(session = %id, "rendering initial page");

    let cards = Day::all()
        .iter()
        .map(|day| template.to_string(DayCardTemplate::empty(*day)))
        .collect();

    (
        jar.add(build_cookie(id)),
        template.render(IndexTemplate { cards }),
    )
}
