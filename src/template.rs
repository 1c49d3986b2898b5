use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::{collections::HashMap, convert::Infallible};

pub(crate) mod filters {
    /// Appends the crate version to a static asset url so browsers refetch it
    /// after an upgrade.
    #[askama::filter_fn]
    pub fn versioned(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let version = askama::get_value::<String>(values, "version")
            .map(String::as_str)
            .unwrap_or("dev");

        Ok(format!("{value}?v={version}"))
    }
}

#[derive(Clone, Default)]
pub struct Template;

impl Template {
    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert(
            "version",
            Box::new(env!("CARGO_PKG_VERSION").to_owned()),
        );

        #[cfg(debug_assertions)]
        {
            values.insert("is_dev", Box::new(true));
        }
        #[cfg(not(debug_assertions))]
        {
            values.insert("is_dev", Box::new(false));
        }

        template.render_with_values(&values)
    }

    pub fn to_string<T: askama::Template>(&self, template: T) -> String {
        match self.render_with_values(template) {
            Ok(html) => html,
            Err(err) => format!("Failed to render template. Error: {err}"),
        }
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match self.render_with_values(template) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(err = %err, "failed to render template");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(self.to_string(ServerTemplate)),
                )
                    .into_response()
            }
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Template)
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate;

#[derive(askama::Template)]
#[template(path = "partials/message.html")]
pub struct MessageTemplate<'a> {
    pub message: &'a str,
}
