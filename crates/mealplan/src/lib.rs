pub mod parser;
pub mod prompt;
mod service;
mod session;

pub use service::*;
pub use session::*;

/// Suggestions used whenever the ingredient pipeline cannot produce a list.
pub const DEFAULT_INGREDIENTS: [&str; 10] = [
    "Chicken breast",
    "Salmon",
    "Ground beef",
    "Tofu",
    "Lentils",
    "Broccoli",
    "Sweet potato",
    "Quinoa",
    "Spinach",
    "Avocado",
];

/// Upper bound of the ingredient suggestion list.
pub const MAX_INGREDIENT_SUGGESTIONS: usize = 10;
