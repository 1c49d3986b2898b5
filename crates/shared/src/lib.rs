mod day;
mod meal;
mod shopping_list;

pub use day::*;
pub use meal::*;
pub use shopping_list::*;
