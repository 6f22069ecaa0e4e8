mod field;
mod ingredient_entry;
mod known_ingredient;
mod totals;

pub use field::{EntryField, KnownField};
pub use ingredient_entry::IngredientEntry;
pub use known_ingredient::KnownIngredient;
pub use totals::Totals;
