mod card;

pub use card::{list_as_panel, model_as_card};
