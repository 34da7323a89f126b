mod input;

pub mod export;
pub mod fields;
pub mod flatten;
pub mod import;
pub mod show;
