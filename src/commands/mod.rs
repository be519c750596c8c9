pub mod allergens;
pub mod config;
pub mod extract;
pub mod lang;
pub mod render;
