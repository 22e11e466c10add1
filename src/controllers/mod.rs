pub mod health;
pub mod history;
pub mod ideas;
pub mod saved;
pub mod usage;
