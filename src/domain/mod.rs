pub mod ideas;
pub mod quota;
pub mod shared;
