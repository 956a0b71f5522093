pub mod generation;
pub mod message;
pub mod model;
pub mod token_count;
