pub mod deck;
pub mod note;
pub mod quiz;
pub mod stats;
