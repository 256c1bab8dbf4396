pub mod comparison;
pub mod engine;
pub mod strategy;
