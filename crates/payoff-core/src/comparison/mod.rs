pub mod baseline;
pub mod strategies;
