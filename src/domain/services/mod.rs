pub mod schedule;
pub mod validators;
