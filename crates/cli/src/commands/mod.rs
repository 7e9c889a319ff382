pub mod attempt;
pub mod project;
