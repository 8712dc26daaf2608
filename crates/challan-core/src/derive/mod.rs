pub mod calendar;
pub mod engine;

pub use engine::{delay_months, derive};
