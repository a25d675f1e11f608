//! Domain models for the symptom matcher.

mod condition;
mod history;
mod result;

pub use condition::*;
pub use history::*;
pub use result::*;
