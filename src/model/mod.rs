pub mod result;
pub mod variable;

pub use result::ScoreResult;
pub use variable::VariableType;
