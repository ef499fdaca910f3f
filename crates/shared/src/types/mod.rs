mod uuid;
pub use uuid::*;

mod exercise_refs;
pub use exercise_refs::*;
