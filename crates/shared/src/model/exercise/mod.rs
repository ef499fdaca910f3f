mod exercise;
pub use exercise::*;

mod new;
pub use new::*;
