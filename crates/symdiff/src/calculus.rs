mod differentiation;
pub use differentiation::{derivative, nth_derivative};
