mod registration;
mod tournament;

pub use registration::*;
pub use tournament::*;
