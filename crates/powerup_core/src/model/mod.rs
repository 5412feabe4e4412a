mod inputs;
mod params;
mod results;

pub use inputs::*;
pub use params::*;
pub use results::*;
