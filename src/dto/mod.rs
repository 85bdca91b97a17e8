pub mod inspection_call;
pub mod normalize;

pub use inspection_call::*;
