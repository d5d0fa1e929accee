mod global;

pub use global::*;
