pub mod global;
pub mod paths;

pub use global::GlobalConfig;
