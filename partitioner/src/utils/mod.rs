pub mod chunks;
pub mod paths;
