pub mod descriptor;
pub mod endpoint;
pub mod platform;
