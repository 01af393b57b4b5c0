pub mod composite;
pub mod iface;
pub mod system_path;
pub mod web;
