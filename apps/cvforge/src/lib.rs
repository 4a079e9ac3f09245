pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod generation;
pub mod layout;
pub mod process;
pub mod records;
pub mod render;
pub mod routes;
pub mod state;
pub mod verify;
