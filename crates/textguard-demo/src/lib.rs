pub mod cli;
pub mod models;
pub mod server;
pub mod state;

pub use models::*;
pub use server::*;
pub use state::*;
