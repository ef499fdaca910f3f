pub mod db;

mod cli;
pub use cli::*;

mod errors;
pub use errors::*;

mod extract;
pub use extract::*;

mod state;
pub use state::*;

pub mod routes;
