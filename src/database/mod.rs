pub mod schema;
pub use schema::*;

pub mod config;
pub use config::*;

pub mod handles;
pub use handles::*;
