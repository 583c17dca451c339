pub mod handle_error;
pub use handle_error::*;

pub mod table_handle;
pub use table_handle::*;

pub mod handle_resolver;
pub use handle_resolver::*;

pub mod handle_codec;
pub use handle_codec::*;
