pub mod error;
pub mod error_help;
pub mod path;
pub mod spawn;

pub use error::{PackError, PackResult};
pub use error_help::{format_error_with_help, ErrorHelp};
