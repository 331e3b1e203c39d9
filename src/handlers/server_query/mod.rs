//! Informational queries answered to the issuer only.

mod help;
mod list;

pub use help::HelpHandler;
pub use list::ListHandler;
