pub mod binary;
pub mod command_ext;
pub mod fixtures;

pub use binary::*;
pub use command_ext::*;
pub use fixtures::*;
