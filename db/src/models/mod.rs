mod draft;
mod question;
mod types;

pub use self::draft::*;
pub use self::question::*;
pub use self::types::*;
