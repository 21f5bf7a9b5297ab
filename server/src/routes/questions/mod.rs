use uuid::Uuid;

use errors::Error;

mod annotate;
mod delete;
mod generate;
mod list;

pub use self::annotate::*;
pub use self::delete::*;
pub use self::generate::*;
pub use self::list::*;

fn parse_question_id(value: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| Error::invalid_id(value))
}
