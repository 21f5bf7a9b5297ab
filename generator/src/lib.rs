#[macro_use]
extern crate log;

use async_trait::async_trait;

use db::models::NewDraft;
use errors::Error;

mod gemini;
mod parse;

pub use self::gemini::{GeminiGenerator, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use self::parse::parse_drafts;

/// Produces interview question drafts for a role. Implementations either
/// return exactly the requested number of each type or fail with
/// `Error::GenerationError`.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(
        &self,
        job_title: &str,
        num_technical: u32,
        num_behavioral: u32,
    ) -> Result<Vec<NewDraft>, Error>;
}
