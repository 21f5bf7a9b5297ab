use actix_web::{
    web::{block, Data, Json, Query},
    Result,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use db::{
    get_conn,
    models::{normalize_job_title, Draft, Question},
    PgPool,
};
use errors::Error;
use generator::QuestionGenerator;

use crate::config::Config;
use crate::validate::validate;

pub const MAX_QUESTIONS_PER_REQUEST: u32 = 20;

fn default_count() -> u32 {
    1
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct GenerateRequest {
    #[serde(default)]
    #[validate(length(min = "1", message = "Job title is required"))]
    pub job_title: String,
    #[serde(default = "default_count")]
    pub num_technical: u32,
    #[serde(default = "default_count")]
    pub num_behavioral: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    /// Persist the drafts straight away. Saved rows get fresh ids and the
    /// drafts are not staged, so they can not be annotated afterwards.
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateResponse {
    pub questions: Vec<Question>,
}

pub async fn generate(
    pool: Data<PgPool>,
    generator: Data<dyn QuestionGenerator>,
    config: Data<Config>,
    params: Query<GenerateParams>,
    body: Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, Error> {
    validate(&*body)?;

    let job_title = normalize_job_title(&body.job_title);
    if job_title.is_empty() {
        return Err(Error::ValidationError(vec!["Job title is required".into()]));
    }
    if body.num_technical.saturating_add(body.num_behavioral) > MAX_QUESTIONS_PER_REQUEST {
        return Err(Error::ValidationError(vec![format!(
            "At most {} questions can be generated at once",
            MAX_QUESTIONS_PER_REQUEST
        )]));
    }

    let contents = if body.num_technical == 0 && body.num_behavioral == 0 {
        Vec::new()
    } else {
        generator
            .generate(&job_title, body.num_technical, body.num_behavioral)
            .await?
    };

    info!(
        "Generated {} questions for {}",
        contents.len(),
        job_title
    );

    let ttl = config.draft_ttl();
    let drafts: Vec<Draft> = contents
        .into_iter()
        .map(|content| Draft::new(content, ttl))
        .collect();
    let save = params.save;

    let connection = get_conn(&pool)?;
    let res = block(move || -> Result<Vec<Question>, Error> {
        Draft::purge_expired(&connection)?;

        if save {
            Question::save_all(&connection, &drafts)
        } else {
            let staged = Draft::stage(&connection, &drafts)?;
            Ok(staged.into_iter().map(Question::from).collect())
        }
    })
    .await?;

    Ok(Json(GenerateResponse { questions: res? }))
}
