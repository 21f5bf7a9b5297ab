use actix_web::{
    web::{block, Data, Json, Query},
    Result,
};
use diesel::Connection;
use serde::{Deserialize, Serialize};

use db::{
    get_conn,
    models::{Difficulty, Draft, Question},
    PgPool,
};
use errors::Error;

use super::parse_question_id;

#[derive(Debug, Deserialize, Serialize)]
pub struct AnnotateParams {
    pub question_id: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_interesting: bool,
}

/// Saves a staged draft with its difficulty and flag. Re-annotating a draft
/// that is still staged overwrites the saved values.
pub async fn annotate(
    pool: Data<PgPool>,
    params: Query<AnnotateParams>,
) -> Result<Json<Question>, Error> {
    let question_id = parse_question_id(&params.question_id)?;
    let difficulty = params.difficulty;
    let flagged = params.is_interesting;

    let connection = get_conn(&pool)?;
    let res = block(move || {
        connection.transaction::<_, Error, _>(|| {
            if Draft::count_live(&connection)? == 0 {
                return Err(Error::BadRequest("No questions to modify".into()));
            }

            let draft = Draft::find_live(&connection, question_id)?;

            Question::annotate_draft(&connection, &draft, difficulty, flagged)
        })
    })
    .await?;

    let question = res?;
    info!(
        "Saved question {} as {} (flagged: {})",
        question.id, difficulty, flagged
    );

    Ok(Json(question))
}
