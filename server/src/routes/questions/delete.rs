use actix_web::{
    web::{block, Data, Json, Path},
    Result,
};
use serde::{Deserialize, Serialize};

use db::{get_conn, models::Question, PgPool};
use errors::Error;

use super::parse_question_id;

#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteResponse {
    pub detail: String,
}

pub async fn delete(
    pool: Data<PgPool>,
    question_id: Path<String>,
) -> Result<Json<DeleteResponse>, Error> {
    let question_id = parse_question_id(&question_id.into_inner())?;

    let connection = get_conn(&pool)?;
    let res = block(move || Question::delete(&connection, question_id)).await?;
    res?;

    info!("Deleted question {}", question_id);

    Ok(Json(DeleteResponse {
        detail: "Question deleted successfully".to_string(),
    }))
}
