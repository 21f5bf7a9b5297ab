use actix_web::{
    web::{block, Data, Json},
    Result,
};

use db::{
    get_conn,
    models::{Question, QuestionStats},
    PgPool,
};
use errors::Error;

pub async fn get_stats(pool: Data<PgPool>) -> Result<Json<QuestionStats>, Error> {
    let connection = get_conn(&pool)?;

    let stats = block(move || Question::stats(&connection)).await?;

    Ok(Json(stats?))
}
