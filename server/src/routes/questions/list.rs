use actix_web::{
    web::{block, Data, Json, Query},
    Result,
};
use serde::{Deserialize, Serialize};

use db::{
    get_conn,
    models::{Difficulty, Question, QuestionFilter, QuestionType},
    PgPool,
};
use errors::Error;

use super::parse_question_id;

pub const DEFAULT_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListParams {
    pub question_id: Option<String>,
    pub job_title: Option<String>,
    pub question_type: Option<QuestionType>,
    pub question_difficulty: Option<Difficulty>,
    pub is_flagged: Option<bool>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListParams {
    /// Splits the query into a filter plus `(skip, limit)`. A limit outside
    /// `1..=DEFAULT_LIMIT` is rejected.
    fn into_filter(self) -> Result<(QuestionFilter, i64, i64), Error> {
        let id = match self.question_id {
            Some(ref value) => Some(parse_question_id(value)?),
            None => None,
        };

        let skip = self.skip.unwrap_or(0);
        if skip < 0 {
            return Err(Error::ValidationError(vec![
                "skip must not be negative".into(),
            ]));
        }

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if limit < 1 {
            return Err(Error::ValidationError(vec![
                "limit must be at least 1".into(),
            ]));
        }
        if limit > DEFAULT_LIMIT {
            return Err(Error::ValidationError(vec![format!(
                "limit must be at most {}",
                DEFAULT_LIMIT
            )]));
        }

        let filter = QuestionFilter {
            id,
            job_title: self.job_title,
            question_type: self.question_type,
            difficulty: self.question_difficulty,
            flagged: self.is_flagged,
        };

        Ok((filter, skip, limit))
    }
}

pub async fn list(
    pool: Data<PgPool>,
    params: Query<ListParams>,
) -> Result<Json<Vec<Question>>, Error> {
    let (filter, skip, limit) = params.into_inner().into_filter()?;

    let connection = get_conn(&pool)?;
    let res = block(move || -> Result<Vec<Question>, Error> {
        if Question::count(&connection)? == 0 {
            return Err(Error::NotFound(
                "Please generate or save questions first".into(),
            ));
        }

        let questions = Question::find_filtered(&connection, &filter, skip, limit)?;
        if questions.is_empty() {
            return Err(Error::NotFound(
                "No questions match the given filters".into(),
            ));
        }

        Ok(questions)
    })
    .await?;

    Ok(Json(res?))
}
