use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use diesel::{self, Connection, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use diesel::query_dsl::GroupByDsl;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use errors::Error;

use crate::models::{normalize_job_title, Difficulty, Draft, QuestionType};
use crate::schema::questions::{self, table};

#[derive(Clone, Debug, Deserialize, Identifiable, PartialEq, Queryable, Serialize)]
pub struct Question {
    pub id: Uuid,
    pub job_title: String,
    pub question_type: QuestionType,
    pub question: String,
    pub difficulty: Option<Difficulty>,
    pub flagged: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "questions"]
pub struct NewQuestion {
    pub id: Uuid,
    pub job_title: String,
    pub question_type: QuestionType,
    pub question: String,
    pub difficulty: Option<Difficulty>,
    pub flagged: bool,
}

/// All fields are optional and combined with AND.
#[derive(Debug, Default)]
pub struct QuestionFilter {
    pub id: Option<Uuid>,
    pub job_title: Option<String>,
    pub question_type: Option<QuestionType>,
    pub difficulty: Option<Difficulty>,
    pub flagged: Option<bool>,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct QuestionStats {
    pub total_questions: i64,
    pub questions_by_difficulty: BTreeMap<String, i64>,
    pub questions_by_job: BTreeMap<String, i64>,
    pub flagged_questions: i64,
}

impl Question {
    pub fn count(conn: &PgConnection) -> Result<i64, Error> {
        let total = table.count().get_result::<i64>(conn)?;

        Ok(total)
    }

    pub fn find_filtered(
        conn: &PgConnection,
        filter: &QuestionFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Question>, Error> {
        use crate::schema::questions::dsl;

        let mut query = dsl::questions.into_boxed();

        if let Some(question_id) = filter.id {
            query = query.filter(dsl::id.eq(question_id));
        }
        if let Some(ref title) = filter.job_title {
            query = query.filter(dsl::job_title.eq(normalize_job_title(title)));
        }
        if let Some(question_type) = filter.question_type {
            query = query.filter(dsl::question_type.eq(question_type));
        }
        if let Some(difficulty) = filter.difficulty {
            query = query.filter(dsl::difficulty.eq(difficulty));
        }
        if let Some(flagged) = filter.flagged {
            query = query.filter(dsl::flagged.eq(flagged));
        }

        let results = query
            .order((dsl::created_at.asc(), dsl::id.asc()))
            .offset(skip)
            .limit(limit)
            .load::<Question>(conn)?;

        Ok(results)
    }

    /// Persists drafts as fresh rows: new ids, no difficulty, not flagged.
    pub fn save_all(conn: &PgConnection, drafts: &[Draft]) -> Result<Vec<Question>, Error> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let new_questions: Vec<NewQuestion> = drafts
            .iter()
            .map(|draft| NewQuestion {
                id: Uuid::new_v4(),
                job_title: normalize_job_title(&draft.job_title),
                question_type: draft.question_type,
                question: draft.question.clone(),
                difficulty: None,
                flagged: false,
            })
            .collect();

        let saved = diesel::insert_into(table)
            .values(&new_questions)
            .get_results(conn)?;

        Ok(saved)
    }

    /// Persists a staged draft under its own id. Annotating the same draft
    /// again overwrites difficulty and flagged on the existing row.
    pub fn annotate_draft(
        conn: &PgConnection,
        draft: &Draft,
        difficulty: Difficulty,
        flagged: bool,
    ) -> Result<Question, Error> {
        use crate::schema::questions::dsl;

        let question = diesel::insert_into(table)
            .values(NewQuestion {
                id: draft.id,
                job_title: normalize_job_title(&draft.job_title),
                question_type: draft.question_type,
                question: draft.question.clone(),
                difficulty: Some(difficulty),
                flagged,
            })
            .on_conflict(dsl::id)
            .do_update()
            .set((dsl::difficulty.eq(difficulty), dsl::flagged.eq(flagged)))
            .get_result(conn)?;

        Ok(question)
    }

    /// Removes the row and any staged draft sharing its id, so a deleted
    /// question can not be annotated back into existence.
    pub fn delete(conn: &PgConnection, question_id: Uuid) -> Result<(), Error> {
        conn.transaction::<_, Error, _>(|| {
            let deleted = diesel::delete(table.find(question_id)).execute(conn)?;
            if deleted == 0 {
                return Err(Error::NotFound("Question not found".into()));
            }

            Draft::discard(conn, question_id)?;

            Ok(())
        })
    }

    /// All counts come from one transaction so they agree with each other.
    pub fn stats(conn: &PgConnection) -> Result<QuestionStats, Error> {
        use crate::schema::questions::dsl;
        use diesel::dsl::sql;
        use diesel::sql_types::BigInt;

        conn.transaction::<_, Error, _>(|| {
            let total_questions = Question::count(conn)?;

            let mut questions_by_difficulty = BTreeMap::new();
            for difficulty in Difficulty::ALL.iter() {
                let count = dsl::questions
                    .filter(dsl::difficulty.eq(*difficulty))
                    .count()
                    .get_result::<i64>(conn)?;
                questions_by_difficulty.insert(difficulty.to_string(), count);
            }

            let questions_by_job: BTreeMap<String, i64> = dsl::questions
                .group_by(dsl::job_title)
                .select((dsl::job_title, sql::<BigInt>("COUNT(*)")))
                .load::<(String, i64)>(conn)?
                .into_iter()
                .collect();

            let flagged_questions = dsl::questions
                .filter(dsl::flagged.eq(true))
                .count()
                .get_result::<i64>(conn)?;

            Ok(QuestionStats {
                total_questions,
                questions_by_difficulty,
                questions_by_job,
                flagged_questions,
            })
        })
    }
}

impl From<Draft> for Question {
    fn from(draft: Draft) -> Self {
        Question {
            id: draft.id,
            job_title: draft.job_title,
            question_type: draft.question_type,
            question: draft.question,
            difficulty: None,
            flagged: false,
            created_at: draft.created_at,
        }
    }
}
