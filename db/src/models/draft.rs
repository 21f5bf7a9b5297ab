use chrono::{DateTime, Duration, Utc};
use diesel::{self, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use errors::Error;

use crate::models::{normalize_job_title, QuestionType};
use crate::schema::generated_questions::{self, table};

/// A generated question held in the staging table until it is annotated
/// or expires.
#[derive(Clone, Debug, Deserialize, Identifiable, Insertable, PartialEq, Queryable, Serialize)]
#[table_name = "generated_questions"]
pub struct Draft {
    pub id: Uuid,
    pub job_title: String,
    pub question_type: QuestionType,
    pub question: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The shape a generator hands back for each question.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct NewDraft {
    pub job_title: String,
    pub question_type: QuestionType,
    pub question: String,
}

impl Draft {
    pub fn new(content: NewDraft, ttl: Duration) -> Draft {
        let now = Utc::now();

        Draft {
            id: Uuid::new_v4(),
            job_title: normalize_job_title(&content.job_title),
            question_type: content.question_type,
            question: content.question,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn stage(conn: &PgConnection, drafts: &[Draft]) -> Result<Vec<Draft>, Error> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let staged = diesel::insert_into(table)
            .values(drafts)
            .get_results(conn)?;

        Ok(staged)
    }

    pub fn purge_expired(conn: &PgConnection) -> Result<usize, Error> {
        use crate::schema::generated_questions::dsl::expires_at;

        let purged = diesel::delete(table.filter(expires_at.le(Utc::now()))).execute(conn)?;
        if purged > 0 {
            debug!("Purged {} expired drafts", purged);
        }

        Ok(purged)
    }

    pub fn count_live(conn: &PgConnection) -> Result<i64, Error> {
        use crate::schema::generated_questions::dsl::expires_at;

        let live = table
            .filter(expires_at.gt(Utc::now()))
            .count()
            .get_result::<i64>(conn)?;

        Ok(live)
    }

    pub fn find_live(conn: &PgConnection, draft_id: Uuid) -> Result<Draft, Error> {
        use crate::schema::generated_questions::dsl::{expires_at, id};

        table
            .filter(id.eq(draft_id))
            .filter(expires_at.gt(Utc::now()))
            .first::<Draft>(conn)
            .optional()?
            .ok_or_else(|| Error::NotFound("Question not found".into()))
    }

    pub fn discard(conn: &PgConnection, draft_id: Uuid) -> Result<usize, Error> {
        let discarded = diesel::delete(generated_questions::table.find(draft_id)).execute(conn)?;

        Ok(discarded)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::{Draft, NewDraft};
    use crate::models::{Question, QuestionType};

    #[test]
    fn new_draft_is_normalized_and_expires_after_ttl() {
        let draft = Draft::new(
            NewDraft {
                job_title: "Backend Engineer".to_string(),
                question_type: QuestionType::Technical,
                question: "Explain connection pooling.".to_string(),
            },
            Duration::minutes(30),
        );

        assert_eq!(draft.job_title, "backend engineer");
        assert_eq!(draft.expires_at - draft.created_at, Duration::minutes(30));
    }

    #[test]
    fn draft_converts_to_unannotated_question() {
        let draft = Draft::new(
            NewDraft {
                job_title: "qa".to_string(),
                question_type: QuestionType::Behavioral,
                question: "Describe a release you blocked.".to_string(),
            },
            Duration::minutes(5),
        );
        let id = draft.id;

        let question: Question = draft.into();
        assert_eq!(question.id, id);
        assert_eq!(question.difficulty, None);
        assert!(!question.flagged);
    }
}
