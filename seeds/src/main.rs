use std::env;

use diesel::{self, RunQueryDsl};
use dotenv::dotenv;
use uuid::Uuid;

use db::{
    get_conn,
    models::{Difficulty, NewQuestion, QuestionType},
    new_pool,
    schema::questions,
};
use errors::Error;

fn main() -> Result<(), Error> {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| Error::InternalServerError("DATABASE_URL must be set".into()))?;
    let pool = new_pool(&database_url)?;
    let conn = get_conn(&pool)?;

    let seeds: Vec<NewQuestion> = [
        ("backend engineer", QuestionType::Technical, "How would you design an idempotent payment endpoint?", Some(Difficulty::Hard), true),
        ("backend engineer", QuestionType::Technical, "When would you reach for a message queue instead of a direct call?", Some(Difficulty::Medium), false),
        ("backend engineer", QuestionType::Behavioral, "Describe a production incident you owned end to end.", None, false),
        ("data analyst", QuestionType::Technical, "How do you detect and handle outliers in a dataset?", Some(Difficulty::Easy), false),
        ("data analyst", QuestionType::Behavioral, "Tell me about a time your analysis changed a decision.", None, true),
    ]
    .iter()
    .map(|(job_title, question_type, question, difficulty, flagged)| NewQuestion {
        id: Uuid::new_v4(),
        job_title: job_title.to_string(),
        question_type: *question_type,
        question: question.to_string(),
        difficulty: *difficulty,
        flagged: *flagged,
    })
    .collect();

    let inserted = diesel::insert_into(questions::table)
        .values(&seeds)
        .execute(&conn)?;
    println!("Seeded {} questions", inserted);

    Ok(())
}
