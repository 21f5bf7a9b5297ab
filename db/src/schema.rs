table! {
    generated_questions (id) {
        id -> Uuid,
        job_title -> Varchar,
        question_type -> Varchar,
        question -> Text,
        created_at -> Timestamptz,
        expires_at -> Timestamptz,
    }
}

table! {
    questions (id) {
        id -> Uuid,
        job_title -> Varchar,
        question_type -> Varchar,
        question -> Text,
        difficulty -> Nullable<Varchar>,
        flagged -> Bool,
        created_at -> Timestamptz,
    }
}

allow_tables_to_appear_in_same_query!(generated_questions, questions,);
