#[cfg(test)]
pub mod tests {
    use std::env;
    use std::sync::Arc;

    use actix_http::Request;
    use actix_service::Service;
    use actix_web::{body::MessageBody, dev::ServiceResponse, error::Error, test, web::Data, App};
    use async_trait::async_trait;
    use diesel::{self, PgConnection, RunQueryDsl};
    use dotenv::dotenv;
    use serde::{de::DeserializeOwned, Serialize};
    use serde_json;

    use db::{
        models::{NewDraft, QuestionType},
        schema::{generated_questions, questions},
        PgPool,
    };
    use generator::QuestionGenerator;

    use crate::config::Config;
    use crate::routes::routes;

    /// Answers with numbered placeholder questions in the requested counts.
    pub struct StubGenerator;

    #[async_trait]
    impl QuestionGenerator for StubGenerator {
        async fn generate(
            &self,
            job_title: &str,
            num_technical: u32,
            num_behavioral: u32,
        ) -> Result<Vec<NewDraft>, errors::Error> {
            let technical = (0..num_technical).map(|i| NewDraft {
                job_title: job_title.to_string(),
                question_type: QuestionType::Technical,
                question: format!("Technical question {} for {}", i + 1, job_title),
            });
            let behavioral = (0..num_behavioral).map(|i| NewDraft {
                job_title: job_title.to_string(),
                question_type: QuestionType::Behavioral,
                question: format!("Behavioral question {} for {}", i + 1, job_title),
            });

            Ok(technical.chain(behavioral).collect())
        }
    }

    pub struct FailingGenerator;

    #[async_trait]
    impl QuestionGenerator for FailingGenerator {
        async fn generate(
            &self,
            _job_title: &str,
            _num_technical: u32,
            _num_behavioral: u32,
        ) -> Result<Vec<NewDraft>, errors::Error> {
            Err(errors::Error::GenerationError(
                "Error generating questions: 503 - overloaded, please try again".into(),
            ))
        }
    }

    pub fn test_pool() -> PgPool {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        db::new_pool(&database_url).unwrap()
    }

    pub fn test_config() -> Config {
        Config {
            database_url: env::var("DATABASE_URL").unwrap_or_default(),
            gemini_api_key: "test-key".to_string(),
            gemini_model: generator::DEFAULT_MODEL.to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            draft_ttl_minutes: 10,
            client_host: None,
            bind_address: "127.0.0.1:0".to_string(),
        }
    }

    pub fn clear_tables(conn: &PgConnection) {
        diesel::delete(questions::table).execute(conn).unwrap();
        diesel::delete(generated_questions::table)
            .execute(conn)
            .unwrap();
    }

    pub async fn get_service(
        generator: Arc<dyn QuestionGenerator>,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
        test::init_service(
            App::new()
                .app_data(Data::new(test_pool()))
                .app_data(Data::from(generator))
                .app_data(Data::new(test_config()))
                .configure(routes),
        )
        .await
    }

    async fn call<R>(generator: Arc<dyn QuestionGenerator>, req: test::TestRequest) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let app = get_service(generator).await;

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;
        let json_body = serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!(
                "read_response_json failed during deserialization. response: {} status: {}",
                String::from_utf8(body.to_vec())
                    .unwrap_or_else(|_| "Could not convert Bytes -> String".to_string()),
                status
            )
        });

        (status, json_body)
    }

    /// Helper for HTTP GET integration tests
    pub async fn test_get<R>(route: &str) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        call(Arc::new(StubGenerator), test::TestRequest::get().uri(route)).await
    }

    /// Helper for HTTP POST integration tests with a JSON body
    pub async fn test_post<T: Serialize, R>(route: &str, params: T) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        test_post_with(Arc::new(StubGenerator), route, params).await
    }

    pub async fn test_post_with<T: Serialize, R>(
        generator: Arc<dyn QuestionGenerator>,
        route: &str,
        params: T,
    ) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        call(
            generator,
            test::TestRequest::post().set_json(&params).uri(route),
        )
        .await
    }

    /// Helper for HTTP POST integration tests that only carry query params
    pub async fn test_post_empty<R>(route: &str) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        call(Arc::new(StubGenerator), test::TestRequest::post().uri(route)).await
    }

    pub async fn test_delete<R>(route: &str) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        call(Arc::new(StubGenerator), test::TestRequest::delete().uri(route)).await
    }
}
