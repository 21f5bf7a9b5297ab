use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use db::models::NewDraft;
use errors::Error;

use crate::parse::parse_drafts;
use crate::QuestionGenerator;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize, Debug)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize, Debug)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetail {
    message: String,
}

/// Calls the Gemini `generateContent` endpoint with a JSON response schema.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiGenerator {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        GeminiGenerator {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

fn build_prompt(job_title: &str, num_technical: u32, num_behavioral: u32) -> String {
    format!(
        "You are an interview preparation system asked by the user to generate {} behavioral \
         questions and {} technical questions for an upcoming interview for a {} position. \
         Return exactly that many questions, each tagged with its question_type.",
        num_behavioral, num_technical, job_title
    )
}

fn request_body(prompt: String) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "temperature": 0.5,
            "maxOutputTokens": 1024,
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "job_title": { "type": "STRING" },
                        "question_type": { "type": "STRING", "enum": ["technical", "behavioral"] },
                        "question": { "type": "STRING" }
                    },
                    "required": ["job_title", "question_type", "question"]
                }
            }
        }
    })
}

async fn transform_error(res: reqwest::Response) -> Error {
    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|parsed| parsed.error.message)
        .unwrap_or(body);

    error!("Generation request failed - {} {}", status, message);
    Error::GenerationError(format!(
        "Error generating questions: {} - {}, please try again",
        status, message
    ))
}

#[async_trait]
impl QuestionGenerator for GeminiGenerator {
    async fn generate(
        &self,
        job_title: &str,
        num_technical: u32,
        num_behavioral: u32,
    ) -> Result<Vec<NewDraft>, Error> {
        let body = request_body(build_prompt(job_title, num_technical, num_behavioral));

        let res = self
            .client
            .post(&self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                error!("Generation request could not be sent - {}", err);
                Error::GenerationError(format!(
                    "Error generating questions: {}, please try again",
                    err
                ))
            })?;

        if !res.status().is_success() {
            return Err(transform_error(res).await);
        }

        let content = res.json::<GenerateContentResponse>().await.map_err(|err| {
            error!("Generation response could not be decoded - {}", err);
            Error::GenerationError("Error generating questions: unreadable response, please try again".into())
        })?;

        let text: String = content
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            return Err(Error::GenerationError(
                "Error generating questions: no result returned, please try again".into(),
            ));
        }

        parse_drafts(&text, job_title, num_technical, num_behavioral)
    }
}
