use db::models::{normalize_job_title, NewDraft, QuestionType};
use errors::Error;

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let body = trimmed.trim_start_matches("```");
    let body = body.strip_prefix("json").unwrap_or(body);

    body.trim_end_matches("```").trim()
}

/// Validates generator output against the draft shape and the requested
/// counts. The returned drafts carry the requested job title, normalized.
pub fn parse_drafts(
    text: &str,
    job_title: &str,
    num_technical: u32,
    num_behavioral: u32,
) -> Result<Vec<NewDraft>, Error> {
    let records: Vec<NewDraft> = serde_json::from_str(strip_code_fence(text)).map_err(|err| {
        warn!("Generator returned malformed output - {}", err);
        Error::GenerationError(format!(
            "Generated questions were malformed, please try again: {}",
            err
        ))
    })?;

    if records.iter().any(|record| record.question.trim().is_empty()) {
        return Err(Error::GenerationError(
            "Generated questions were malformed, please try again: empty question".into(),
        ));
    }

    let technical = records
        .iter()
        .filter(|record| record.question_type == QuestionType::Technical)
        .count();
    let behavioral = records.len() - technical;

    if technical != num_technical as usize || behavioral != num_behavioral as usize {
        return Err(Error::GenerationError(format!(
            "Expected {} technical and {} behavioral questions, received {} and {}, please try again",
            num_technical, num_behavioral, technical, behavioral
        )));
    }

    let job_title = normalize_job_title(job_title);

    Ok(records
        .into_iter()
        .map(|record| NewDraft {
            job_title: job_title.clone(),
            question_type: record.question_type,
            question: record.question.trim().to_string(),
        })
        .collect())
}
