//! # Gemini
//!
//! Client for the hosted generative model plus the prompt and reply
//! plumbing around it.
//!
//! The model is treated as an opaque ranking oracle: it gets the query and
//! a stripped-down JSON view of the menu, and it owes us nothing but a bare
//! JSON array of item ids. Replies that break that contract are not errors,
//! they turn into "no matches" upstream.

use std::time::Duration;

use menu::MenuItem;
use menu::item::PromptItem;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    key: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ReplyCandidate>,
}

#[derive(Deserialize)]
struct ReplyCandidate {
    content: ReplyContent,
}

#[derive(Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: String,
}

impl GeminiClient {
    pub fn new(url: String, key: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build http client"),
            url,
            key,
        }
    }

    /// Sends `prompt` and returns the model's raw text reply.
    pub async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&self.url)
            .query(&[("key", self.key.as_str())])
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let reply: GenerateResponse = response.json().await?;

        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(AppError::EmptyModelReply)
    }
}

/// Serializes the candidate menu down to the four fields the model sees.
pub fn serialize_candidates(candidates: &[&MenuItem]) -> Result<String, AppError> {
    let view: Vec<PromptItem> = candidates.iter().map(|item| PromptItem::from(*item)).collect();
    Ok(serde_json::to_string(&view)?)
}

/// The fixed instruction prompt around the user query and the menu JSON.
pub fn build_prompt(query: &str, menu_json: &str) -> String {
    format!(
        "You are a smart food menu search engine.\n\
         \n\
         User query: {query}\n\
         \n\
         Menu items are provided as JSON.\n\
         Each item has:\n\
         - id\n\
         - name\n\
         - price\n\
         - tags (array of strings)\n\
         \n\
         Tags can include:\n\
         - veg, non-veg\n\
         - snacks, meal\n\
         - chicken, paneer\n\
         - spicy, sweet, filling\n\
         \n\
         Rules:\n\
         - Recommend a maximum of 5 items\n\
         - Prefer lower price items if query mentions cheap or under a price\n\
         - Match veg / non-veg using tags\n\
         - Match snacks or meals using tags\n\
         - Sort items by best match first\n\
         - Return ONLY a JSON array of item ids\n\
         - Do NOT add explanations or extra text\n\
         \n\
         {menu_json}"
    )
}

/// Parses the model reply into an id list.
///
/// Models like to wrap JSON in markdown fences, so those are stripped
/// first. `None` means the reply was not a JSON array of strings, which the
/// caller maps to an empty result rather than an error.
pub fn parse_id_array(raw: &str) -> Option<Vec<String>> {
    let cleaned = raw.replace("```json", "").replace("```", "");

    serde_json::from_str(cleaned.trim()).ok()
}
