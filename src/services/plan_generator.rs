// src/services/plan_generator.rs
// DOCUMENTATION: Generative plan capability and its Gemini implementation
// PURPOSE: One-call contract for producing itinerary text, injected into the
// trip flows so they stay testable without network access

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::errors::ApiError;

/// The single operation the trip flows need from a generative backend.
/// Production injects `GeminiClient`; tests can inject a canned generator.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}

/// Build the trip-plan prompt. The wording fixes the output format so the
/// budget line can be parsed back out of the response: plans end with a
/// `Total budget: Rp <amount>` line.
pub fn build_trip_prompt(destination: &str, city: &str, start_date: &str, end_date: &str) -> String {
    format!(
        r#"
        Buatlah rencana perjalanan ke tempat wisata bernama "{}" dari kota "{}".
        Perjalanan dimulai pada tanggal {} hingga {}.
        Tolong berikan itinerary singkat dan estimasi total biaya secara ringkas dalam format seperti:

        Rencana:
        - Hari 1: ...
        - Hari 2: ...
        Total budget: Rp 1.500.000
        "#,
        destination, city, start_date, end_date
    )
}

/// Pull the rupiah amount out of a generated plan. Matches the first `Rp`
/// (any case, at most one following whitespace char) trailed by digits with
/// `.` thousands separators; returns None when no amount is present.
pub fn extract_budget(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i].eq_ignore_ascii_case(&b'r') && bytes[i + 1].eq_ignore_ascii_case(&b'p') {
            let mut j = i + 2;

            if j < bytes.len() && (bytes[j] as char).is_whitespace() {
                j += 1;
            }

            let mut digits = String::new();
            while j < bytes.len() && (bytes[j].is_ascii_digit() || bytes[j] == b'.') {
                if bytes[j].is_ascii_digit() {
                    digits.push(bytes[j] as char);
                }
                j += 1;
            }

            if !digits.is_empty() {
                return digits.parse().ok();
            }
        }
        i += 1;
    }

    None
}

/// Gemini REST client implementing the generator contract.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ContentPart>>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

#[async_trait]
impl PlanGenerator for GeminiClient {
    /// Call the generateContent endpoint and return the first candidate's
    /// text. Awaited inline by the request that triggered it; no retries.
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        log::debug!("Gemini generateContent request ({} chars)", prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini request failed: {}", e);
                ApiError::ExternalApi(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            log::error!("Gemini API error {}: {}", status, detail);
            return Err(ApiError::ExternalApi(format!("API error {}", status)));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Gemini response: {}", e);
            ApiError::ExternalApi(format!("Parse error: {}", e))
        })?;

        let text = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            log::error!("Gemini returned no text candidates");
            return Err(ApiError::ExternalApi("Empty generation result".to_string()));
        }

        log::info!("Gemini produced a {}-char plan", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_destination_and_dates() {
        let prompt = build_trip_prompt("Borobudur", "Yogyakarta", "2025-06-01", "2025-06-07");
        assert!(prompt.contains("\"Borobudur\""));
        assert!(prompt.contains("\"Yogyakarta\""));
        assert!(prompt.contains("2025-06-01"));
        assert!(prompt.contains("2025-06-07"));
        assert!(prompt.contains("Total budget: Rp"));
    }

    #[test]
    fn budget_is_extracted_from_the_total_line() {
        let plan = "Rencana:\n- Hari 1: candi\n- Hari 2: pantai\nTotal budget: Rp 1.500.000";
        assert_eq!(extract_budget(plan), Some(1_500_000));
    }

    #[test]
    fn budget_matches_without_a_space_after_rp() {
        assert_eq!(extract_budget("sekitar Rp500.000 per orang"), Some(500_000));
    }

    #[test]
    fn budget_match_is_case_insensitive() {
        assert_eq!(extract_budget("total: rp 250.000"), Some(250_000));
        assert_eq!(extract_budget("total: RP 250.000"), Some(250_000));
    }

    #[test]
    fn first_amount_wins_when_several_are_listed() {
        let plan = "Tiket Rp 50.000, hotel Rp 300.000";
        assert_eq!(extract_budget(plan), Some(50_000));
    }

    #[test]
    fn rp_without_digits_is_skipped() {
        assert_eq!(extract_budget("Rp tidak diketahui, hotel Rp 75.000"), Some(75_000));
        assert_eq!(extract_budget("harga dalam Rupiah belum pasti"), None);
    }

    #[test]
    fn text_without_an_amount_yields_none() {
        assert_eq!(extract_budget("rencana tanpa estimasi biaya"), None);
        assert_eq!(extract_budget(""), None);
    }
}
