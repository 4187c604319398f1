use async_trait::async_trait;
use pagekit_editor::PatchCommand;
use pagekit_extract::{
    extract, extract_local, Extraction, GenerateRequest, GenerationError, GenerationService, RepairConfig,
};
use std::sync::Mutex;

/// Returns canned responses and records every request
struct ScriptedService {
    responses: Mutex<Vec<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedService {
    fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationService for ScriptedService {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        responses.remove(0)
    }
}

const PAYLOAD: &str = r#"{"ast_actions":[{"action":"add_section","section_type":"Pricing"},{"action":"delete_section","section_id":"faq-1"}],"explanation":"Swapped FAQ for pricing"}"#;

#[tokio::test]
async fn test_three_shapes_give_identical_batches() {
    let service = ScriptedService::new(vec![]);
    let config = RepairConfig::default();

    let plain = extract(PAYLOAD, &service, &config).await.unwrap();
    let fenced = extract(&format!("```json\n{}\n```", PAYLOAD), &service, &config)
        .await
        .unwrap();
    let prose = extract(
        &format!("Done! Here is the change: {} Anything else?", PAYLOAD),
        &service,
        &config,
    )
    .await
    .unwrap();

    assert_eq!(plain, fenced);
    assert_eq!(plain, prose);
    let batch = plain.batch().unwrap();
    assert_eq!(batch.commands.len(), 2);
    assert!(matches!(batch.commands[1], PatchCommand::DeleteSection { .. }));
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_prose_only_is_a_reply() {
    let service = ScriptedService::new(vec![]);
    let text = "  Happy to help! What kind of business is this page for?  ";
    let result = extract(text, &service, &RepairConfig::default()).await.unwrap();

    assert_eq!(
        result,
        Extraction::Reply("Happy to help! What kind of business is this page for?".into())
    );
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_malformed_batch_is_repaired_once() {
    let service = ScriptedService::new(vec![Ok(PAYLOAD.to_string())]);
    let broken = r#"{ast_actions: [{action: "add_section", section_type: "Pricing"},]"#;
    let config = RepairConfig {
        model: "fast-model".into(),
        max_tokens: 512,
    };

    let result = extract(broken, &service, &config).await.unwrap();

    match result {
        Extraction::Batch { batch, repaired } => {
            assert!(repaired);
            assert_eq!(batch.commands.len(), 2);
        }
        other => panic!("Expected a repaired batch, got {:?}", other),
    }

    let requests = service.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].temperature, 0.0);
    assert_eq!(requests[0].model, "fast-model");
    assert_eq!(requests[0].history[0].content, broken);
}

#[tokio::test]
async fn test_failed_repair_falls_back_to_reply() {
    let service = ScriptedService::new(vec![Ok("Sorry, I cannot fix that.".into())]);
    let broken = "I tried ast_actions but forgot the JSON";

    let result = extract(broken, &service, &RepairConfig::default()).await.unwrap();
    assert_eq!(result, Extraction::Reply(broken.into()));
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn test_repair_call_error_is_surfaced() {
    let service = ScriptedService::new(vec![Err(GenerationError::RateLimited)]);
    let result = extract("{ast_actions: oops", &service, &RepairConfig::default()).await;
    assert!(result.is_err());
    assert_eq!(service.calls(), 1);
}

#[test]
fn test_extract_local_is_idempotent_on_clean_input() {
    let first = extract_local(PAYLOAD);
    let batch = first.batch().unwrap();
    let reencoded = serde_json::to_string(batch).unwrap();
    assert_eq!(extract_local(&reencoded), first);
}

#[tokio::test]
async fn test_default_stream_reports_whole_text_once() {
    let service = ScriptedService::new(vec![Ok(PAYLOAD.to_string())]);
    let request = RepairConfig::default();
    let request = pagekit_extract::pipeline::repair_request("x", &request);

    let mut chunks: Vec<String> = Vec::new();
    let mut on_chunk = |chunk: &str| chunks.push(chunk.to_string());
    let text = service.stream_generate(&request, &mut on_chunk).await.unwrap();

    assert_eq!(text, PAYLOAD);
    assert_eq!(chunks, vec![PAYLOAD.to_string()]);
}
