//! End-to-end deliberation tests with a mock reasoning collaborator

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use tribunal_core::Question;
use tribunal_jury::{JuryConfig, JuryCoordinator};
use tribunal_llm::{LlmError, LlmProvider, LlmRequest, LlmResponse, MockProvider};

fn barexam_question() -> Question {
    Question::try_from_parts(
        "Defendant shot at the leg of a rival player, intending to injure but not kill. \
         The victim died of loss of blood. What is the most serious crime?",
        [
            ("A".to_string(), "Involuntary manslaughter".to_string()),
            ("B".to_string(), "Voluntary manslaughter".to_string()),
            ("C".to_string(), "Murder".to_string()),
            ("D".to_string(), "None of the above".to_string()),
        ],
    )
    .unwrap()
}

fn context_passages() -> Vec<Value> {
    vec![
        Value::String(
            r#"{"id": "caselaw_12510790_79", "contents": "The victim died as a result of blood loss from the stab wounds on his leg."}"#
                .to_string(),
        ),
        json!({"contents": "Malice may be implied from an act greatly dangerous to life."}),
        Value::String("Intent to injure with a deadly weapon supports implied malice.".to_string()),
    ]
}

#[tokio::test]
async fn test_majority_verdict_end_to_end() {
    let jury = JuryCoordinator::new(
        Arc::new(MockProvider::juror(&["B", "B", "A"])),
        JuryConfig::default(),
    );

    let verdict = jury
        .synthesize(&barexam_question(), &context_passages(), 3)
        .await;

    assert_eq!(verdict.final_verdict, Some('B'));
    assert_eq!(verdict.confidence, 0.67);
    assert_eq!(verdict.vote_breakdown.get(&'B'), Some(&2));
    assert_eq!(verdict.vote_breakdown.get(&'A'), Some(&1));
    assert_eq!(verdict.deliberations.len(), 3);
    // Every ballot names a distinct persona
    let mut personas: Vec<&str> = verdict
        .deliberations
        .iter()
        .map(|b| b.persona.as_str())
        .collect();
    personas.sort();
    personas.dedup();
    assert_eq!(personas.len(), 3);
}

#[tokio::test]
async fn test_verdict_never_outside_choice_keys() {
    // Juror replies carry noise around the vote letter
    let jury = JuryCoordinator::new(
        Arc::new(MockProvider::new(vec![
            r#"{"reasoning": "r", "vote": "  b) because the facts show implied malice"}"#.to_string(),
            r#"{"reasoning": "r", "vote": "I choose option D."}"#.to_string(),
            r#"{"reasoning": "r", "vote": "Not sure"}"#.to_string(),
        ])),
        JuryConfig::default(),
    );

    let question = barexam_question();
    let verdict = jury.synthesize(&question, &context_passages(), 3).await;

    if let Some(winner) = verdict.final_verdict {
        assert!(question.is_valid_choice(winner));
    }
    // Two parseable votes (B, D) and one abstention
    assert_eq!(verdict.votes_cast(), 2);
    assert_eq!(verdict.deliberations.len(), 3);
}

#[tokio::test]
async fn test_failed_jurors_still_recorded() {
    let jury = JuryCoordinator::new(Arc::new(MockProvider::failing()), JuryConfig::default());

    let verdict = jury
        .synthesize(&barexam_question(), &context_passages(), 3)
        .await;

    assert_eq!(verdict.final_verdict, None);
    assert_eq!(verdict.confidence, 0.0);
    assert!(verdict.vote_breakdown.is_empty());
    assert_eq!(verdict.deliberations.len(), 3);
    assert!(verdict
        .deliberations
        .iter()
        .all(|b| b.vote.is_none() && b.reasoning.contains("failed")));
}

#[tokio::test]
async fn test_detached_jury_abstains() {
    let jury = JuryCoordinator::detached(JuryConfig::default());

    let verdict = jury
        .synthesize(&barexam_question(), &context_passages(), 3)
        .await;

    assert_eq!(verdict.final_verdict, None);
    assert_eq!(verdict.confidence, 0.0);
    assert_eq!(verdict.deliberations.len(), 3);
}

#[tokio::test]
async fn test_jury_size_clamped_to_personas() {
    let jury = JuryCoordinator::new(
        Arc::new(MockProvider::juror(&["A"])),
        JuryConfig::default(),
    );

    let verdict = jury
        .synthesize(&barexam_question(), &context_passages(), 12)
        .await;

    assert_eq!(verdict.deliberations.len(), 5);
    assert_eq!(verdict.final_verdict, Some('A'));
    assert_eq!(verdict.confidence, 1.0);
}

/// Provider that never answers within the juror timeout
#[derive(Debug)]
struct StalledProvider;

#[async_trait]
impl LlmProvider for StalledProvider {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn complete(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(LlmError::NotAvailable)
    }
}

#[tokio::test]
async fn test_timed_out_juror_abstains() {
    let config = JuryConfig {
        juror_timeout: Duration::from_millis(20),
        ..JuryConfig::default()
    };
    let jury = JuryCoordinator::new(Arc::new(StalledProvider), config);

    let verdict = jury
        .synthesize(&barexam_question(), &context_passages(), 2)
        .await;

    assert_eq!(verdict.final_verdict, None);
    assert_eq!(verdict.deliberations.len(), 2);
    assert!(verdict
        .deliberations
        .iter()
        .all(|b| b.reasoning.contains("timed out")));
}

#[tokio::test]
async fn test_evidence_shapes_all_surface_in_prompt() {
    /// Captures the prompt so the test can assert on evidence formatting
    #[derive(Debug)]
    struct CapturingProvider {
        seen: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LlmProvider for CapturingProvider {
        fn name(&self) -> &str {
            "capturing"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
            self.seen.lock().unwrap().push(request.prompt.clone());
            Ok(LlmResponse {
                content: r#"{"reasoning": "r", "vote": "C"}"#.to_string(),
                model: "capturing".to_string(),
                tokens_used: None,
                latency_ms: 0,
            })
        }
    }

    let provider = Arc::new(CapturingProvider {
        seen: std::sync::Mutex::new(Vec::new()),
    });
    let jury = JuryCoordinator::new(provider.clone(), JuryConfig::default());

    jury.synthesize(&barexam_question(), &context_passages(), 1)
        .await;

    let prompts = provider.seen.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("[Document 1] The victim died as a result"));
    assert!(prompt.contains("[Document 2] Malice may be implied"));
    assert!(prompt.contains("[Document 3] Intent to injure"));
    assert!(prompt.contains("A: Involuntary manslaughter"));
    assert!(prompt.contains("D: None of the above"));
}
