//! Ballots and the verdict reducer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// One juror's vote-and-reasoning record for a single question.
///
/// Invariant: `vote`, when present, is a member of the question's valid
/// choice-key set (enforced by the coordinator's vote extraction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ballot {
    /// Persona name
    pub persona: String,
    /// Extracted vote; `None` records an abstention (unparseable vote,
    /// failed or timed-out invocation)
    pub vote: Option<char>,
    /// Free-form reasoning trace, or a note explaining the abstention
    pub reasoning: String,
}

impl Ballot {
    /// A ballot with a cast vote
    pub fn new(persona: impl Into<String>, vote: Option<char>, reasoning: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            vote,
            reasoning: reasoning.into(),
        }
    }

    /// An abstaining ballot carrying an explanatory note
    pub fn abstaining(persona: impl Into<String>, note: impl Into<String>) -> Self {
        Self::new(persona, None, note)
    }
}

/// The aggregated outcome of one deliberation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// Unique deliberation ID
    pub id: Uuid,
    /// Winning choice key, absent when no juror cast a parseable vote
    pub final_verdict: Option<char>,
    /// Winning count / total votes, rounded to two decimals; 0.0 with no
    /// votes
    pub confidence: f64,
    /// Votes per choice key
    pub vote_breakdown: BTreeMap<char, usize>,
    /// Full transcript, one ballot per persona invoked, in
    /// persona-selection order
    pub deliberations: Vec<Ballot>,
}

impl Verdict {
    /// Reduce a transcript into a verdict.
    ///
    /// Votes are tallied in ballot order. The winner is the key with the
    /// strictly highest count; when several keys share the maximum, the
    /// key whose first vote appeared earliest in the transcript wins.
    /// Zero votes is a normal outcome: no winner, confidence 0.0, empty
    /// breakdown, transcript returned in full.
    pub fn from_ballots(ballots: Vec<Ballot>) -> Self {
        // First-occurrence-ordered tally; the order carries the tie-break
        let mut tally: Vec<(char, usize)> = Vec::new();
        for ballot in &ballots {
            if let Some(vote) = ballot.vote {
                match tally.iter_mut().find(|(key, _)| *key == vote) {
                    Some((_, count)) => *count += 1,
                    None => tally.push((vote, 1)),
                }
            }
        }

        if tally.is_empty() {
            return Self {
                id: Uuid::new_v4(),
                final_verdict: None,
                confidence: 0.0,
                vote_breakdown: BTreeMap::new(),
                deliberations: ballots,
            };
        }

        let total: usize = tally.iter().map(|(_, count)| count).sum();
        let mut winner = tally[0];
        for &(key, count) in &tally[1..] {
            if count > winner.1 {
                winner = (key, count);
            }
        }

        let confidence = round2(winner.1 as f64 / total as f64);

        Self {
            id: Uuid::new_v4(),
            final_verdict: Some(winner.0),
            confidence,
            vote_breakdown: tally.into_iter().collect(),
            deliberations: ballots,
        }
    }

    /// Number of non-empty ballots
    pub fn votes_cast(&self) -> usize {
        self.vote_breakdown.values().sum()
    }

    /// Render as the structured record batch evaluation serializes, one
    /// JSON object per deliberation.
    pub fn to_record(&self) -> serde_json::Value {
        json!({
            "final_verdict": self.final_verdict.map(String::from),
            "confidence": self.confidence,
            "vote_breakdown": self
                .vote_breakdown
                .iter()
                .map(|(key, count)| (key.to_string(), *count))
                .collect::<BTreeMap<String, usize>>(),
            "juror_deliberations": self
                .deliberations
                .iter()
                .map(|ballot| {
                    json!({
                        "persona": ballot.persona,
                        "vote": ballot.vote.map(String::from),
                        "reasoning": ballot.reasoning,
                    })
                })
                .collect::<Vec<_>>(),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
