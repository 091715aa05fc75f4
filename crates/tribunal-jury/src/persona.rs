//! The fixed set of juror personas

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A juror's evaluative stance.
///
/// A closed set: five personas, each encoding a distinct legal philosophy.
/// The instruction text is opaque to the coordinator; it is passed through
/// verbatim as the juror's system role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    StrictTextualist,
    DevilsAdvocate,
    EquityAdvocate,
    LegalRealist,
    PrecedentLoyalist,
}

impl Persona {
    /// Every defined persona, in declaration order
    pub const ALL: [Persona; 5] = [
        Persona::StrictTextualist,
        Persona::DevilsAdvocate,
        Persona::EquityAdvocate,
        Persona::LegalRealist,
        Persona::PrecedentLoyalist,
    ];

    /// Display name, as recorded on ballots
    pub fn name(&self) -> &'static str {
        match self {
            Persona::StrictTextualist => "The Strict Textualist",
            Persona::DevilsAdvocate => "The Devil's Advocate",
            Persona::EquityAdvocate => "The Equity Advocate",
            Persona::LegalRealist => "The Legal Realist",
            Persona::PrecedentLoyalist => "The Precedent Loyalist",
        }
    }

    /// Conditioning instruction sent verbatim to the reasoning collaborator
    pub fn instruction(&self) -> &'static str {
        match self {
            Persona::StrictTextualist => {
                "You are a Strict Textualist following the motto that the text is the law. \
                 Analyze provided evidence only. Do not use outside knowledge. \
                 If evidence does not explicitly state the answer, reject the option. \
                 Catch 'hallucinations' where the model invents rules not found in text."
            }
            Persona::DevilsAdvocate => {
                "You are a Devil's Advocate. Your goal is to find loopholes in the argument. \
                 Look for exceptions, loopholes, or missing conditions in evidence. \
                 Be highly skeptical. If an answer looks too simple, check for missing conditions."
            }
            Persona::EquityAdvocate => {
                "You are an Equity Advocate. You view law as a tool for fairness. \
                 In housing/tort cases, consider the vulnerable party for e.g., the tenant. \
                 Interpret ambiguities to prevent unjust outcomes for the vulnerable party."
            }
            Persona::LegalRealist => {
                "You are a Legal Realist (Pragmatist). You care about practical consequences. \
                 If literal text leads to absurd results, reject it. \
                 Choose the option that represents a workable, sensible application of rules."
            }
            Persona::PrecedentLoyalist => {
                "You are a Precedent Loyalist. You care about consistency. \
                 Compare facts in 'Question' strictly against facts in 'Evidence' (Case Law). \
                 If facts don't match, the rule does not apply. Prevent false analogies."
            }
        }
    }
}

/// Process-wide persona registry, read-only after initialization.
pub struct PersonaRegistry;

impl PersonaRegistry {
    /// All defined personas
    pub fn all() -> &'static [Persona; 5] {
        &Persona::ALL
    }

    /// Draw `min(n, 5)` distinct personas uniformly at random without
    /// replacement.
    ///
    /// Every deliberation samples a different subset of stances rather than
    /// querying all personas, bounding collaborator cost while still
    /// producing cross-perspective disagreement signal.
    pub fn sample(n: usize) -> Vec<Persona> {
        let mut rng = rand::thread_rng();
        Persona::ALL
            .choose_multiple(&mut rng, n.min(Persona::ALL.len()))
            .copied()
            .collect()
    }
}
