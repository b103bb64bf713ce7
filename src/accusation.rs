use crate::clue_index::ClueIndex;
use crate::room::normalize_name;
use crate::suspects::SuspectDirectory;

/// Clues that must point at the accused for the accusation to hold.
pub const ACCUSATION_THRESHOLD: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub suspect: String,
    pub matching_clue_count: usize,
    pub correct: bool,
    /// The collected clues implicating `suspect`, in notebook order.
    pub evidence: Vec<String>,
}

/// Scores an accusation against the notebook. Never mutates anything.
///
/// Clues without a mapping count for nobody. Accusing someone who is not in
/// the directory is not an error, it just finds no evidence.
#[must_use]
pub fn evaluate(clues: &ClueIndex, directory: &SuspectDirectory, accused: &str) -> Verdict {
    let accused = normalize_name(accused);
    let evidence: Vec<String> = clues
        .iter()
        .filter(|clue| directory.lookup(clue) == Some(accused.as_str()))
        .map(str::to_string)
        .collect();
    let matching_clue_count = evidence.len();
    Verdict {
        suspect: accused,
        matching_clue_count,
        correct: matching_clue_count >= ACCUSATION_THRESHOLD,
        evidence,
    }
}
