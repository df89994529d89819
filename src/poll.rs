//! Trivia vote poll
//!
//! A fixed list of answers with a running vote count per answer, persisted to
//! LocalStorage as a flat JSON object (`{"Go": 3, "Home": 1, ...}`).

use std::collections::BTreeMap;

use crate::platform::storage;

/// Counts keyed by option name
pub type VoteCounts = BTreeMap<String, u32>;

/// Result of submitting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing was selected; no vote recorded
    NoSelection,
    /// Not one of the poll's options; no vote recorded
    UnknownOption,
    Correct { answer: &'static str },
    Incorrect { answer: &'static str },
}

impl Verdict {
    /// Feedback line shown under the poll
    pub fn message(&self) -> String {
        match self {
            Verdict::NoSelection => "Please select a game!".to_string(),
            Verdict::UnknownOption => "That isn't one of the choices.".to_string(),
            Verdict::Correct { answer } => format!("Correct! Pokémon {} was released first.", answer),
            Verdict::Incorrect { answer } => {
                format!("Incorrect. The correct answer is Pokémon {}.", answer)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct VotePoll {
    options: &'static [&'static str],
    answer: &'static str,
    votes: VoteCounts,
}

impl VotePoll {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "triviaVotes";

    /// The shipped "which game came first" poll
    pub const GAME_OPTIONS: &'static [&'static str] = &[
        "Go",
        "Home",
        "Champions",
        "Legends Arceus",
        "Mystery Dungeon Rescue Team",
        "Sword and Shield",
    ];
    /// Earliest release among the listed titles (2005)
    pub const GAME_ANSWER: &'static str = "Mystery Dungeon Rescue Team";

    /// Poll with every count at zero
    pub fn new(options: &'static [&'static str], answer: &'static str) -> Self {
        Self::with_counts(options, answer, VoteCounts::new())
    }

    /// Poll seeded from stored counts; options missing from `counts` start at zero
    pub fn with_counts(
        options: &'static [&'static str],
        answer: &'static str,
        mut counts: VoteCounts,
    ) -> Self {
        for option in options {
            counts.entry((*option).to_string()).or_insert(0);
        }
        Self {
            options,
            answer,
            votes: counts,
        }
    }

    /// Poll restored from JSON text; malformed text counts as no votes
    pub fn from_json(options: &'static [&'static str], answer: &'static str, json: &str) -> Self {
        let counts = match serde_json::from_str::<VoteCounts>(json) {
            Ok(counts) => counts,
            Err(e) => {
                log::warn!("Vote data unreadable, starting from zero: {}", e);
                VoteCounts::new()
            }
        };
        Self::with_counts(options, answer, counts)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.votes)
    }

    pub fn votes(&self, option: &str) -> u32 {
        self.votes.get(option).copied().unwrap_or(0)
    }

    /// Total of the poll's own options
    pub fn total(&self) -> u32 {
        self.options.iter().map(|o| self.votes(o)).sum()
    }

    /// Record a vote and judge the answer
    pub fn submit(&mut self, choice: Option<&str>) -> Verdict {
        let Some(choice) = choice else {
            return Verdict::NoSelection;
        };
        if !self.options.contains(&choice) {
            log::warn!("Ignoring vote for unknown option '{}'", choice);
            return Verdict::UnknownOption;
        }

        *self.votes.entry(choice.to_string()).or_insert(0) += 1;
        if choice == self.answer {
            Verdict::Correct {
                answer: self.answer,
            }
        } else {
            Verdict::Incorrect {
                answer: self.answer,
            }
        }
    }

    /// Share of the vote per option in percent, in option order.
    /// All zero when nobody has voted.
    pub fn percentages(&self) -> Vec<(&'static str, f64)> {
        let total = self.total();
        self.options
            .iter()
            .map(|o| {
                let pct = if total == 0 {
                    0.0
                } else {
                    f64::from(self.votes(o)) * 100.0 / f64::from(total)
                };
                (*o, pct)
            })
            .collect()
    }

    /// Load the stored poll (missing or malformed data gives zeros)
    pub fn load(options: &'static [&'static str], answer: &'static str) -> Self {
        match storage::load_raw(Self::STORAGE_KEY) {
            Some(json) => Self::from_json(options, answer, &json),
            None => Self::new(options, answer),
        }
    }

    pub fn save(&self) -> bool {
        storage::save_json(Self::STORAGE_KEY, &self.votes)
    }
}

impl Default for VotePoll {
    fn default() -> Self {
        Self::new(Self::GAME_OPTIONS, Self::GAME_ANSWER)
    }
}

/// Percentage label as shown next to an option, e.g. "(33.3%)"
pub fn format_percent(pct: f64, total: u32) -> String {
    if total == 0 {
        "(0%)".to_string()
    } else {
        format!("({:.1}%)", pct)
    }
}
