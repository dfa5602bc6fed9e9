use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Completion status reported when the transaction committed.
pub const STATUS_COMMITTED: i32 = 0;

/// Completion status reported when the transaction rolled back.
pub const STATUS_ROLLED_BACK: i32 = 1;

/// Completion status reported when the outcome could not be determined,
/// e.g. the commit itself failed part way.
pub const STATUS_UNKNOWN: i32 = 2;

/// The transaction outcome an action is registered under.
///
/// `All` is the wildcard: its actions run on every completion, after the
/// actions of the specific outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    Committed,
    RolledBack,
    Unknown,
    #[default]
    All,
}

impl Outcome {
    /// Every outcome, wildcard last.
    pub const ALL_OUTCOMES: [Outcome; 4] = [
        Outcome::Committed,
        Outcome::RolledBack,
        Outcome::Unknown,
        Outcome::All,
    ];

    /// The raw completion status bound to this outcome. `All` has none.
    pub const fn code(self) -> Option<i32> {
        match self {
            Outcome::Committed => Some(STATUS_COMMITTED),
            Outcome::RolledBack => Some(STATUS_ROLLED_BACK),
            Outcome::Unknown => Some(STATUS_UNKNOWN),
            Outcome::All => None,
        }
    }

    /// Maps a raw completion status onto an outcome.
    ///
    /// A missing code classifies as `All`. A code bound to no outcome
    /// returns `None`.
    pub fn classify(code: Option<i32>) -> Option<Outcome> {
        match code {
            None => Some(Outcome::All),
            Some(code) => by_code().get(&code).copied(),
        }
    }

    /// Name used in log output.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Committed => "committed",
            Outcome::RolledBack => "rolled_back",
            Outcome::Unknown => "unknown",
            Outcome::All => "all",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn by_code() -> &'static HashMap<i32, Outcome> {
    static BY_CODE: OnceLock<HashMap<i32, Outcome>> = OnceLock::new();
    BY_CODE.get_or_init(|| {
        Outcome::ALL_OUTCOMES
            .iter()
            .filter_map(|outcome| outcome.code().map(|code| (code, *outcome)))
            .collect()
    })
}
