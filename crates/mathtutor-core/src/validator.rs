//! Free-text answer validation.
//!
//! Answers are compared after normalization: case, whitespace, decimal
//! separators and parentheses are ignored. Numeric answers are accepted within
//! an absolute tolerance of [`NUMERIC_TOLERANCE`], and a small synonym table
//! covers yes/no/infinity spellings.
//!
//! The tolerance is absolute and does not scale with magnitude, so
//! `1000000.0005` matches `1000000` while `0.0005` also matches `0`.

/// Maximum absolute difference for two numeric answers to match.
pub const NUMERIC_TOLERANCE: f64 = 0.001;

/// Canonical answers and the spellings accepted in their place. Entries are
/// already normalized. Only a canonical answer and one of its own variants
/// match; two variants never match each other.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("да", &["yes", "истина", "верно", "правда", "true"]),
    ("нет", &["no", "ложь", "неверно", "false"]),
    ("бесконечность", &["∞", "infinity", "inf"]),
];

/// Which rule decided the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Normalized strings are identical.
    Exact,
    /// Both are numbers within tolerance.
    Numeric,
    /// One side is a canonical answer and the other one of its variants.
    Synonym,
    /// No rule matched.
    Rejected,
    /// The task has no reference answer.
    NoReference,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, Verdict::Exact | Verdict::Numeric | Verdict::Synonym)
    }
}

/// Returns `true` when `user_input` should be accepted for `correct_answer`.
pub fn validate(user_input: &str, correct_answer: &str) -> bool {
    judge(user_input, correct_answer).is_accepted()
}

/// Compare an answer and report which rule matched.
pub fn judge(user_input: &str, correct_answer: &str) -> Verdict {
    if correct_answer.is_empty() {
        return Verdict::NoReference;
    }

    let user = normalize(user_input);
    let correct = normalize(correct_answer);

    if user == correct {
        return Verdict::Exact;
    }

    if let (Some(u), Some(c)) = (parse_decimal(&user), parse_decimal(&correct)) {
        return if (u - c).abs() < NUMERIC_TOLERANCE {
            Verdict::Numeric
        } else {
            Verdict::Rejected
        };
    }

    if is_synonym(&user, &correct) {
        Verdict::Synonym
    } else {
        Verdict::Rejected
    }
}

fn is_synonym(user: &str, correct: &str) -> bool {
    SYNONYMS.iter().any(|(canonical, variants)| {
        (*canonical == correct && variants.contains(&user))
            || (*canonical == user && variants.contains(&correct))
    })
}

/// Lowercase, drop whitespace, unify decimal separators to `.`, drop parentheses.
pub fn normalize(answer: &str) -> String {
    answer
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

/// Parse a plain base-10 decimal such as `-3.5`, `.5`, `3.` or `1e-3`.
///
/// Words that `f64::from_str` would accept (`inf`, `nan`, `infinity`) are
/// refused so they fall through to the synonym table.
fn parse_decimal(s: &str) -> Option<f64> {
    if s.is_empty() || !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e'))
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
