//! Inputs shared by every classification rule, and the rule runner.

use mf_core::{TagDocument, TrackDocument};

/// Everything a rule may look at. Borrowed; rules never mutate it.
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    pub tags: &'a TagDocument,
    pub tracks: &'a TrackDocument,
    /// The already-resolved MIME type.
    pub mime: &'a str,
}

impl<'a> Evidence<'a> {
    pub fn new(tags: &'a TagDocument, tracks: &'a TrackDocument, mime: &'a str) -> Self {
        Self { tags, tracks, mime }
    }
}

/// Outcome of a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The rule found positive evidence.
    Yes,
    /// The rule applied but found nothing.
    No,
    /// The rule's precondition (usually a MIME gate) did not hold.
    NotApplicable,
}

impl Verdict {
    pub fn from_bool(b: bool) -> Self {
        if b {
            Verdict::Yes
        } else {
            Verdict::No
        }
    }

    pub fn is_yes(self) -> bool {
        self == Verdict::Yes
    }
}

/// A named predicate over [`Evidence`].
pub type Rule = (&'static str, fn(&Evidence<'_>) -> Verdict);

/// Evaluate `rules` in order and return the name of the first one that says
/// [`Verdict::Yes`]. Later rules are not evaluated.
pub fn first_match(rules: &[Rule], evidence: &Evidence<'_>) -> Option<&'static str> {
    rules
        .iter()
        .find(|(_, rule)| rule(evidence).is_yes())
        .map(|(name, _)| *name)
}
