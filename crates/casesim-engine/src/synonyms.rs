//! Abbreviation and synonym groups for diagnosis names.
//!
//! A learner may write "CTS", "carpal tunnel" or "median neuropathy at the
//! wrist" for the same diagnosis. Two texts agree when both mention the same
//! group. Abbreviations are matched as whole words so that "ms" does not
//! fire inside "symptoms"; phrases are matched as substrings.

/// One abbreviation and the phrases that mean the same diagnosis.
#[derive(Debug, Clone, Copy)]
pub struct SynonymGroup {
    pub abbreviation: &'static str,
    pub phrases: &'static [&'static str],
}

impl SynonymGroup {
    /// Whether lower-cased `text` mentions this group.
    pub fn mentioned_in(&self, text: &str) -> bool {
        contains_word(text, self.abbreviation)
            || self.phrases.iter().any(|phrase| text.contains(phrase))
    }
}

static SYNONYMS: &[SynonymGroup] = &[
    SynonymGroup {
        abbreviation: "cts",
        phrases: &[
            "carpal tunnel",
            "carpal tunnel syndrome",
            "median neuropathy at the wrist",
            "median neuropathy at wrist",
            "median mononeuropathy at the wrist",
            "median mononeuropathy at wrist",
            "median nerve entrapment at the wrist",
        ],
    },
    SynonymGroup {
        abbreviation: "une",
        phrases: &[
            "cubital tunnel",
            "ulnar neuropathy at the elbow",
            "ulnar neuropathy at elbow",
            "ulnar mononeuropathy at the elbow",
            "ulnar nerve entrapment at the elbow",
        ],
    },
    SynonymGroup {
        abbreviation: "cpn",
        phrases: &[
            "fibular neuropathy",
            "peroneal neuropathy",
            "common fibular neuropathy",
            "common peroneal neuropathy",
            "peroneal palsy",
            "fibular neuropathy at the fibular head",
        ],
    },
    SynonymGroup {
        abbreviation: "tts",
        phrases: &["tarsal tunnel", "tibial neuropathy at the ankle"],
    },
    SynonymGroup {
        abbreviation: "tos",
        phrases: &["thoracic outlet"],
    },
    SynonymGroup {
        abbreviation: "lss",
        phrases: &[
            "lumbar spinal stenosis",
            "lumbar stenosis",
            "spinal stenosis",
            "neurogenic claudication",
        ],
    },
    SynonymGroup {
        abbreviation: "als",
        phrases: &[
            "amyotrophic lateral sclerosis",
            "motor neuron disease",
            "motor neurone disease",
            "lou gehrig",
        ],
    },
    SynonymGroup {
        abbreviation: "gbs",
        phrases: &[
            "guillain-barre",
            "guillain barre",
            "guillain-barré",
            "acute inflammatory demyelinating",
            "aidp",
        ],
    },
    SynonymGroup {
        abbreviation: "cidp",
        phrases: &["chronic inflammatory demyelinating"],
    },
    SynonymGroup {
        abbreviation: "dpn",
        phrases: &[
            "peripheral neuropathy",
            "polyneuropathy",
            "diabetic neuropathy",
            "length-dependent neuropathy",
            "length dependent neuropathy",
        ],
    },
    SynonymGroup {
        abbreviation: "mg",
        phrases: &["myasthenia gravis", "myasthenia"],
    },
    SynonymGroup {
        abbreviation: "ms",
        phrases: &["multiple sclerosis"],
    },
    SynonymGroup {
        abbreviation: "cva",
        phrases: &["stroke", "cerebrovascular accident"],
    },
    SynonymGroup {
        abbreviation: "pf",
        phrases: &["plantar fasciitis", "plantar fasciopathy"],
    },
];

/// The full synonym table.
pub fn synonym_groups() -> &'static [SynonymGroup] {
    SYNONYMS
}

/// Groups mentioned by lower-cased `text`.
pub fn groups_in(text: &str) -> impl Iterator<Item = &'static SynonymGroup> + '_ {
    SYNONYMS.iter().filter(move |group| group.mentioned_in(text))
}

/// Whether both lower-cased texts mention at least one common group.
pub fn share_group(a: &str, b: &str) -> bool {
    groups_in(a).any(|group| group.mentioned_in(b))
}

/// Whole-word containment: the match may not be flanked by letters or digits.
fn contains_word(text: &str, word: &str) -> bool {
    text.match_indices(word).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
