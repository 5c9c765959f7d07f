//! Design system selection.
//!
//! Two deterministic entry points:
//!
//! 1. [`for_industry`] maps a known industry id straight to a system.
//! 2. [`by_intent`] / [`by_text`] score keyword hits against each
//!    category's fixed vocabulary and pick the highest-scoring system,
//!    breaking ties in category priority order.
//!
//! Unknown industries and unmatched keywords fall back to the tech-modern
//! default.  Results never vary between calls; there is no randomness and
//! no blending of systems.

use std::sync::OnceLock;

use aho_corasick::AhoCorasick;
use tracing::debug;

use crate::systems::{DesignSystem, DesignSystemId, system};

// ---------------------------------------------------------------------------
// Industry lookup
// ---------------------------------------------------------------------------

/// Select the design system for an industry id.
///
/// Matching is case-insensitive and tolerant of space/underscore separators
/// (`"Real Estate"` and `"real-estate"` resolve identically).  Unknown
/// industries get the tech-modern default.
pub fn for_industry(industry: &str) -> &'static DesignSystem {
    let id = industry_system_id(industry);
    debug!(industry = %industry, system = %id, "design system selected for industry");
    system(id)
}

/// The industry → system table behind [`for_industry`].
pub fn industry_system_id(industry: &str) -> DesignSystemId {
    match normalize(industry).as_str() {
        "finance" | "banking" | "accounting" | "legal" | "law" | "insurance" | "consulting"
        | "real-estate" | "property-management" => DesignSystemId::Trust,

        "medical" | "healthcare" | "health" | "dental" | "therapy" | "clinic" | "veterinary"
        | "wellness" | "pharmacy" | "counseling" => DesignSystemId::Care,

        "contractor" | "construction" | "plumbing" | "hvac" | "electrical" | "roofing"
        | "landscaping" | "manufacturing" | "logistics" | "automotive" | "trades" => {
            DesignSystemId::Industrial
        }

        "restaurant" | "bakery" | "cafe" | "catering" | "florist" | "artisan" | "brewery"
        | "farm" | "food" => DesignSystemId::Craft,

        "technology" | "tech" | "software" | "saas" | "startup" | "it" => DesignSystemId::Modern,

        "salon" | "spa" | "jewelry" | "boutique" | "luxury" | "beauty" => DesignSystemId::Luxury,

        "education" | "tutoring" | "daycare" | "childcare" | "pets" | "pet-care" | "nonprofit"
        | "community" | "church" => DesignSystemId::Friendly,

        "analytics" | "engineering" | "research" | "laboratory" | "data" | "science" => {
            DesignSystemId::Precision
        }

        "design" | "photography" | "art" | "media" | "marketing" | "agency" | "entertainment" => {
            DesignSystemId::Expressive
        }

        "fitness" | "gym" | "sports" | "events" | "nightlife" | "dance" | "crossfit" => {
            DesignSystemId::Energy
        }

        _ => DesignSystemId::Modern,
    }
}

fn normalize(industry: &str) -> String {
    industry
        .trim()
        .to_lowercase()
        .replace([' ', '_'], "-")
}

// ---------------------------------------------------------------------------
// Keyword matching
// ---------------------------------------------------------------------------

/// Per-category vocabularies, in category priority order.  A word may only
/// appear in one category.
static VOCABULARIES: [(DesignSystemId, &[&str]); 10] = [
    (
        DesignSystemId::Trust,
        &[
            "trust",
            "secure",
            "security",
            "professional",
            "reliable",
            "finance",
            "financial",
            "bank",
            "legal",
            "insurance",
            "compliance",
            "audit",
        ],
    ),
    (
        DesignSystemId::Care,
        &[
            "care", "health", "healing", "wellness", "gentle", "calm", "medical", "patient",
            "therapy", "clinic", "soothing",
        ],
    ),
    (
        DesignSystemId::Industrial,
        &[
            "industrial",
            "rugged",
            "heavy",
            "construction",
            "contractor",
            "durable",
            "tough",
            "machinery",
            "fleet",
            "crew",
        ],
    ),
    (
        DesignSystemId::Craft,
        &[
            "craft", "handmade", "artisan", "warm", "cozy", "rustic", "organic", "bakery",
            "homemade", "local",
        ],
    ),
    (
        DesignSystemId::Modern,
        &[
            "modern",
            "tech",
            "startup",
            "clean",
            "minimal",
            "sleek",
            "digital",
            "innovative",
            "software",
            "app",
        ],
    ),
    (
        DesignSystemId::Luxury,
        &[
            "luxury",
            "premium",
            "elegant",
            "exclusive",
            "boutique",
            "bespoke",
            "upscale",
            "refined",
            "gold",
        ],
    ),
    (
        DesignSystemId::Friendly,
        &[
            "friendly",
            "fun",
            "playful",
            "welcoming",
            "community",
            "family",
            "kids",
            "approachable",
            "bright",
        ],
    ),
    (
        DesignSystemId::Precision,
        &[
            "precision",
            "data",
            "analytics",
            "metrics",
            "engineering",
            "accurate",
            "technical",
            "dashboard",
            "scientific",
        ],
    ),
    (
        DesignSystemId::Expressive,
        &[
            "creative",
            "bold",
            "artistic",
            "vibrant",
            "expressive",
            "studio",
            "design",
            "colorful",
            "unique",
        ],
    ),
    (
        DesignSystemId::Energy,
        &[
            "energy", "dynamic", "fast", "active", "fitness", "sport", "intense", "power",
            "motion", "gym",
        ],
    ),
];

/// Pick the design system whose vocabulary matches the most keywords.
///
/// Keywords are compared whole (case-insensitive).  Ties go to the earlier
/// category; no match at all gives the tech-modern default.
pub fn by_intent(keywords: &[&str]) -> DesignSystemId {
    let mut counts = [0usize; 10];
    for keyword in keywords {
        let word = keyword.trim().to_lowercase();
        for (i, (_, vocab)) in VOCABULARIES.iter().enumerate() {
            if vocab.contains(&word.as_str()) {
                counts[i] += 1;
                break;
            }
        }
    }
    pick(&counts, keywords.len())
}

/// Scan free text for vocabulary words and pick the best-matching system.
///
/// Used when only a raw utterance is available.  Matches must fall on word
/// boundaries so that e.g. `"database"` does not count as a hit for
/// `"data"`.
pub fn by_text(text: &str) -> DesignSystemId {
    let (matcher, owners) = vocabulary_matcher();
    let lowered = text.to_lowercase();
    let bytes = lowered.as_bytes();

    let mut counts = [0usize; 10];
    for mat in matcher.find_overlapping_iter(&lowered) {
        let before_ok = mat.start() == 0 || !bytes[mat.start() - 1].is_ascii_alphanumeric();
        let after_ok = mat.end() == bytes.len() || !bytes[mat.end()].is_ascii_alphanumeric();
        if before_ok && after_ok {
            counts[owners[mat.pattern().as_usize()]] += 1;
        }
    }
    pick(&counts, 1)
}

/// The compiled vocabulary automaton plus a pattern → category index map.
fn vocabulary_matcher() -> &'static (AhoCorasick, Vec<usize>) {
    static MATCHER: OnceLock<(AhoCorasick, Vec<usize>)> = OnceLock::new();
    MATCHER.get_or_init(|| {
        let mut patterns = Vec::new();
        let mut owners = Vec::new();
        for (i, (_, vocab)) in VOCABULARIES.iter().enumerate() {
            for word in *vocab {
                patterns.push(*word);
                owners.push(i);
            }
        }
        let ac = AhoCorasick::new(&patterns).expect("vocabulary automaton builds");
        (ac, owners)
    })
}

fn pick(counts: &[usize; 10], input_len: usize) -> DesignSystemId {
    let mut best_idx = None;
    let mut best_count = 0usize;
    for (i, &count) in counts.iter().enumerate() {
        if count > best_count {
            best_count = count;
            best_idx = Some(i);
        }
    }

    match best_idx {
        Some(i) => {
            let id = VOCABULARIES[i].0;
            debug!(system = %id, hits = best_count, "design system matched by keywords");
            id
        }
        None => {
            if input_len > 0 {
                debug!("no vocabulary hits, defaulting to modern");
            }
            DesignSystemId::Modern
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medical_is_always_teal() {
        for _ in 0..3 {
            assert_eq!(for_industry("medical").light.primary, "#0d9488");
        }
    }

    #[test]
    fn contractor_is_always_slate() {
        for _ in 0..3 {
            assert_eq!(for_industry("contractor").light.primary, "#1e293b");
        }
    }

    #[test]
    fn unknown_industry_gets_the_default() {
        assert_eq!(for_industry("unknown-xyz").id, DesignSystemId::Modern);
        assert_eq!(for_industry("").id, DesignSystemId::Modern);
    }

    #[test]
    fn industry_lookup_normalizes_separators_and_case() {
        assert_eq!(industry_system_id("Real Estate"), DesignSystemId::Trust);
        assert_eq!(industry_system_id("REAL_ESTATE"), DesignSystemId::Trust);
        assert_eq!(industry_system_id("  hvac "), DesignSystemId::Industrial);
    }

    #[test]
    fn by_intent_counts_hits() {
        assert_eq!(
            by_intent(&["gentle", "calm", "secure"]),
            DesignSystemId::Care
        );
        assert_eq!(by_intent(&["luxury"]), DesignSystemId::Luxury);
    }

    #[test]
    fn by_intent_tie_goes_to_earlier_category() {
        // One Trust hit, one Energy hit: Trust is declared first.
        assert_eq!(by_intent(&["secure", "dynamic"]), DesignSystemId::Trust);
    }

    #[test]
    fn by_intent_defaults_to_modern() {
        assert_eq!(by_intent(&[]), DesignSystemId::Modern);
        assert_eq!(by_intent(&["zebra", "quux"]), DesignSystemId::Modern);
    }

    #[test]
    fn by_text_respects_word_boundaries() {
        // "database" must not count as a "data" hit.
        assert_eq!(by_text("our database app"), DesignSystemId::Modern);
        assert_eq!(by_text("a data dashboard"), DesignSystemId::Precision);
    }

    #[test]
    fn by_text_scores_whole_words() {
        assert_eq!(
            by_text("a warm cozy handmade goods shop"),
            DesignSystemId::Craft
        );
    }

    #[test]
    fn vocabulary_words_are_unique_across_categories() {
        let mut seen = std::collections::HashSet::new();
        for (_, vocab) in &VOCABULARIES {
            for word in *vocab {
                assert!(seen.insert(*word), "duplicate vocabulary word: {word}");
            }
        }
    }
}
