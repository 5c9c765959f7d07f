//! Industry profiles.
//!
//! A profile bundles the wording an industry uses for its people, work, and
//! money together with the design system that industry maps to.  The
//! dashboard composer uses the vocabulary for section titles and metric
//! labels; the shell selector uses the profile to pick a layout.  Like the
//! system registry, profiles are a fixed table with a generic fallback.

use crate::systems::DesignSystemId;

/// Domain wording for a single industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndustryVocabulary {
    /// What this industry calls the person it serves ("patient", "client").
    pub client_term: &'static str,
    /// What it calls a unit of work ("appointment", "job", "order").
    pub record_term: &'static str,
    /// What it calls the money document ("invoice", "estimate", "bill").
    pub money_term: &'static str,
}

/// A fixed per-industry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndustryProfile {
    /// Canonical industry id (matches the selector's industry table).
    pub id: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// The design system this industry maps to.
    pub system: DesignSystemId,
    /// Domain wording.
    pub vocabulary: IndustryVocabulary,
}

/// Fallback profile for industries without a dedicated entry.
pub static GENERIC: IndustryProfile = IndustryProfile {
    id: "general",
    display_name: "General",
    system: DesignSystemId::Modern,
    vocabulary: IndustryVocabulary {
        client_term: "customer",
        record_term: "record",
        money_term: "invoice",
    },
};

/// Profiles for the industries that get dedicated wording.
pub static PROFILES: [IndustryProfile; 14] = [
    IndustryProfile {
        id: "medical",
        display_name: "Medical",
        system: DesignSystemId::Care,
        vocabulary: IndustryVocabulary {
            client_term: "patient",
            record_term: "appointment",
            money_term: "bill",
        },
    },
    IndustryProfile {
        id: "dental",
        display_name: "Dental",
        system: DesignSystemId::Care,
        vocabulary: IndustryVocabulary {
            client_term: "patient",
            record_term: "appointment",
            money_term: "bill",
        },
    },
    IndustryProfile {
        id: "contractor",
        display_name: "Contractor",
        system: DesignSystemId::Industrial,
        vocabulary: IndustryVocabulary {
            client_term: "client",
            record_term: "job",
            money_term: "estimate",
        },
    },
    IndustryProfile {
        id: "construction",
        display_name: "Construction",
        system: DesignSystemId::Industrial,
        vocabulary: IndustryVocabulary {
            client_term: "client",
            record_term: "project",
            money_term: "estimate",
        },
    },
    IndustryProfile {
        id: "salon",
        display_name: "Salon",
        system: DesignSystemId::Luxury,
        vocabulary: IndustryVocabulary {
            client_term: "client",
            record_term: "appointment",
            money_term: "invoice",
        },
    },
    IndustryProfile {
        id: "spa",
        display_name: "Spa",
        system: DesignSystemId::Luxury,
        vocabulary: IndustryVocabulary {
            client_term: "guest",
            record_term: "booking",
            money_term: "invoice",
        },
    },
    IndustryProfile {
        id: "fitness",
        display_name: "Fitness",
        system: DesignSystemId::Energy,
        vocabulary: IndustryVocabulary {
            client_term: "member",
            record_term: "session",
            money_term: "membership fee",
        },
    },
    IndustryProfile {
        id: "restaurant",
        display_name: "Restaurant",
        system: DesignSystemId::Craft,
        vocabulary: IndustryVocabulary {
            client_term: "guest",
            record_term: "order",
            money_term: "check",
        },
    },
    IndustryProfile {
        id: "legal",
        display_name: "Legal",
        system: DesignSystemId::Trust,
        vocabulary: IndustryVocabulary {
            client_term: "client",
            record_term: "case",
            money_term: "invoice",
        },
    },
    IndustryProfile {
        id: "finance",
        display_name: "Finance",
        system: DesignSystemId::Trust,
        vocabulary: IndustryVocabulary {
            client_term: "client",
            record_term: "account",
            money_term: "statement",
        },
    },
    IndustryProfile {
        id: "real-estate",
        display_name: "Real Estate",
        system: DesignSystemId::Trust,
        vocabulary: IndustryVocabulary {
            client_term: "client",
            record_term: "listing",
            money_term: "commission",
        },
    },
    IndustryProfile {
        id: "photography",
        display_name: "Photography",
        system: DesignSystemId::Expressive,
        vocabulary: IndustryVocabulary {
            client_term: "client",
            record_term: "shoot",
            money_term: "invoice",
        },
    },
    IndustryProfile {
        id: "education",
        display_name: "Education",
        system: DesignSystemId::Friendly,
        vocabulary: IndustryVocabulary {
            client_term: "student",
            record_term: "lesson",
            money_term: "tuition",
        },
    },
    IndustryProfile {
        id: "technology",
        display_name: "Technology",
        system: DesignSystemId::Modern,
        vocabulary: IndustryVocabulary {
            client_term: "user",
            record_term: "ticket",
            money_term: "invoice",
        },
    },
];

/// Look up the profile for an industry, falling back to [`GENERIC`].
///
/// Uses the same normalization as the industry → system table.
pub fn profile_for_industry(industry: &str) -> &'static IndustryProfile {
    let normalized = industry.trim().to_lowercase().replace([' ', '_'], "-");
    PROFILES
        .iter()
        .find(|p| p.id == normalized)
        .unwrap_or(&GENERIC)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::industry_system_id;

    #[test]
    fn medical_profile_speaks_patient() {
        let profile = profile_for_industry("medical");
        assert_eq!(profile.vocabulary.client_term, "patient");
        assert_eq!(profile.vocabulary.record_term, "appointment");
        assert_eq!(profile.system, DesignSystemId::Care);
    }

    #[test]
    fn unknown_industry_falls_back_to_generic() {
        let profile = profile_for_industry("unknown-xyz");
        assert_eq!(profile.id, "general");
        assert_eq!(profile.vocabulary.client_term, "customer");
    }

    #[test]
    fn lookup_normalizes_input() {
        assert_eq!(profile_for_industry("Real Estate").id, "real-estate");
        assert_eq!(profile_for_industry("MEDICAL").id, "medical");
    }

    #[test]
    fn profile_systems_agree_with_the_selector_table() {
        for profile in &PROFILES {
            assert_eq!(
                profile.system,
                industry_system_id(profile.id),
                "profile {} disagrees with the industry table",
                profile.id
            );
        }
    }

    #[test]
    fn profile_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for profile in &PROFILES {
            assert!(seen.insert(profile.id), "duplicate profile id {}", profile.id);
        }
    }
}
