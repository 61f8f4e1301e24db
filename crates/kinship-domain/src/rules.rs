//! Relationship rule table
//!
//! Maps every [`RelationshipType`] to its inverse, whether it is symmetric,
//! and whether the writer should persist the inverse edge automatically.
//!
//! The table is immutable. Build it once with [`RuleTable::standard`] and hand
//! a reference to whatever needs it.
//!
//! Gendered and extended-family asymmetric pairs (aunt/niece, uncle/nephew,
//! father-in-law/son-in-law, ...) carry an inverse for display purposes but are
//! never auto-inverted: the correct counterpart depends on the other person's
//! gender or generation, which the engine does not know.

use crate::RelationshipType;
use std::collections::HashMap;

/// Per-type behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipRule {
    /// Type that holds from the target's viewpoint, if one is configured
    pub inverse: Option<RelationshipType>,

    /// Whether the type is its own inverse
    pub bidirectional: bool,

    /// Whether writing `(a, b, t)` also writes `(b, a, inverse)`
    pub auto_create_inverse: bool,
}

impl RelationshipRule {
    /// A type that reads the same from both sides
    pub fn symmetric(t: RelationshipType) -> Self {
        Self {
            inverse: Some(t),
            bidirectional: true,
            auto_create_inverse: true,
        }
    }

    /// A directional pair whose inverse is always correct
    pub fn paired(inverse: RelationshipType) -> Self {
        Self {
            inverse: Some(inverse),
            bidirectional: false,
            auto_create_inverse: true,
        }
    }

    /// A directional pair whose inverse is only a best guess
    pub fn display_only(inverse: RelationshipType) -> Self {
        Self {
            inverse: Some(inverse),
            bidirectional: false,
            auto_create_inverse: false,
        }
    }

    /// No inverse configured
    pub fn one_way() -> Self {
        Self {
            inverse: None,
            bidirectional: false,
            auto_create_inverse: false,
        }
    }
}

/// Immutable lookup from relationship type to [`RelationshipRule`]
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: HashMap<RelationshipType, RelationshipRule>,
}

impl RuleTable {
    /// The standard family rule set
    pub fn standard() -> Self {
        use RelationshipType::*;

        let mut rules = HashMap::with_capacity(RelationshipType::ALL.len());

        for t in [
            Sibling,
            Spouse,
            ExSpouse,
            Partner,
            Cousin,
            FirstCousin,
            SecondCousin,
            ThirdCousin,
            CousinOnceRemoved,
            CousinTwiceRemoved,
            StepSibling,
            SiblingInLaw,
        ] {
            rules.insert(t, RelationshipRule::symmetric(t));
        }

        for (a, b) in [
            (Parent, Child),
            (Grandparent, Grandchild),
            (GreatGrandparent, GreatGrandchild),
            (StepParent, StepChild),
            (ParentInLaw, ChildInLaw),
        ] {
            rules.insert(a, RelationshipRule::paired(b));
            rules.insert(b, RelationshipRule::paired(a));
        }

        for (a, b) in [
            (Aunt, Niece),
            (Uncle, Nephew),
            (GrandAunt, GrandNiece),
            (GrandUncle, GrandNephew),
            (GreatGrandAunt, GreatGrandNiece),
            (GreatGrandUncle, GreatGrandNephew),
            (FatherInLaw, SonInLaw),
            (MotherInLaw, DaughterInLaw),
            (Guardian, Ward),
            (Godparent, Godchild),
        ] {
            rules.insert(a, RelationshipRule::display_only(b));
            rules.insert(b, RelationshipRule::display_only(a));
        }

        rules.insert(BrotherInLaw, RelationshipRule::one_way());
        rules.insert(SisterInLaw, RelationshipRule::one_way());

        Self { rules }
    }

    /// Build a table from explicit rules; types left out behave as one-way
    pub fn from_rules(rules: impl IntoIterator<Item = (RelationshipType, RelationshipRule)>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Rule for `t`
    pub fn rule(&self, t: RelationshipType) -> RelationshipRule {
        self.rules
            .get(&t)
            .copied()
            .unwrap_or_else(RelationshipRule::one_way)
    }

    /// Configured inverse of `t`
    pub fn inverse(&self, t: RelationshipType) -> Option<RelationshipType> {
        self.rule(t).inverse
    }

    /// Inverse of `t`, falling back to `t` itself when none is configured
    ///
    /// An approximation for asymmetric types without a clean inverse.
    pub fn oriented_inverse(&self, t: RelationshipType) -> RelationshipType {
        self.inverse(t).unwrap_or(t)
    }

    /// Whether `t` is symmetric
    pub fn is_bidirectional(&self, t: RelationshipType) -> bool {
        self.rule(t).bidirectional
    }

    /// Whether writing `t` auto-creates the inverse edge
    pub fn auto_creates_inverse(&self, t: RelationshipType) -> bool {
        self.rule(t).auto_create_inverse
    }

    /// The inverse type the writer should persist, if any
    pub fn auto_inverse(&self, t: RelationshipType) -> Option<RelationshipType> {
        let rule = self.rule(t);
        if rule.auto_create_inverse {
            rule.inverse
        } else {
            None
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RelationshipType::*;

    #[test]
    fn test_every_type_has_a_rule() {
        let table = RuleTable::standard();
        for t in RelationshipType::ALL {
            assert!(table.rules.contains_key(&t), "missing rule for {}", t);
        }
    }

    #[test]
    fn test_direct_pairs() {
        let table = RuleTable::standard();
        assert_eq!(table.inverse(Parent), Some(Child));
        assert_eq!(table.inverse(Child), Some(Parent));
        assert!(table.auto_creates_inverse(Parent));
        assert!(!table.is_bidirectional(Parent));
    }

    #[test]
    fn test_symmetric_types() {
        let table = RuleTable::standard();
        for t in [Sibling, Spouse, Cousin, SecondCousin, StepSibling, SiblingInLaw] {
            assert_eq!(table.inverse(t), Some(t));
            assert!(table.is_bidirectional(t));
            assert_eq!(table.auto_inverse(t), Some(t));
        }
    }

    #[test]
    fn test_gendered_pairs_are_not_auto_inverted() {
        let table = RuleTable::standard();
        for t in [Aunt, Uncle, Niece, GrandAunt, SonInLaw, FatherInLaw, MotherInLaw] {
            assert!(table.inverse(t).is_some());
            assert!(!table.auto_creates_inverse(t));
            assert_eq!(table.auto_inverse(t), None);
        }
    }

    #[test]
    fn test_oriented_inverse_fallback() {
        let table = RuleTable::standard();
        assert_eq!(table.oriented_inverse(BrotherInLaw), BrotherInLaw);
        assert_eq!(table.oriented_inverse(Aunt), Niece);
    }

    #[test]
    fn test_custom_table_defaults_to_one_way() {
        let table = RuleTable::from_rules([(Parent, RelationshipRule::paired(Child))]);
        assert_eq!(table.inverse(Parent), Some(Child));
        assert_eq!(table.inverse(Child), None);
        assert!(!table.auto_creates_inverse(Child));
    }
}
