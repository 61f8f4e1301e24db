//! Relationship module - directed, pairwise assertions between people

use crate::PersonId;
use std::fmt;

/// Unique identifier for a stored relationship edge, based on UUIDv7
///
/// UUIDv7 keeps ids chronologically sortable, so edges listed by id come
/// back in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationshipId(u128);

impl RelationshipId {
    /// Generate a new UUIDv7-based RelationshipId
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::RelationshipId;
    ///
    /// let id = RelationshipId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RelationshipId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RelationshipId from its hyphenated UUID form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid relationship id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Millisecond timestamp embedded in the UUIDv7
    pub fn timestamp(&self) -> u64 {
        (self.0 >> 80) as u64
    }
}

impl Default for RelationshipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl std::str::FromStr for RelationshipId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Family a relationship type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipCategory {
    /// parent, child, sibling
    Direct,
    /// spouse, ex-spouse, partner
    Spousal,
    /// grand-*, aunt/uncle/niece/nephew variants, cousins
    Extended,
    /// step-relations
    Step,
    /// in-law relations, generic and gendered
    InLaw,
    /// guardian/ward, godparent/godchild
    Other,
}

impl RelationshipCategory {
    /// Lowercase category name
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipCategory::Direct => "direct",
            RelationshipCategory::Spousal => "spousal",
            RelationshipCategory::Extended => "extended",
            RelationshipCategory::Step => "step",
            RelationshipCategory::InLaw => "in_law",
            RelationshipCategory::Other => "other",
        }
    }
}

/// Closed set of relationship labels
///
/// A stored edge `(a, b, t)` reads "a is the `t` of b": `(alice, bob, Parent)`
/// means Alice is Bob's parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum RelationshipType {
    // Direct
    Parent,
    Child,
    Sibling,

    // Spousal
    Spouse,
    ExSpouse,
    Partner,

    // Extended
    Grandparent,
    Grandchild,
    GreatGrandparent,
    GreatGrandchild,
    Aunt,
    Uncle,
    Niece,
    Nephew,
    GrandAunt,
    GrandUncle,
    GrandNiece,
    GrandNephew,
    GreatGrandAunt,
    GreatGrandUncle,
    GreatGrandNiece,
    GreatGrandNephew,
    Cousin,
    FirstCousin,
    SecondCousin,
    ThirdCousin,
    CousinOnceRemoved,
    CousinTwiceRemoved,

    // Step
    StepParent,
    StepChild,
    StepSibling,

    // In-law
    ParentInLaw,
    ChildInLaw,
    SiblingInLaw,
    MotherInLaw,
    FatherInLaw,
    SonInLaw,
    DaughterInLaw,
    BrotherInLaw,
    SisterInLaw,

    // Other
    Guardian,
    Ward,
    Godparent,
    Godchild,
}

impl RelationshipType {
    /// Every relationship type, in declaration order
    pub const ALL: [RelationshipType; 44] = [
        RelationshipType::Parent,
        RelationshipType::Child,
        RelationshipType::Sibling,
        RelationshipType::Spouse,
        RelationshipType::ExSpouse,
        RelationshipType::Partner,
        RelationshipType::Grandparent,
        RelationshipType::Grandchild,
        RelationshipType::GreatGrandparent,
        RelationshipType::GreatGrandchild,
        RelationshipType::Aunt,
        RelationshipType::Uncle,
        RelationshipType::Niece,
        RelationshipType::Nephew,
        RelationshipType::GrandAunt,
        RelationshipType::GrandUncle,
        RelationshipType::GrandNiece,
        RelationshipType::GrandNephew,
        RelationshipType::GreatGrandAunt,
        RelationshipType::GreatGrandUncle,
        RelationshipType::GreatGrandNiece,
        RelationshipType::GreatGrandNephew,
        RelationshipType::Cousin,
        RelationshipType::FirstCousin,
        RelationshipType::SecondCousin,
        RelationshipType::ThirdCousin,
        RelationshipType::CousinOnceRemoved,
        RelationshipType::CousinTwiceRemoved,
        RelationshipType::StepParent,
        RelationshipType::StepChild,
        RelationshipType::StepSibling,
        RelationshipType::ParentInLaw,
        RelationshipType::ChildInLaw,
        RelationshipType::SiblingInLaw,
        RelationshipType::MotherInLaw,
        RelationshipType::FatherInLaw,
        RelationshipType::SonInLaw,
        RelationshipType::DaughterInLaw,
        RelationshipType::BrotherInLaw,
        RelationshipType::SisterInLaw,
        RelationshipType::Guardian,
        RelationshipType::Ward,
        RelationshipType::Godparent,
        RelationshipType::Godchild,
    ];

    /// Storage label (snake_case)
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Parent => "parent",
            RelationshipType::Child => "child",
            RelationshipType::Sibling => "sibling",
            RelationshipType::Spouse => "spouse",
            RelationshipType::ExSpouse => "ex_spouse",
            RelationshipType::Partner => "partner",
            RelationshipType::Grandparent => "grandparent",
            RelationshipType::Grandchild => "grandchild",
            RelationshipType::GreatGrandparent => "great_grandparent",
            RelationshipType::GreatGrandchild => "great_grandchild",
            RelationshipType::Aunt => "aunt",
            RelationshipType::Uncle => "uncle",
            RelationshipType::Niece => "niece",
            RelationshipType::Nephew => "nephew",
            RelationshipType::GrandAunt => "grand_aunt",
            RelationshipType::GrandUncle => "grand_uncle",
            RelationshipType::GrandNiece => "grand_niece",
            RelationshipType::GrandNephew => "grand_nephew",
            RelationshipType::GreatGrandAunt => "great_grand_aunt",
            RelationshipType::GreatGrandUncle => "great_grand_uncle",
            RelationshipType::GreatGrandNiece => "great_grand_niece",
            RelationshipType::GreatGrandNephew => "great_grand_nephew",
            RelationshipType::Cousin => "cousin",
            RelationshipType::FirstCousin => "first_cousin",
            RelationshipType::SecondCousin => "second_cousin",
            RelationshipType::ThirdCousin => "third_cousin",
            RelationshipType::CousinOnceRemoved => "cousin_once_removed",
            RelationshipType::CousinTwiceRemoved => "cousin_twice_removed",
            RelationshipType::StepParent => "step_parent",
            RelationshipType::StepChild => "step_child",
            RelationshipType::StepSibling => "step_sibling",
            RelationshipType::ParentInLaw => "parent_in_law",
            RelationshipType::ChildInLaw => "child_in_law",
            RelationshipType::SiblingInLaw => "sibling_in_law",
            RelationshipType::MotherInLaw => "mother_in_law",
            RelationshipType::FatherInLaw => "father_in_law",
            RelationshipType::SonInLaw => "son_in_law",
            RelationshipType::DaughterInLaw => "daughter_in_law",
            RelationshipType::BrotherInLaw => "brother_in_law",
            RelationshipType::SisterInLaw => "sister_in_law",
            RelationshipType::Guardian => "guardian",
            RelationshipType::Ward => "ward",
            RelationshipType::Godparent => "godparent",
            RelationshipType::Godchild => "godchild",
        }
    }

    /// Parse a relationship type
    ///
    /// Case-insensitive; `-` and spaces are accepted in place of `_`.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
    }

    /// Human-readable label, e.g. "Great-Grand-Aunt" or "Cousin Once Removed"
    pub fn label(&self) -> String {
        let separator = if self.as_str().contains("cousin") { " " } else { "-" };
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Family this type belongs to
    pub fn category(&self) -> RelationshipCategory {
        use RelationshipType::*;
        match self {
            Parent | Child | Sibling => RelationshipCategory::Direct,
            Spouse | ExSpouse | Partner => RelationshipCategory::Spousal,
            StepParent | StepChild | StepSibling => RelationshipCategory::Step,
            ParentInLaw | ChildInLaw | SiblingInLaw | MotherInLaw | FatherInLaw | SonInLaw
            | DaughterInLaw | BrotherInLaw | SisterInLaw => RelationshipCategory::InLaw,
            Guardian | Ward | Godparent | Godchild => RelationshipCategory::Other,
            _ => RelationshipCategory::Extended,
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown relationship type: {}", s))
    }
}

/// Optional metadata attached to a relationship at write time
///
/// The writer copies these onto both the primary edge and any auto-created
/// inverse edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipOptions {
    /// Free-text qualifier such as "maternal" or "adoptive"
    pub subtype: Option<String>,

    /// When the relationship began (free-text ISO date)
    pub start_date: Option<String>,

    /// When the relationship ended (free-text ISO date)
    pub end_date: Option<String>,

    /// Free-form notes
    pub notes: Option<String>,

    /// Actor recorded as the creator
    pub created_by: Option<String>,
}

/// A stored relationship edge
///
/// Edges are directed in storage: `person_a_id` is the `relationship_type`
/// of `person_b_id`. Many types are semantically symmetric; the rule table
/// decides how an edge reads from the other side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyRelationship {
    /// Unique edge identifier
    pub relationship_id: RelationshipId,

    /// Source person
    pub person_a_id: PersonId,

    /// Target person
    pub person_b_id: PersonId,

    /// What the source is to the target
    pub relationship_type: RelationshipType,

    /// Free-text qualifier ("maternal", "adoptive", ...)
    pub relationship_subtype: Option<String>,

    /// Free-text ISO start date
    pub start_date: Option<String>,

    /// Free-text ISO end date
    pub end_date: Option<String>,

    /// Stored but not enforced by reads
    pub is_active: bool,

    /// Free-form notes
    pub notes: Option<String>,

    /// Seconds since Unix epoch
    pub created_date: u64,

    /// Actor that created the edge
    pub created_by: Option<String>,
}

impl FamilyRelationship {
    /// Create a new active edge with a fresh id
    pub fn new(
        person_a_id: PersonId,
        person_b_id: PersonId,
        relationship_type: RelationshipType,
        options: &RelationshipOptions,
        created_date: u64,
    ) -> Self {
        Self {
            relationship_id: RelationshipId::new(),
            person_a_id,
            person_b_id,
            relationship_type,
            relationship_subtype: options.subtype.clone(),
            start_date: options.start_date.clone(),
            end_date: options.end_date.clone(),
            is_active: true,
            notes: options.notes.clone(),
            created_date,
            created_by: options.created_by.clone(),
        }
    }

    /// Whether either endpoint is `id`
    pub fn touches(&self, id: &PersonId) -> bool {
        &self.person_a_id == id || &self.person_b_id == id
    }

    /// The endpoint that is not `id`, if the edge touches `id`
    pub fn other_party(&self, id: &PersonId) -> Option<&PersonId> {
        if &self.person_a_id == id {
            Some(&self.person_b_id)
        } else if &self.person_b_id == id {
            Some(&self.person_a_id)
        } else {
            None
        }
    }

    /// Whether the edge joins `a` and `b`, in either direction
    pub fn connects(&self, a: &PersonId, b: &PersonId) -> bool {
        (&self.person_a_id == a && &self.person_b_id == b)
            || (&self.person_a_id == b && &self.person_b_id == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_id_chronological() {
        let id1 = RelationshipId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RelationshipId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
        assert!(id1.timestamp() <= id2.timestamp());
    }

    #[test]
    fn test_relationship_id_display_and_parse() {
        let id = RelationshipId::new();
        let id_str = id.to_string();
        assert_eq!(id_str.len(), 36);
        assert_eq!(RelationshipId::from_string(&id_str).unwrap(), id);
        assert!(RelationshipId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(RelationshipType::parse("Parent"), Some(RelationshipType::Parent));
        assert_eq!(
            RelationshipType::parse("great-grand-aunt"),
            Some(RelationshipType::GreatGrandAunt)
        );
        assert_eq!(
            RelationshipType::parse("son in law"),
            Some(RelationshipType::SonInLaw)
        );
        assert_eq!(RelationshipType::parse("best_friend"), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(RelationshipType::GreatGrandAunt.label(), "Great-Grand-Aunt");
        assert_eq!(RelationshipType::CousinOnceRemoved.label(), "Cousin Once Removed");
        assert_eq!(RelationshipType::ExSpouse.label(), "Ex-Spouse");
        assert_eq!(RelationshipType::Parent.label(), "Parent");
    }

    #[test]
    fn test_categories() {
        assert_eq!(RelationshipType::Sibling.category(), RelationshipCategory::Direct);
        assert_eq!(RelationshipType::Partner.category(), RelationshipCategory::Spousal);
        assert_eq!(RelationshipType::ThirdCousin.category(), RelationshipCategory::Extended);
        assert_eq!(RelationshipType::StepSibling.category(), RelationshipCategory::Step);
        assert_eq!(RelationshipType::SisterInLaw.category(), RelationshipCategory::InLaw);
        assert_eq!(RelationshipType::Godchild.category(), RelationshipCategory::Other);
    }

    #[test]
    fn test_edge_helpers() {
        let a = PersonId::from("a");
        let b = PersonId::from("b");
        let c = PersonId::from("c");
        let edge = FamilyRelationship::new(
            a.clone(),
            b.clone(),
            RelationshipType::Parent,
            &RelationshipOptions::default(),
            1000,
        );

        assert!(edge.is_active);
        assert!(edge.touches(&a) && edge.touches(&b) && !edge.touches(&c));
        assert_eq!(edge.other_party(&a), Some(&b));
        assert_eq!(edge.other_party(&b), Some(&a));
        assert_eq!(edge.other_party(&c), None);
        assert!(edge.connects(&b, &a));
        assert!(!edge.connects(&a, &c));
    }
}
