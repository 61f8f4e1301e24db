//! Integration tests for kinship-store
//!
//! These tests verify the full CRUD cycle for relationship edges and persons.

use kinship_domain::traits::{EdgeFilter, PersonRegistry, RelationshipStore};
use kinship_domain::{
    FamilyRelationship, Person, PersonId, RelationshipOptions, RelationshipType,
};
use kinship_store::{SqliteStore, StoreError};

fn edge(a: &str, b: &str, t: RelationshipType) -> FamilyRelationship {
    FamilyRelationship::new(a.into(), b.into(), t, &RelationshipOptions::default(), 1000)
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_put_and_scan_edge() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let options = RelationshipOptions {
        subtype: Some("maternal".to_string()),
        start_date: Some("1990-04-01".to_string()),
        end_date: None,
        notes: Some("from the family bible".to_string()),
        created_by: Some("user-1".to_string()),
    };
    let original = FamilyRelationship::new(
        "alice".into(),
        "bob".into(),
        RelationshipType::Parent,
        &options,
        1234,
    );

    store.put(original.clone()).unwrap();

    let edges = store.scan(&EdgeFilter::all()).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0], original, "All fields should survive storage");
}

#[test]
fn test_duplicate_id_rejected() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let e = edge("a", "b", RelationshipType::Sibling);

    store.put(e.clone()).unwrap();
    let result = store.put(e);
    assert!(matches!(result, Err(StoreError::Duplicate(_))));
}

#[test]
fn test_scan_touching_matches_both_ends() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.put(edge("a", "b", RelationshipType::Parent)).unwrap();
    store.put(edge("b", "c", RelationshipType::Parent)).unwrap();
    store.put(edge("c", "d", RelationshipType::Parent)).unwrap();

    let touching_b = store.scan(&EdgeFilter::touching(&PersonId::from("b"))).unwrap();
    assert_eq!(touching_b.len(), 2);
    assert!(touching_b.iter().all(|e| e.touches(&PersonId::from("b"))));
}

#[test]
fn test_scan_by_type_and_active() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.put(edge("a", "b", RelationshipType::Parent)).unwrap();
    store.put(edge("a", "c", RelationshipType::Spouse)).unwrap();

    let mut ended = edge("a", "d", RelationshipType::Spouse);
    ended.is_active = false;
    store.put(ended).unwrap();

    let spouses = store
        .scan(&EdgeFilter::all().with_type(RelationshipType::Spouse))
        .unwrap();
    assert_eq!(spouses.len(), 2);

    let active_spouses = store
        .scan(&EdgeFilter {
            active_only: true,
            ..EdgeFilter::all().with_type(RelationshipType::Spouse)
        })
        .unwrap();
    assert_eq!(active_spouses.len(), 1);
    assert_eq!(active_spouses[0].person_b_id, PersonId::from("c"));
}

#[test]
fn test_delete_by_id() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let e = edge("a", "b", RelationshipType::Cousin);
    let id = e.relationship_id;
    store.put(e).unwrap();

    assert!(store.delete_by_id(id).unwrap());
    assert!(!store.delete_by_id(id).unwrap(), "Second delete finds nothing");
    assert_eq!(store.count_relationships().unwrap(), 0);
}

#[test]
fn test_person_registry() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .upsert_person(&Person::new("p1", "Ada", "Lovelace").with_photo("ada.jpg"))
        .unwrap();
    store.upsert_person(&Person::new("p2", "Charles", "Babbage")).unwrap();
    store.upsert_person(&Person::new("p3", "Mary", "Somerville")).unwrap();

    let ada = store.get_person(&PersonId::from("p1")).unwrap().unwrap();
    assert_eq!(ada.full_name(), "Ada Lovelace");
    assert_eq!(ada.profile_photo.as_deref(), Some("ada.jpg"));

    assert!(store.get_person(&PersonId::from("missing")).unwrap().is_none());

    assert_eq!(store.list_persons(None).unwrap().len(), 3);

    let scope = [PersonId::from("p1"), PersonId::from("p3")];
    let scoped = store.list_persons(Some(&scope[..])).unwrap();
    let ids: Vec<&str> = scoped.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p3"]);

    assert!(store.list_persons(Some(&[][..])).unwrap().is_empty());
}

#[test]
fn test_upsert_person_updates_fields() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.upsert_person(&Person::new("p1", "Ada", "Byron")).unwrap();
    store.upsert_person(&Person::new("p1", "Ada", "Lovelace")).unwrap();

    let people = store.list_persons(None).unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].last_name, "Lovelace");
}

#[test]
fn test_remove_person_keeps_edges() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.upsert_person(&Person::new("p1", "Ada", "Lovelace")).unwrap();
    store.put(edge("p1", "p2", RelationshipType::Parent)).unwrap();

    store.remove_person(&PersonId::from("p1")).unwrap();
    assert!(matches!(
        store.remove_person(&PersonId::from("p1")),
        Err(StoreError::NotFound(_))
    ));
    assert_eq!(store.count_relationships().unwrap(), 1);
}

#[test]
fn test_persistence_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kinship.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.upsert_person(&Person::new("p1", "Ada", "Lovelace")).unwrap();
        store.put(edge("p1", "p2", RelationshipType::Godparent)).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    let edges = store.scan(&EdgeFilter::all()).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].relationship_type, RelationshipType::Godparent);
    assert!(store.get_person(&PersonId::from("p1")).unwrap().is_some());
}
