//! Kinship Storage Layer
//!
//! Implements the [`RelationshipStore`] and [`PersonRegistry`] traits on top of SQLite.
//!
//! # Architecture
//!
//! - `relationships` holds one row per directed edge, indexed on both endpoints
//! - `persons` is a minimal local person registry (id and display fields)
//! - Filtering beyond the endpoint/type columns happens in memory in the engine
//!
//! # Examples
//!
//! ```no_run
//! use kinship_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for relationship operations
//! ```

#![warn(missing_docs)]

use kinship_domain::traits::{EdgeFilter, PersonRegistry, RelationshipStore};
use kinship_domain::{FamilyRelationship, Person, PersonId, RelationshipId, RelationshipType};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Relationship id already stored
    #[error("Duplicate relationship id: {0}")]
    Duplicate(RelationshipId),
}

/// SQLite-based implementation of the relationship store and person registry
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

const EDGE_COLUMNS: &str = "relationship_id, person_a_id, person_b_id, relationship_type, \
     relationship_subtype, start_date, end_date, is_active, notes, created_date, created_by";

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use kinship_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("kinship.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Insert or update a person
    pub fn upsert_person(&mut self, person: &Person) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO persons (id, first_name, last_name, profile_photo)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
             first_name = excluded.first_name,
             last_name = excluded.last_name,
             profile_photo = excluded.profile_photo",
            params![
                person.id.as_str(),
                &person.first_name,
                &person.last_name,
                &person.profile_photo,
            ],
        )?;
        Ok(())
    }

    /// Remove a person; their relationships are left in place
    pub fn remove_person(&mut self, id: &PersonId) -> Result<(), StoreError> {
        let removed = self
            .conn
            .execute("DELETE FROM persons WHERE id = ?1", params![id.as_str()])?;
        if removed == 0 {
            return Err(StoreError::NotFound(format!("person {}", id)));
        }
        Ok(())
    }

    /// Total number of stored edges
    pub fn count_relationships(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM relationships", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn relationship_exists(&self, id: RelationshipId) -> Result<bool, StoreError> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM relationships WHERE relationship_id = ?1",
                params![id.to_string()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<FamilyRelationship> {
        let id_str: String = row.get(0)?;
        let relationship_id = RelationshipId::from_string(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(e)),
            )
        })?;

        let type_str: String = row.get(3)?;
        let relationship_type = RelationshipType::parse(&type_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "Unknown relationship type: {}",
                    type_str
                ))),
            )
        })?;

        Ok(FamilyRelationship {
            relationship_id,
            person_a_id: PersonId::new(row.get::<_, String>(1)?),
            person_b_id: PersonId::new(row.get::<_, String>(2)?),
            relationship_type,
            relationship_subtype: row.get(4)?,
            start_date: row.get(5)?,
            end_date: row.get(6)?,
            is_active: row.get::<_, i64>(7)? != 0,
            notes: row.get(8)?,
            created_date: row.get::<_, i64>(9)? as u64,
            created_by: row.get(10)?,
        })
    }

    fn row_to_person(row: &Row<'_>) -> rusqlite::Result<Person> {
        Ok(Person {
            id: PersonId::new(row.get::<_, String>(0)?),
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            profile_photo: row.get(3)?,
        })
    }
}

impl RelationshipStore for SqliteStore {
    type Error = StoreError;

    fn put(&mut self, edge: FamilyRelationship) -> Result<(), Self::Error> {
        if self.relationship_exists(edge.relationship_id)? {
            return Err(StoreError::Duplicate(edge.relationship_id));
        }

        self.conn.execute(
            &format!(
                "INSERT INTO relationships ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                EDGE_COLUMNS
            ),
            params![
                edge.relationship_id.to_string(),
                edge.person_a_id.as_str(),
                edge.person_b_id.as_str(),
                edge.relationship_type.as_str(),
                &edge.relationship_subtype,
                &edge.start_date,
                &edge.end_date,
                edge.is_active as i64,
                &edge.notes,
                edge.created_date as i64,
                &edge.created_by,
            ],
        )?;

        Ok(())
    }

    fn delete_by_id(&mut self, id: RelationshipId) -> Result<bool, Self::Error> {
        let removed = self.conn.execute(
            "DELETE FROM relationships WHERE relationship_id = ?1",
            params![id.to_string()],
        )?;
        Ok(removed > 0)
    }

    fn scan(&self, filter: &EdgeFilter) -> Result<Vec<FamilyRelationship>, Self::Error> {
        let mut sql = format!("SELECT {} FROM relationships WHERE 1=1", EDGE_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(person) = &filter.touching {
            sql.push_str(" AND (person_a_id = ? OR person_b_id = ?)");
            params.push(Box::new(person.as_str().to_string()));
            params.push(Box::new(person.as_str().to_string()));
        }

        if let Some(t) = filter.relationship_type {
            sql.push_str(" AND relationship_type = ?");
            params.push(Box::new(t.as_str()));
        }

        if filter.active_only {
            sql.push_str(" AND is_active = 1");
        }

        sql.push_str(" ORDER BY created_date, relationship_id");

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let edges = stmt
            .query_map(&param_refs[..], Self::row_to_edge)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(edges)
    }
}

impl PersonRegistry for SqliteStore {
    type Error = StoreError;

    fn get_person(&self, id: &PersonId) -> Result<Option<Person>, Self::Error> {
        let person = self
            .conn
            .query_row(
                "SELECT id, first_name, last_name, profile_photo FROM persons WHERE id = ?1",
                params![id.as_str()],
                Self::row_to_person,
            )
            .optional()?;
        Ok(person)
    }

    fn list_persons(&self, scope: Option<&[PersonId]>) -> Result<Vec<Person>, Self::Error> {
        let mut sql =
            String::from("SELECT id, first_name, last_name, profile_photo FROM persons");
        let mut params: Vec<&dyn rusqlite::ToSql> = Vec::new();
        let ids: Vec<&str> = scope
            .unwrap_or_default()
            .iter()
            .map(|id| id.as_str())
            .collect();

        if let Some(scope) = scope {
            if scope.is_empty() {
                return Ok(Vec::new());
            }
            let placeholders = vec!["?"; ids.len()].join(", ");
            sql.push_str(&format!(" WHERE id IN ({})", placeholders));
            params.extend(ids.iter().map(|id| id as &dyn rusqlite::ToSql));
        }

        sql.push_str(" ORDER BY rowid");

        let mut stmt = self.conn.prepare(&sql)?;
        let persons = stmt
            .query_map(&params[..], Self::row_to_person)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(persons)
    }
}
