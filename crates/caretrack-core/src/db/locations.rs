//! Saved location database operations.

use rusqlite::{params, Row};

use super::{Database, DbError, DbResult};
use crate::models::SavedLocation;

fn location_from_row(row: &Row<'_>) -> rusqlite::Result<SavedLocation> {
    Ok(SavedLocation {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        lat: row.get(3)?,
        lng: row.get(4)?,
    })
}

impl Database {
    /// Insert a saved location and return the store-assigned id.
    pub fn insert_saved_location(&self, location: &SavedLocation) -> DbResult<i64> {
        if location.name.trim().is_empty() {
            return Err(DbError::Constraint("location name cannot be empty".into()));
        }

        self.conn.execute(
            "INSERT INTO saved_locations (name, address, lat, lng) VALUES (?1, ?2, ?3, ?4)",
            params![location.name, location.address, location.lat, location.lng],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List all saved locations, ordered by name.
    pub fn list_saved_locations(&self) -> DbResult<Vec<SavedLocation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, address, lat, lng FROM saved_locations ORDER BY name",
        )?;

        let rows = stmt.query_map([], location_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a saved location.
    pub fn delete_saved_location(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM saved_locations WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
