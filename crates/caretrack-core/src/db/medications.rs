//! Medication database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{DosageForm, Medication};

fn medication_from_row(row: &Row<'_>) -> rusqlite::Result<Medication> {
    Ok(Medication {
        id: row.get(0)?,
        name: row.get(1)?,
        form: DosageForm::from_str_lossy(&row.get::<_, String>(2)?),
        start_time: row.get(3)?,
        interval_hours: row.get(4)?,
        notifications_enabled: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

const MEDICATION_COLUMNS: &str =
    "id, name, form, start_time, interval_hours, notifications_enabled, created_at, updated_at";

impl Database {
    /// Insert a new medication and return the store-assigned id.
    ///
    /// The name must be non-empty; records are otherwise taken as-is
    /// because the schedule calculator tolerates malformed fields.
    pub fn insert_medication(&self, medication: &Medication) -> DbResult<i64> {
        if medication.name.trim().is_empty() {
            return Err(DbError::Constraint("medication name cannot be empty".into()));
        }

        self.conn.execute(
            r#"
            INSERT INTO medications (
                name, form, start_time, interval_hours, notifications_enabled,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                medication.name,
                medication.form.as_str(),
                medication.start_time,
                medication.interval_hours,
                medication.notifications_enabled,
                medication.created_at,
                medication.updated_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Replace an existing medication wholesale.
    pub fn update_medication(&self, medication: &Medication) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medications SET
                name = ?2,
                form = ?3,
                start_time = ?4,
                interval_hours = ?5,
                notifications_enabled = ?6,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                medication.id,
                medication.name,
                medication.form.as_str(),
                medication.start_time,
                medication.interval_hours,
                medication.notifications_enabled,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a medication by id.
    pub fn get_medication(&self, id: i64) -> DbResult<Option<Medication>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM medications WHERE id = ?", MEDICATION_COLUMNS),
                [id],
                medication_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all medications, ordered by name.
    ///
    /// Display ordering by time-to-next-dose is derived per render by the
    /// schedule calculator, not stored.
    pub fn list_medications(&self) -> DbResult<Vec<Medication>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM medications ORDER BY name",
            MEDICATION_COLUMNS
        ))?;

        let rows = stmt.query_map([], medication_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a medication.
    pub fn delete_medication(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medications WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn sample() -> Medication {
        Medication::new(
            "Metformin".into(),
            DosageForm::Tablet,
            "08:00".into(),
            "12".into(),
        )
    }

    #[test]
    fn test_insert_assigns_id() {
        let db = setup_db();
        let id = db.insert_medication(&sample()).unwrap();
        assert!(id > 0);

        let retrieved = db.get_medication(id).unwrap().unwrap();
        assert_eq!(retrieved.id, id);
        assert_eq!(retrieved.name, "Metformin");
        assert_eq!(retrieved.form, DosageForm::Tablet);
        assert_eq!(retrieved.start_time, "08:00");
        assert!(retrieved.notifications_enabled);
    }

    #[test]
    fn test_insert_rejects_blank_name() {
        let db = setup_db();
        let mut med = sample();
        med.name = "  ".into();
        assert!(matches!(
            db.insert_medication(&med),
            Err(DbError::Constraint(_))
        ));
    }

    #[test]
    fn test_update_medication() {
        let db = setup_db();
        let mut med = sample();
        med.id = db.insert_medication(&med).unwrap();

        med.interval_hours = "8".into();
        med.notifications_enabled = false;
        assert!(db.update_medication(&med).unwrap());

        let retrieved = db.get_medication(med.id).unwrap().unwrap();
        assert_eq!(retrieved.interval_hours, "8");
        assert!(!retrieved.notifications_enabled);
    }

    #[test]
    fn test_update_missing_returns_false() {
        let db = setup_db();
        let mut med = sample();
        med.id = 999;
        assert!(!db.update_medication(&med).unwrap());
    }

    #[test]
    fn test_list_ordered_by_name() {
        let db = setup_db();
        for name in ["Zolpidem", "Aspirin", "Metformin"] {
            let mut med = sample();
            med.name = name.into();
            db.insert_medication(&med).unwrap();
        }

        let names: Vec<String> = db
            .list_medications()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Aspirin", "Metformin", "Zolpidem"]);
    }

    #[test]
    fn test_delete_medication() {
        let db = setup_db();
        let id = db.insert_medication(&sample()).unwrap();
        assert!(db.delete_medication(id).unwrap());
        assert!(db.get_medication(id).unwrap().is_none());
        assert!(!db.delete_medication(id).unwrap());
    }
}
