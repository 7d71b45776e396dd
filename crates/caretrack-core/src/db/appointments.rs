//! Appointment database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::Appointment;

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        date: row.get(1)?,
        time: row.get(2)?,
        location: row.get(3)?,
        reason: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const APPOINTMENT_COLUMNS: &str = "id, date, time, location, reason, created_at, updated_at";

impl Database {
    /// Insert a new appointment and return the store-assigned id.
    ///
    /// Location must be non-blank; field formats are the validator's job
    /// and a failed validation never reaches this method.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<i64> {
        if appointment.location.trim().is_empty() {
            return Err(DbError::Constraint("appointment location cannot be empty".into()));
        }

        self.conn.execute(
            r#"
            INSERT INTO appointments (
                date, time, location, reason, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                appointment.date,
                appointment.time,
                appointment.location,
                appointment.reason,
                appointment.created_at,
                appointment.updated_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Replace an existing appointment wholesale.
    pub fn update_appointment(&self, appointment: &Appointment) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE appointments SET
                date = ?2,
                time = ?3,
                location = ?4,
                reason = ?5,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                appointment.id,
                appointment.date,
                appointment.time,
                appointment.location,
                appointment.reason,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get an appointment by id.
    pub fn get_appointment(&self, id: i64) -> DbResult<Option<Appointment>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM appointments WHERE id = ?", APPOINTMENT_COLUMNS),
                [id],
                appointment_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all appointments, oldest first.
    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM appointments ORDER BY date",
            APPOINTMENT_COLUMNS
        ))?;

        let rows = stmt.query_map([], appointment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn sample(day: u32) -> Appointment {
        let instant = NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        Appointment::new(instant, "10:30".into(), "City Clinic".into(), "Checkup".into())
    }

    #[test]
    fn test_insert_and_get_round_trips_instant() {
        let db = setup_db();
        let appt = sample(14);
        let id = db.insert_appointment(&appt).unwrap();
        assert!(id > 0);

        let retrieved = db.get_appointment(id).unwrap().unwrap();
        assert_eq!(retrieved.date, appt.date);
        assert_eq!(retrieved.time, "10:30");
        assert_eq!(retrieved.location, "City Clinic");
    }

    #[test]
    fn test_insert_rejects_blank_location() {
        let db = setup_db();
        let mut appt = sample(14);
        appt.location = " ".into();
        assert!(matches!(
            db.insert_appointment(&appt),
            Err(DbError::Constraint(_))
        ));
    }

    #[test]
    fn test_list_oldest_first() {
        let db = setup_db();
        db.insert_appointment(&sample(22)).unwrap();
        db.insert_appointment(&sample(14)).unwrap();
        db.insert_appointment(&sample(18)).unwrap();

        let days: Vec<u32> = db
            .list_appointments()
            .unwrap()
            .iter()
            .map(|a| chrono::Datelike::day(&a.date.date()))
            .collect();
        assert_eq!(days, vec![14, 18, 22]);
    }

    #[test]
    fn test_update_appointment() {
        let db = setup_db();
        let mut appt = sample(14);
        appt.id = db.insert_appointment(&appt).unwrap();

        appt.date = sample(20).date;
        appt.time = "09:00".into();
        assert!(db.update_appointment(&appt).unwrap());

        let retrieved = db.get_appointment(appt.id).unwrap().unwrap();
        assert_eq!(retrieved.time, "09:00");
        assert_eq!(retrieved.date, sample(20).date);
    }

    #[test]
    fn test_delete_appointment() {
        let db = setup_db();
        let id = db.insert_appointment(&sample(14)).unwrap();
        assert!(db.delete_appointment(id).unwrap());
        assert!(db.get_appointment(id).unwrap().is_none());
    }
}
