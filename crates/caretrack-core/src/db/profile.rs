//! Profile database operations.

use rusqlite::params;

use super::{Database, DbResult};
use crate::models::Profile;

impl Database {
    /// Get the single care-recipient profile.
    ///
    /// The row is seeded empty by the schema, so this always succeeds.
    pub fn get_profile(&self) -> DbResult<Profile> {
        self.conn
            .query_row(
                r#"
                SELECT name, date_of_birth, blood_type, allergies,
                       emergency_contact_name, emergency_contact_phone
                FROM profile
                WHERE id = 1
                "#,
                [],
                |row| {
                    Ok(Profile {
                        name: row.get(0)?,
                        date_of_birth: row.get(1)?,
                        blood_type: row.get(2)?,
                        allergies: row.get(3)?,
                        emergency_contact_name: row.get(4)?,
                        emergency_contact_phone: row.get(5)?,
                    })
                },
            )
            .map_err(Into::into)
    }

    /// Save the profile by full replacement.
    pub fn save_profile(&self, profile: &Profile) -> DbResult<()> {
        self.conn.execute(
            r#"
            UPDATE profile SET
                name = ?1,
                date_of_birth = ?2,
                blood_type = ?3,
                allergies = ?4,
                emergency_contact_name = ?5,
                emergency_contact_phone = ?6,
                updated_at = datetime('now')
            WHERE id = 1
            "#,
            params![
                profile.name,
                profile.date_of_birth,
                profile.blood_type,
                profile.allergies,
                profile.emergency_contact_name,
                profile.emergency_contact_phone,
            ],
        )?;
        Ok(())
    }
}
