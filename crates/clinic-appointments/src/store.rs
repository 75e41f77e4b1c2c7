//! Pool-backed facade over the appointment queries.

use clinic_db::DbPool;
use clinic_types::{
    Appointment, AppointmentClientPetRelationship, AppointmentId, ClientId,
};

use crate::error::AppointmentError;
use crate::queries;

/// Record-access object for appointments.
///
/// Holds a clone of the shared pool and nothing else, so it can be cloned
/// freely and used from several threads at once. Locking and isolation are
/// left to the pool and to SQLite.
#[derive(Clone)]
pub struct AppointmentStore {
    pool: DbPool,
}

impl AppointmentStore {
    /// Creates a store over an existing pool. The schema must already be
    /// migrated (see [`clinic_db::run_migrations`]).
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Lists every appointment, in database order.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError` if no connection is available or the query fails.
    pub fn list(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let conn = self.pool.get()?;
        queries::list_appointments(&conn)
    }

    /// Fetches one appointment by id; `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError` if no connection is available or the query fails.
    pub fn get(&self, id: AppointmentId) -> Result<Option<Appointment>, AppointmentError> {
        let conn = self.pool.get()?;
        queries::get_appointment(&conn, id)
    }

    /// Builds the appointment, client name, and pet mapping for a client, or
    /// `Ok(None)` when the client has no appointments.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError` if no connection is available, the query
    /// fails, or a row cannot be read while walking the result set.
    pub fn get_appt_client_pet(
        &self,
        client_id: ClientId,
    ) -> Result<Option<AppointmentClientPetRelationship>, AppointmentError> {
        let conn = self.pool.get()?;
        queries::get_appt_client_pet(&conn, client_id)
    }

    /// Removes an appointment. Missing ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError` if no connection is available or the delete fails.
    pub fn delete(&self, id: AppointmentId) -> Result<(), AppointmentError> {
        let conn = self.pool.get()?;
        queries::delete_appointment(&conn, id)
    }

    /// Inserts (no id) or updates (with id) an appointment, then re-reads it
    /// on the same connection.
    ///
    /// Updating an id that does not exist writes nothing and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError` if no connection is available or a statement
    /// fails, including foreign key violations for unknown clients or pets.
    pub fn save(&self, appointment: &Appointment) -> Result<Option<Appointment>, AppointmentError> {
        let conn = self.pool.get()?;
        queries::save_appointment(&conn, appointment)
    }

    /// Lists the appointments booked for one client, in database order.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError` if no connection is available or the query fails.
    pub fn list_for_client(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let conn = self.pool.get()?;
        queries::list_appointments_for_client(&conn, client_id)
    }
}
