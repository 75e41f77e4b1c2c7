//! SQL for the `appointments` table and its client/pet join.
//!
//! Every function here runs against a caller-supplied connection and binds
//! all values through `?N` placeholders.

use std::collections::BTreeMap;

use clinic_types::{
    Appointment, AppointmentClientPetRelationship, AppointmentId, ClientId, PetId,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::AppointmentError;

const SELECT_APPOINTMENT: &str =
    "SELECT id, client_id, pet_id, appt_time, appt_date, appt_type FROM appointments";

/// Lists every appointment in the order the database returns them.
pub fn list_appointments(conn: &Connection) -> Result<Vec<Appointment>, AppointmentError> {
    let mut stmt = conn.prepare(SELECT_APPOINTMENT)?;
    let rows = stmt.query_map([], map_row_to_appointment)?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(row?);
    }
    tracing::debug!(count = appointments.len(), "listed appointments");
    Ok(appointments)
}

/// Lists the appointments booked for one client.
pub fn list_appointments_for_client(
    conn: &Connection,
    client_id: ClientId,
) -> Result<Vec<Appointment>, AppointmentError> {
    let mut stmt = conn.prepare(&format!("{SELECT_APPOINTMENT} WHERE client_id = ?1"))?;
    let rows = stmt.query_map([client_id], map_row_to_appointment)?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(row?);
    }
    tracing::debug!(
        client_id,
        count = appointments.len(),
        "listed appointments for client"
    );
    Ok(appointments)
}

/// Fetches a single appointment, or `None` if no row has that id.
pub fn get_appointment(
    conn: &Connection,
    id: AppointmentId,
) -> Result<Option<Appointment>, AppointmentError> {
    let appointment = conn
        .query_row(
            &format!("{SELECT_APPOINTMENT} WHERE id = ?1 LIMIT 1"),
            [id],
            map_row_to_appointment,
        )
        .optional()?;
    Ok(appointment)
}

/// Deletes an appointment. Deleting an id that does not exist is a no-op.
pub fn delete_appointment(conn: &Connection, id: AppointmentId) -> Result<(), AppointmentError> {
    let deleted = conn.execute("DELETE FROM appointments WHERE id = ?1", [id])?;
    tracing::debug!(id, deleted, "deleted appointment");
    Ok(())
}

/// Inserts or updates an appointment and returns the stored row.
///
/// An appointment without an id is inserted and receives the generated id.
/// One with an id overwrites all five data columns of the matching row. If no
/// row matches, nothing is written and the re-read returns `None`.
pub fn save_appointment(
    conn: &Connection,
    appointment: &Appointment,
) -> Result<Option<Appointment>, AppointmentError> {
    let id = match appointment.id {
        None => {
            let id: AppointmentId = conn.query_row(
                "INSERT INTO appointments (client_id, pet_id, appt_time, appt_date, appt_type)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id",
                params![
                    appointment.client_id,
                    appointment.pet_id,
                    appointment.appt_time,
                    appointment.appt_date,
                    appointment.appt_type,
                ],
                |row| row.get(0),
            )?;
            tracing::debug!(id, client_id = appointment.client_id, "inserted appointment");
            id
        }
        Some(id) => {
            let updated = conn.execute(
                "UPDATE appointments
                 SET client_id = ?1, pet_id = ?2, appt_time = ?3, appt_date = ?4, appt_type = ?5
                 WHERE id = ?6",
                params![
                    appointment.client_id,
                    appointment.pet_id,
                    appointment.appt_time,
                    appointment.appt_date,
                    appointment.appt_type,
                    id,
                ],
            )?;
            if updated == 0 {
                tracing::debug!(id, "update matched no appointment");
            } else {
                tracing::debug!(id, "updated appointment");
            }
            id
        }
    };

    get_appointment(conn, id)
}

/// Builds the appointment/client/pets view for a client.
///
/// The first joined row (lowest appointment id) supplies the appointment and
/// the client name; every row contributes its pet to the mapping. Returns
/// `None` when the client has no appointments.
pub fn get_appt_client_pet(
    conn: &Connection,
    client_id: ClientId,
) -> Result<Option<AppointmentClientPetRelationship>, AppointmentError> {
    let mut stmt = conn.prepare(
        "SELECT appt.id, appt.client_id, appt.pet_id, appt.appt_time, appt.appt_date,
                appt.appt_type, c.name AS client_name, p.name AS pet_name
         FROM appointments appt
         LEFT JOIN clients c ON appt.client_id = c.id
         LEFT JOIN pets p ON appt.pet_id = p.id
         WHERE appt.client_id = ?1
         ORDER BY appt.id",
    )?;
    let mut rows = stmt.query_map([client_id], JoinedRow::from_row)?;

    let Some(seed) = rows.next().transpose()? else {
        return Ok(None);
    };

    let relationship = rows.try_fold(seed.into_relationship(), |mut acc, row| {
        let row = row?;
        acc.pets.insert(row.appointment.pet_id, row.pet_name);
        Ok::<_, AppointmentError>(acc)
    })?;

    tracing::debug!(
        client_id,
        pets = relationship.pets.len(),
        "built appointment client pet relationship"
    );
    Ok(Some(relationship))
}

/// One row of the appointment/client/pet join.
struct JoinedRow {
    appointment: Appointment,
    client_name: String,
    pet_name: String,
}

impl JoinedRow {
    // Missing client or pet rows come back as NULL names from the LEFT JOIN.
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            appointment: map_row_to_appointment(row)?,
            client_name: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            pet_name: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        })
    }

    fn into_relationship(self) -> AppointmentClientPetRelationship {
        let pet_id: PetId = self.appointment.pet_id;
        AppointmentClientPetRelationship {
            appointment: self.appointment,
            client_name: self.client_name,
            pets: BTreeMap::from([(pet_id, self.pet_name)]),
        }
    }
}

fn map_row_to_appointment(row: &Row) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        client_id: row.get(1)?,
        pet_id: row.get(2)?,
        appt_time: row.get(3)?,
        appt_date: row.get(4)?,
        appt_type: row.get(5)?,
    })
}
