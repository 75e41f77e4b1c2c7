//! Shared record types for the clinic workspace.
//!
//! These are the plain data shapes passed between the database layer and
//! whatever application sits on top of it. They carry no behaviour beyond
//! construction helpers; persistence lives in `clinic-appointments`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Row identifier of a client in the `clients` table.
pub type ClientId = i64;

/// Row identifier of a pet in the `pets` table.
pub type PetId = i64;

/// Row identifier of an appointment in the `appointments` table.
pub type AppointmentId = i64;

/// A scheduled visit for one pet of one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Database identity. `None` until the appointment has been saved.
    pub id: Option<AppointmentId>,
    /// Owning client.
    pub client_id: ClientId,
    /// Pet being seen.
    pub pet_id: PetId,
    /// Time of day, stored as entered (e.g. `"10:00"`).
    pub appt_time: String,
    /// Calendar date, stored as entered (e.g. `"2024-01-01"`).
    pub appt_date: String,
    /// Kind of visit (e.g. `"checkup"`).
    pub appt_type: String,
}

impl Appointment {
    /// Creates an appointment that has not been persisted yet.
    pub fn new(
        client_id: ClientId,
        pet_id: PetId,
        appt_time: impl Into<String>,
        appt_date: impl Into<String>,
        appt_type: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            client_id,
            pet_id,
            appt_time: appt_time.into(),
            appt_date: appt_date.into(),
            appt_type: appt_type.into(),
        }
    }
}

/// Read-only view of a client's appointment together with the client's name
/// and every pet that appears on that client's appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentClientPetRelationship {
    /// The first appointment found for the client.
    pub appointment: Appointment,
    /// Display name of the client.
    pub client_name: String,
    /// Pet id to pet name, one entry per distinct pet.
    pub pets: BTreeMap<PetId, String>,
}
