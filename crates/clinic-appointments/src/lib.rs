//! Appointment persistence for the clinic workspace.
//!
//! [`AppointmentStore`] translates between [`Appointment`] records and rows of
//! the `appointments` table, and builds the read-only
//! [`AppointmentClientPetRelationship`] view by joining `clients` and `pets`.
//!
//! The store owns nothing but a clone of the shared [`clinic_db::DbPool`].
//! Each operation checks out one connection, runs one or two parameterised
//! statements, and hands the connection back. The free functions in this
//! crate take a `&Connection` directly for callers that already hold one.
//!
//! ```rust,ignore
//! use clinic_appointments::AppointmentStore;
//! use clinic_types::Appointment;
//!
//! let store = AppointmentStore::new(pool);
//! let saved = store
//!     .save(&Appointment::new(1, 5, "10:00", "2024-01-01", "checkup"))?
//!     .expect("inserted row is readable");
//! assert!(saved.id.is_some());
//! ```

mod error;
mod queries;
mod store;

pub use clinic_types::{Appointment, AppointmentClientPetRelationship};
pub use error::AppointmentError;
pub use queries::{
    delete_appointment, get_appointment, get_appt_client_pet, list_appointments,
    list_appointments_for_client, save_appointment,
};
pub use store::AppointmentStore;
