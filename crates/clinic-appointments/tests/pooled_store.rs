use std::thread;

use clinic_appointments::{Appointment, AppointmentStore};
use clinic_db::{create_pool, run_migrations, DbRuntimeSettings};
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> AppointmentStore {
    let path = dir.path().join("clinic.db");
    let pool = create_pool(
        path.to_str().expect("temp path should be utf-8"),
        DbRuntimeSettings {
            busy_timeout_ms: 5_000,
            pool_max_size: 4,
        },
    )
    .expect("failed to create pool");

    let conn = pool.get().expect("failed to get connection");
    run_migrations(&conn).expect("failed to run migrations");
    conn.execute_batch(
        "INSERT INTO clients (id, name) VALUES (1, 'Ada'), (2, 'Grace');
         INSERT INTO pets (id, name, client_id) VALUES (1, 'Rex', 1), (2, 'Fido', 2);",
    )
    .expect("failed to seed clients and pets");
    drop(conn);

    AppointmentStore::new(pool)
}

#[test]
fn concurrent_saves_from_cloned_stores() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = file_store(&dir);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                let client_id = if i % 2 == 0 { 1 } else { 2 };
                let appt = Appointment::new(
                    client_id,
                    client_id,
                    format!("{:02}:00", 8 + i),
                    "2024-01-01",
                    "checkup",
                );
                store
                    .save(&appt)
                    .expect("save should succeed")
                    .expect("saved appointment should be readable")
            })
        })
        .collect();

    let mut saved: Vec<Appointment> = handles
        .into_iter()
        .map(|h| h.join().expect("worker thread panicked"))
        .collect();
    saved.sort_by_key(|appt| appt.id);

    let mut listed = store.list().expect("list should succeed");
    listed.sort_by_key(|appt| appt.id);
    assert_eq!(listed, saved);

    assert_eq!(store.list_for_client(1).expect("list should succeed").len(), 4);
    assert_eq!(store.list_for_client(2).expect("list should succeed").len(), 4);
}

#[test]
fn records_survive_reopening_the_database() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let saved = {
        let store = file_store(&dir);
        store
            .save(&Appointment::new(2, 2, "09:00", "2024-07-04", "grooming"))
            .expect("save should succeed")
            .expect("saved appointment should be readable")
    };

    let path = dir.path().join("clinic.db");
    let pool = create_pool(
        path.to_str().expect("temp path should be utf-8"),
        DbRuntimeSettings::default(),
    )
    .expect("failed to reopen pool");
    let store = AppointmentStore::new(pool);

    let id = saved.id.expect("should have id");
    assert_eq!(store.get(id).expect("get should succeed"), Some(saved));

    let rel = store
        .get_appt_client_pet(2)
        .expect("query should succeed")
        .expect("client 2 has an appointment");
    assert_eq!(rel.client_name, "Grace");
    assert_eq!(rel.pets.get(&2).map(String::as_str), Some("Fido"));
}
