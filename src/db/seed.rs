//! Reference rows inserted at startup. Every insert is guarded by a
//! lookup on the row's natural key, so reseeding an existing database
//! is a no-op.

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::info;

use crate::auth::hash_password;
use crate::db::repository::{
    create_appointment_for_woman, find_appointment_by_title, find_doctor_credentials,
    find_vaccine_type_by_name, find_woman_credentials, insert_doctor, insert_pregnant_woman,
    insert_vaccine_type, NewAppointment, NewDoctor, NewPregnantWoman,
};
use crate::db::DatabaseError;

const VACCINE_TYPE_NAMES: [&str; 3] = [
    "บาดทะยัก-คอตีบ (dT)",
    "ไข้หวัดใหญ่ (Influenza)",
    "โควิด 19 (Covid-19)",
];

const SEED_PASSWORD: &str = "123456";
const SEED_APPOINTMENT_TITLE: &str = "นัดตรวจครรภ์ครั้งถัดไป";

pub fn seed_reference_rows(conn: &mut Connection) -> Result<(), DatabaseError> {
    if find_doctor_credentials(conn, "Doctor")?.is_none() {
        insert_doctor(
            conn,
            &NewDoctor {
                username: "Doctor".into(),
                password_hash: hash_password(SEED_PASSWORD),
                email: "Doctor@gmail.com".into(),
                full_name: "Doctor D".into(),
                phone_number: "0655765587".into(),
            },
        )?;
        info!("seeded default doctor account");
    }

    let woman_id = match find_woman_credentials(conn, "Mommy")? {
        Some((woman, _)) => woman.id,
        None => {
            let woman = insert_pregnant_woman(
                conn,
                &NewPregnantWoman {
                    username: "Mommy".into(),
                    password_hash: hash_password(SEED_PASSWORD),
                    email: "Mommy@gmail.com".into(),
                    full_name: "Mommy M".into(),
                    phone_number: "0812345678".into(),
                    age: 25,
                },
            )?;
            info!("seeded default patient account");
            woman.id
        }
    };

    for name in VACCINE_TYPE_NAMES {
        if find_vaccine_type_by_name(conn, name)?.is_none() {
            insert_vaccine_type(conn, name)?;
        }
    }

    if find_appointment_by_title(conn, SEED_APPOINTMENT_TITLE)?.is_none() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 25)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .ok_or_else(|| DatabaseError::ConstraintViolation("invalid seed date".into()))?;
        create_appointment_for_woman(
            conn,
            woman_id,
            &NewAppointment {
                appointment_date: date,
                title: SEED_APPOINTMENT_TITLE.into(),
                location: "ANC clinic".into(),
            },
        )?;
        info!("seeded default appointment");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::{get_pregnant_woman, list_pregnant_women, list_vaccine_types};

    #[test]
    fn seeding_twice_inserts_once() {
        let mut conn = open_memory_database().unwrap();
        seed_reference_rows(&mut conn).unwrap();
        seed_reference_rows(&mut conn).unwrap();

        let women = list_pregnant_women(&conn).unwrap();
        assert_eq!(women.len(), 1);
        assert_eq!(women[0].username, "Mommy");
        assert_eq!(list_vaccine_types(&conn).unwrap().len(), 3);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM appointments", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);

        let woman = get_pregnant_woman(&conn, women[0].id).unwrap().unwrap();
        assert!(woman.appointment_id.is_some());
    }

    #[test]
    fn seeded_password_verifies() {
        let mut conn = open_memory_database().unwrap();
        seed_reference_rows(&mut conn).unwrap();

        let (_, hash) = find_doctor_credentials(&conn, "Doctor").unwrap().unwrap();
        assert!(crate::auth::verify_password(SEED_PASSWORD, &hash));
        assert!(!crate::auth::verify_password("wrong", &hash));
    }
}
