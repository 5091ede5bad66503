use appointment_cell::models::BookAppointmentRequest;
use appointment_cell::services::{AppointmentBookingService, AppointmentQueryService};
use shared_database::test_utils::{department_id, test_pool, test_session, treatment_id, user_id, TestUser};
use shared_models::auth::Role;

async fn book(pool: &sqlx::SqlitePool, patient: i64, department: &str, treatment: &str, at: &str) -> i64 {
    let department = department_id(pool, department).await;
    let treatment = treatment_id(pool, treatment).await;
    AppointmentBookingService::with_pool(pool.clone())
        .book_appointment(
            &test_session(patient, Role::Patient),
            BookAppointmentRequest::new(department, treatment, at),
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_doctor_view_is_ordered_and_scoped() {
    let pool = test_pool().await;
    let patient = TestUser::patient("henry").insert(&pool).await;
    let late = book(&pool, patient, "Cardiology", "EKG", "2025-06-01T15:00").await;
    let early = book(&pool, patient, "Cardiology", "Consultation", "2025-06-01T09:00").await;
    book(&pool, patient, "Neurology", "MRI Scan", "2025-06-01T12:00").await;
    let doctor = user_id(&pool, "doctor").await;

    let rows = AppointmentQueryService::with_pool(pool.clone())
        .appointments_for_doctor(doctor)
        .await
        .unwrap();

    let ids: Vec<i64> = rows.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![early, late]);
    assert_eq!(rows[0].patient_full_name(), "Test henry");
    assert_eq!(rows[0].treatment_name, "Consultation");
    assert_eq!(rows[0].department_name, "Cardiology");
    assert_eq!(rows[0].doctor_full_name().as_deref(), Some("doctor doctor"));
}

#[tokio::test]
async fn test_patient_view_includes_unassigned_appointments() {
    let pool = test_pool().await;
    let patient = TestUser::patient("iris").insert(&pool).await;
    let other = TestUser::patient("jack").insert(&pool).await;
    book(&pool, patient, "Neurology", "MRI Scan", "2025-07-02T10:00").await;
    book(&pool, patient, "Cardiology", "EKG", "2025-07-01T10:00").await;
    book(&pool, other, "Cardiology", "EKG", "2025-07-01T11:00").await;

    let rows = AppointmentQueryService::with_pool(pool.clone())
        .appointments_for_patient(patient)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|a| a.patient_id == patient));
    assert_eq!(rows[0].department_name, "Cardiology");
    assert_eq!(rows[1].department_name, "Neurology");
    assert_eq!(rows[1].doctor_id, None);
    assert_eq!(rows[1].doctor_full_name(), None);
}

#[tokio::test]
async fn test_recent_appointments_are_latest_first_and_limited() {
    let pool = test_pool().await;
    let patient = TestUser::patient("kate").insert(&pool).await;
    for day in 1..=7 {
        book(&pool, patient, "Cardiology", "EKG", &format!("2025-08-{:02}T10:00", day)).await;
    }

    let rows = AppointmentQueryService::with_pool(pool.clone())
        .recent_appointments(5)
        .await
        .unwrap();

    let days: Vec<String> = rows
        .iter()
        .map(|a| a.appointment_datetime.format("%d").to_string())
        .collect();
    assert_eq!(days, vec!["07", "06", "05", "04", "03"]);
}

#[tokio::test]
async fn test_counts_reflect_rows() {
    let pool = test_pool().await;
    let service = AppointmentQueryService::with_pool(pool.clone());

    let before = service.counts().await.unwrap();
    assert_eq!(before.user_count, 2);
    assert_eq!(before.appointment_count, 0);
    assert_eq!(before.department_count, 3);

    let patient = TestUser::patient("liam").insert(&pool).await;
    book(&pool, patient, "Orthopaedics", "Knee Surgery", "2025-09-01T10:00").await;

    let after = service.counts().await.unwrap();
    assert_eq!(after.user_count, 3);
    assert_eq!(after.appointment_count, 1);
}
