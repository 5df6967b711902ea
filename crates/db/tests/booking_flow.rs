//! Repository tests for bookings, appointments and the link between them.

use assert_matches::assert_matches;
use careline_core::appointment::AppointmentStatus;
use careline_core::booking::BookingStatus;
use careline_core::pagination::PageRequest;
use careline_db::models::appointment::{AppointmentFilter, CreateAppointment, UpdateAppointment};
use careline_db::models::booking::{BookingFilter, CreateBooking, UpdateBooking};
use careline_db::models::user::CreateUser;
use careline_db::repositories::{AppointmentRepo, BookingRepo, UserRepo};
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 5, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn new_booking(name: &str, day: u32) -> CreateBooking {
    CreateBooking {
        full_name: name.to_string(),
        email: Some(format!("{}@example.org", name.to_lowercase())),
        phone: "+1 555 0100".to_string(),
        preferred_date: date(day),
        preferred_time: time(9, 0),
        service_type: "consultation".to_string(),
        notes: None,
    }
}

fn new_appointment(name: &str, day: u32, start: NaiveTime) -> CreateAppointment {
    CreateAppointment {
        patient_name: name.to_string(),
        patient_email: None,
        patient_phone: None,
        appointment_date: date(day),
        start_time: start,
        duration_minutes: None,
        service_type: "consultation".to_string(),
        assigned_to: None,
        notes: None,
    }
}

async fn seed_user(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: "nurse1".to_string(),
            email: "nurse1@example.org".to_string(),
            full_name: None,
            password_hash: "not-a-real-hash".to_string(),
            role_id: 4,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_booking_defaults_to_pending(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &new_booking("Ada", 3)).await.unwrap();
    assert_eq!(booking.status().unwrap(), BookingStatus::Pending);
    assert_eq!(booking.appointment_id, None);
    assert_eq!(booking.confirmed_at, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_status_update_persists_and_stamps_confirmation(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let booking = BookingRepo::create(&pool, &new_booking("Ada", 3)).await.unwrap();

    let updated = BookingRepo::update_status(
        &pool,
        booking.id,
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        Some(user_id),
        Some("called back"),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, "confirmed");
    assert!(updated.confirmed_at.is_some());
    assert_eq!(updated.confirmed_by, Some(user_id));

    let reloaded = BookingRepo::find_by_id(&pool, booking.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status().unwrap(), BookingStatus::Confirmed);
    assert_eq!(reloaded.admin_notes.as_deref(), Some("called back"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_status_update_requires_expected_current_status(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &new_booking("Ada", 3)).await.unwrap();

    let stale = BookingRepo::update_status(
        &pool,
        booking.id,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        None,
        None,
    )
    .await
    .unwrap();
    assert!(stale.is_none());

    let reloaded = BookingRepo::find_by_id(&pool, booking.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, "pending");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_booking_check_constraint_rejects_unknown_status(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &new_booking("Ada", 3)).await.unwrap();
    let err = sqlx::query("UPDATE bookings SET status = 'lost' WHERE id = $1")
        .bind(booking.id)
        .execute(&pool)
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(_));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_booking_list_filters_and_pages(pool: PgPool) {
    for (i, name) in ["Ada", "Brian", "Chloe", "Dario", "Emma"].iter().enumerate() {
        BookingRepo::create(&pool, &new_booking(name, 3 + i as u32)).await.unwrap();
    }

    let all = BookingFilter::default();
    assert_eq!(BookingRepo::count(&pool, &all).await.unwrap(), 5);

    let page = BookingRepo::list(&pool, &all, PageRequest::new(Some(2), Some(2)))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);

    let last = BookingRepo::list(&pool, &all, PageRequest::new(Some(3), Some(2)))
        .await
        .unwrap();
    assert_eq!(last.len(), 1);

    let search = BookingFilter {
        search: Some("chl".to_string()),
        ..Default::default()
    };
    let found = BookingRepo::list(&pool, &search, PageRequest::default()).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].full_name, "Chloe");

    let range = BookingFilter {
        date_from: Some(date(4)),
        date_to: Some(date(5)),
        ..Default::default()
    };
    assert_eq!(BookingRepo::count(&pool, &range).await.unwrap(), 2);

    let pending = BookingFilter {
        status: Some(BookingStatus::Pending),
        ..Default::default()
    };
    assert_eq!(BookingRepo::count(&pool, &pending).await.unwrap(), 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_booking_partial_update(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &new_booking("Ada", 3)).await.unwrap();
    let updated = BookingRepo::update(
        &pool,
        booking.id,
        &UpdateBooking {
            phone: Some("+1 555 0199".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.phone, "+1 555 0199");
    assert_eq!(updated.full_name, "Ada");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_booking_update_clears_nullable_fields(pool: PgPool) {
    let mut input = new_booking("Ada", 3);
    input.notes = Some("Prefers mornings".to_string());
    let booking = BookingRepo::create(&pool, &input).await.unwrap();

    let updated = BookingRepo::update(
        &pool,
        booking.id,
        &UpdateBooking {
            email: Some(None),
            notes: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(updated.email.is_none());
    assert!(updated.notes.is_none());
    assert_eq!(updated.phone, "+1 555 0100");

    // An absent patch leaves the column as it is.
    let updated = BookingRepo::update(
        &pool,
        booking.id,
        &UpdateBooking {
            admin_notes: Some(Some("Called back".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.admin_notes.as_deref(), Some("Called back"));
    assert!(updated.email.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_count_by_status(pool: PgPool) {
    let a = BookingRepo::create(&pool, &new_booking("Ada", 3)).await.unwrap();
    BookingRepo::create(&pool, &new_booking("Brian", 3)).await.unwrap();
    BookingRepo::update_status(
        &pool,
        a.id,
        BookingStatus::Pending,
        BookingStatus::Cancelled,
        None,
        None,
    )
    .await
    .unwrap();

    let counts = BookingRepo::count_by_status(&pool).await.unwrap();
    let get = |s: &str| counts.iter().find(|c| c.status == s).map(|c| c.count);
    assert_eq!(get("pending"), Some(1));
    assert_eq!(get("cancelled"), Some(1));
    assert_eq!(get("confirmed"), None);
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_for_booking_links_both_directions(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &new_booking("Ada", 3)).await.unwrap();
    let appt = AppointmentRepo::create_for_booking(
        &pool,
        booking.id,
        &new_appointment("Ada", 3, time(9, 0)),
        None,
    )
    .await
    .unwrap();

    assert_eq!(appt.booking_id, Some(booking.id));
    assert_eq!(appt.duration_minutes, 30);
    assert_eq!(appt.status().unwrap(), AppointmentStatus::Scheduled);

    let reloaded = BookingRepo::find_by_id(&pool, booking.id).await.unwrap().unwrap();
    assert_eq!(reloaded.appointment_id, Some(appt.id));

    let by_booking = AppointmentRepo::find_by_booking(&pool, booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_booking.id, appt.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_for_booking_rolls_back_on_duplicate(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &new_booking("Ada", 3)).await.unwrap();
    let input = new_appointment("Ada", 3, time(9, 0));
    AppointmentRepo::create_for_booking(&pool, booking.id, &input, None)
        .await
        .unwrap();

    let err = AppointmentRepo::create_for_booking(&pool, booking.id, &input, None)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.constraint(), Some("uq_appointments_booking_id"));

    let count = AppointmentRepo::count(&pool, &AppointmentFilter::default())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_for_missing_booking_rolls_back(pool: PgPool) {
    let err = AppointmentRepo::create_for_booking(
        &pool,
        9999,
        &new_appointment("Ghost", 3, time(9, 0)),
        None,
    )
    .await
    .unwrap_err();
    // The FK on appointments.booking_id fires before the link update.
    assert_matches!(err, sqlx::Error::Database(_));

    let count = AppointmentRepo::count(&pool, &AppointmentFilter::default())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_active_on_date_scopes_by_assignee_and_status(pool: PgPool) {
    let nurse = seed_user(&pool).await;

    let a = AppointmentRepo::create(&pool, &new_appointment("A", 3, time(9, 0)), None)
        .await
        .unwrap();
    let b = AppointmentRepo::create(&pool, &new_appointment("B", 3, time(10, 0)), None)
        .await
        .unwrap();
    let mut assigned = new_appointment("C", 3, time(9, 0));
    assigned.assigned_to = Some(nurse);
    AppointmentRepo::create(&pool, &assigned, None).await.unwrap();
    AppointmentRepo::create(&pool, &new_appointment("D", 4, time(9, 0)), None)
        .await
        .unwrap();

    AppointmentRepo::update_status(
        &pool,
        b.id,
        AppointmentStatus::Scheduled,
        AppointmentStatus::Cancelled,
    )
    .await
    .unwrap()
    .unwrap();

    let unassigned = AppointmentRepo::find_active_on_date(&pool, date(3), None, None)
        .await
        .unwrap();
    let ids: Vec<i64> = unassigned.iter().map(|x| x.id).collect();
    assert_eq!(ids, vec![a.id]);

    let for_nurse = AppointmentRepo::find_active_on_date(&pool, date(3), Some(nurse), None)
        .await
        .unwrap();
    assert_eq!(for_nurse.len(), 1);
    assert_eq!(for_nurse[0].patient_name, "C");

    let excluded = AppointmentRepo::find_active_on_date(&pool, date(3), None, Some(a.id))
        .await
        .unwrap();
    assert!(excluded.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_appointment_filters_and_calendar_order(pool: PgPool) {
    AppointmentRepo::create(&pool, &new_appointment("Late", 3, time(15, 0)), None)
        .await
        .unwrap();
    AppointmentRepo::create(&pool, &new_appointment("Early", 3, time(8, 0)), None)
        .await
        .unwrap();
    AppointmentRepo::create(&pool, &new_appointment("Other", 6, time(8, 0)), None)
        .await
        .unwrap();

    let on_day = AppointmentFilter {
        date: Some(date(3)),
        ..Default::default()
    };
    let rows = AppointmentRepo::list(&pool, &on_day, PageRequest::default())
        .await
        .unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.patient_name.as_str()).collect();
    assert_eq!(names, vec!["Early", "Late"]);

    assert_eq!(AppointmentRepo::count_on_date(&pool, date(3)).await.unwrap(), 2);
    assert_eq!(AppointmentRepo::count_on_date(&pool, date(6)).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reschedule_update(pool: PgPool) {
    let appt = AppointmentRepo::create(&pool, &new_appointment("A", 3, time(9, 0)), None)
        .await
        .unwrap();
    let updated = AppointmentRepo::update(
        &pool,
        appt.id,
        &UpdateAppointment {
            start_time: Some(time(11, 30)),
            duration_minutes: Some(45),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.start_time, time(11, 30));
    assert_eq!(updated.duration_minutes, 45);
    assert_eq!(updated.appointment_date, date(3));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_appointment_update_unassigns_and_clears(pool: PgPool) {
    let nurse = seed_user(&pool).await;
    let mut input = new_appointment("A", 3, time(9, 0));
    input.assigned_to = Some(nurse);
    input.patient_email = Some("a@example.org".to_string());
    input.notes = Some("Bring records".to_string());
    let appt = AppointmentRepo::create(&pool, &input, None).await.unwrap();

    let updated = AppointmentRepo::update(
        &pool,
        appt.id,
        &UpdateAppointment {
            assigned_to: Some(None),
            patient_email: Some(None),
            notes: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(updated.assigned_to.is_none());
    assert!(updated.patient_email.is_none());
    assert!(updated.notes.is_none());
    assert_eq!(updated.start_time, time(9, 0));

    let updated = AppointmentRepo::update(
        &pool,
        appt.id,
        &UpdateAppointment {
            assigned_to: Some(Some(nurse)),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.assigned_to, Some(nurse));
    assert!(updated.notes.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_appointment_unlinks_booking(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &new_booking("Ada", 3)).await.unwrap();
    let appt = AppointmentRepo::create_for_booking(
        &pool,
        booking.id,
        &new_appointment("Ada", 3, time(9, 0)),
        None,
    )
    .await
    .unwrap();

    assert!(AppointmentRepo::delete(&pool, appt.id).await.unwrap());
    let reloaded = BookingRepo::find_by_id(&pool, booking.id).await.unwrap().unwrap();
    assert_eq!(reloaded.appointment_id, None);
}
