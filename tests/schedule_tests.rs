use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use tempfile::{tempdir, TempDir};
use tutor_scheduler_bot::database::{connection::DatabaseManager, models::*};
use tutor_scheduler_bot::error::SchedulerError;
use tutor_scheduler_bot::services::bridge::{HostBridge, NoopBridge, NotificationKind};
use tutor_scheduler_bot::services::{roster, schedule};
use tutor_scheduler_bot::utils::validation::TemplateForm;

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// 2026-10-18 is a Sunday
fn sunday() -> NaiveDate {
    date(2026, 10, 18)
}

fn monday() -> NaiveDate {
    date(2026, 10, 19)
}

/// Records every signal and answers confirmations with a fixed value.
#[derive(Default)]
struct RecordingBridge {
    decline: bool,
    notifications: Mutex<Vec<NotificationKind>>,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl HostBridge for RecordingBridge {
    async fn notify(&self, kind: NotificationKind) {
        self.notifications.lock().unwrap().push(kind);
    }

    async fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        !self.decline
    }

    async fn selection_changed(&self) {}
}

fn form(teacher: &str, student: &str, day_of_week: i64, time: &str, price: f64) -> TemplateForm {
    TemplateForm {
        teacher: teacher.to_string(),
        student: student.to_string(),
        day_of_week,
        time: time.to_string(),
        price,
    }
}

/// Anna teaches Boris on Monday at 10:00 and Vera on Monday at 16:30.
async fn seed_monday(db: &DatabaseManager) -> Result<()> {
    let bridge = NoopBridge::default();
    roster::add_teacher(&db.pool, &bridge, "Anna").await?;
    roster::add_student(&db.pool, &bridge, "Boris").await?;
    roster::add_student(&db.pool, &bridge, "Vera").await?;
    schedule::add_template(&db.pool, &bridge, form("Anna", "Vera", 1, "16:30", 1200.0)).await?;
    schedule::add_template(&db.pool, &bridge, form("anna", "boris", 1, "10:00", 1000.0)).await?;
    Ok(())
}

#[tokio::test]
async fn test_materializes_one_instance_per_template() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;

    let lessons = schedule::ensure_instances_for_date(&db.pool, monday()).await?;

    assert_eq!(lessons.len(), 2);
    assert!(lessons.iter().all(|l| l.instance.status == LessonStatus::Scheduled));
    assert!(lessons.iter().all(|l| l.instance.date == monday()));
    assert!(lessons.iter().all(|l| l.template_day_of_week == Some(1)));

    // Ordered by time, with snapshot fields copied from the template
    assert_eq!(lessons[0].instance.time, "10:00");
    assert_eq!(lessons[0].instance.price, 1000.0);
    assert_eq!(lessons[0].student_name.as_deref(), Some("Boris"));
    assert_eq!(lessons[1].instance.time, "16:30");
    assert_eq!(lessons[1].student_name.as_deref(), Some("Vera"));

    Ok(())
}

#[tokio::test]
async fn test_materialization_is_idempotent() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;

    let first = schedule::ensure_instances_for_date(&db.pool, monday()).await?;
    let second = schedule::ensure_instances_for_date(&db.pool, monday()).await?;

    let first_ids: Vec<&str> = first.iter().map(|l| l.instance.id.as_str()).collect();
    let second_ids: Vec<&str> = second.iter().map(|l| l.instance.id.as_str()).collect();
    assert_eq!(first_ids, second_ids);
    assert_eq!(LessonInstance::count_by_date(&db.pool, monday()).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_other_weekdays_get_nothing() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;

    let lessons = schedule::ensure_instances_for_date(&db.pool, sunday()).await?;

    assert!(lessons.is_empty());
    assert_eq!(LessonInstance::count_by_date(&db.pool, sunday()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_sunday_templates_use_day_zero() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;
    schedule::add_template(&db.pool, &NoopBridge::default(), form("Anna", "Boris", 0, "11:00", 900.0)).await?;

    let lessons = schedule::ensure_instances_for_date(&db.pool, sunday()).await?;

    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0].instance.time, "11:00");

    Ok(())
}

#[tokio::test]
async fn test_empty_database_materializes_nothing() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let lessons = schedule::ensure_instances_for_date(&db.pool, monday()).await?;

    assert!(lessons.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_templates_are_not_consulted_once_a_date_has_lessons() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;
    schedule::ensure_instances_for_date(&db.pool, monday()).await?;

    schedule::add_template(&db.pool, &NoopBridge::default(), form("Anna", "Boris", 1, "19:00", 1500.0)).await?;

    // Already materialized date keeps its two lessons
    let lessons = schedule::ensure_instances_for_date(&db.pool, monday()).await?;
    assert_eq!(lessons.len(), 2);

    // The next Monday sees all three templates
    let next_monday = date(2026, 10, 26);
    let lessons = schedule::ensure_instances_for_date(&db.pool, next_monday).await?;
    assert_eq!(lessons.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_instances_keep_their_snapshot_after_template_changes() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;
    schedule::ensure_instances_for_date(&db.pool, monday()).await?;

    sqlx::query("UPDATE lesson_templates SET price = 5000, time = '08:00'")
        .execute(&db.pool)
        .await?;

    let lessons = schedule::ensure_instances_for_date(&db.pool, monday()).await?;
    assert_eq!(lessons[0].instance.time, "10:00");
    assert_eq!(lessons[0].instance.price, 1000.0);
    assert_eq!(lessons[1].instance.price, 1200.0);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_materialization_creates_no_duplicates() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;

    let (a, b, c) = tokio::join!(
        schedule::ensure_instances_for_date(&db.pool, monday()),
        schedule::ensure_instances_for_date(&db.pool, monday()),
        schedule::ensure_instances_for_date(&db.pool, monday()),
    );

    assert_eq!(a?.len(), 2);
    assert_eq!(b?.len(), 2);
    assert_eq!(c?.len(), 2);
    assert_eq!(LessonInstance::count_by_date(&db.pool, monday()).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_deleting_every_lesson_lets_the_date_materialize_again() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;
    let lessons = schedule::ensure_instances_for_date(&db.pool, monday()).await?;

    for lesson in &lessons {
        schedule::delete_instance(&db.pool, &NoopBridge::default(), &lesson.instance.id).await?;
    }

    let again = schedule::ensure_instances_for_date(&db.pool, monday()).await?;
    assert_eq!(again.len(), 2);
    assert!(again.iter().all(|l| lessons.iter().all(|old| old.instance.id != l.instance.id)));

    Ok(())
}

#[tokio::test]
async fn test_status_transitions_are_unrestricted() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;
    let lesson = schedule::ensure_instances_for_date(&db.pool, monday()).await?.remove(0);
    let id = lesson.instance.id.as_str();
    let bridge = RecordingBridge::default();

    let paid = schedule::set_instance_status(&db.pool, &bridge, id, LessonStatus::Paid).await?;
    assert_eq!(paid.status, LessonStatus::Paid);

    let cancelled = schedule::set_instance_status(&db.pool, &bridge, id, LessonStatus::Cancelled).await?;
    assert_eq!(cancelled.status, LessonStatus::Cancelled);

    // A cancelled lesson can be marked paid directly
    let repaid = schedule::set_instance_status(&db.pool, &bridge, id, LessonStatus::Paid).await?;
    assert_eq!(repaid.status, LessonStatus::Paid);
    let stored = schedule::ensure_instances_for_date(&db.pool, monday()).await?.remove(0);
    assert_eq!(stored.instance.status, LessonStatus::Paid);

    schedule::set_instance_status(&db.pool, &bridge, id, LessonStatus::Cancelled).await?;

    let restored = schedule::set_instance_status(&db.pool, &bridge, id, LessonStatus::Scheduled).await?;
    assert_eq!(restored.status, LessonStatus::Scheduled);

    // Setting the current status again still succeeds
    schedule::set_instance_status(&db.pool, &bridge, id, LessonStatus::Scheduled).await?;

    assert_eq!(
        *bridge.notifications.lock().unwrap(),
        vec![
            NotificationKind::Success,
            NotificationKind::Warning,
            NotificationKind::Success,
            NotificationKind::Warning,
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_status_change_for_unknown_lesson() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let bridge = RecordingBridge::default();

    let result = schedule::set_instance_status(&db.pool, &bridge, "missing", LessonStatus::Paid).await;

    assert!(matches!(result, Err(SchedulerError::NotFound(_))));
    assert!(bridge.notifications.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_declined_delete_keeps_the_lesson() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;
    let lesson = schedule::ensure_instances_for_date(&db.pool, monday()).await?.remove(0);
    let bridge = RecordingBridge { decline: true, ..Default::default() };

    let deleted = schedule::delete_instance(&db.pool, &bridge, &lesson.instance.id).await?;

    assert!(deleted.is_none());
    assert_eq!(bridge.prompts.lock().unwrap().len(), 1);
    assert!(bridge.notifications.lock().unwrap().is_empty());
    assert_eq!(LessonInstance::count_by_date(&db.pool, monday()).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_confirmed_delete_removes_one_lesson() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;
    let lesson = schedule::ensure_instances_for_date(&db.pool, monday()).await?.remove(0);
    let bridge = RecordingBridge::default();

    let deleted = schedule::delete_instance(&db.pool, &bridge, &lesson.instance.id).await?.unwrap();

    assert_eq!(deleted.id, lesson.instance.id);
    assert_eq!(*bridge.notifications.lock().unwrap(), vec![NotificationKind::Success]);
    assert_eq!(LessonInstance::count_by_date(&db.pool, monday()).await?, 1);

    let result = schedule::delete_instance(&db.pool, &bridge, &lesson.instance.id).await;
    assert!(matches!(result, Err(SchedulerError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_add_template_requires_known_people() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;
    let bridge = NoopBridge::default();

    let result = schedule::add_template(&db.pool, &bridge, form("Nobody", "Boris", 2, "10:00", 500.0)).await;
    assert!(matches!(result, Err(SchedulerError::NotFound(_))));

    let result = schedule::add_template(&db.pool, &bridge, form("Anna", "Nobody", 2, "10:00", 500.0)).await;
    assert!(matches!(result, Err(SchedulerError::NotFound(_))));

    let result = schedule::add_template(&db.pool, &bridge, form("Nobody", "Nobody", 2, "10:00", 500.0)).await;
    assert!(matches!(result, Err(SchedulerError::NotFound(_))));

    assert_eq!(schedule::list_templates(&db.pool).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_add_template_accepts_ids() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let bridge = NoopBridge::default();
    let teacher = roster::add_teacher(&db.pool, &bridge, "Anna").await?;
    let student = roster::add_student(&db.pool, &bridge, "Boris").await?;

    let template =
        schedule::add_template(&db.pool, &bridge, form(&teacher.id, &student.id, 4, "15:00", 700.0)).await?;

    assert_eq!(template.teacher_id, teacher.id);
    assert_eq!(template.student_id, student.id);

    // Id for one side, name for the other
    let mixed = schedule::add_template(&db.pool, &bridge, form(&teacher.id, "boris", 5, "11:00", 700.0)).await?;
    assert_eq!(mixed.teacher_id, teacher.id);
    assert_eq!(mixed.student_id, student.id);
    Ok(())
}

#[tokio::test]
async fn test_roster_validation_and_cascade() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;
    schedule::ensure_instances_for_date(&db.pool, monday()).await?;
    let bridge = RecordingBridge::default();

    let result = roster::add_teacher(&db.pool, &bridge, "   ").await;
    assert!(matches!(result, Err(SchedulerError::Validation(_))));

    let anna = Teacher::find_by_name(&db.pool, "Anna").await?.unwrap();
    assert!(roster::delete_teacher(&db.pool, &bridge, &anna.id).await?);

    assert!(roster::list_teachers(&db.pool).await?.is_empty());
    assert!(schedule::list_templates(&db.pool).await?.is_empty());
    assert_eq!(LessonInstance::count_by_date(&db.pool, monday()).await?, 0);
    assert_eq!(roster::list_students(&db.pool).await?.len(), 2);

    let result = roster::delete_teacher(&db.pool, &bridge, &anna.id).await;
    assert!(matches!(result, Err(SchedulerError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_declined_student_delete_changes_nothing() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed_monday(&db).await?;
    let bridge = RecordingBridge { decline: true, ..Default::default() };
    let boris = Student::find_by_name(&db.pool, "Boris").await?.unwrap();

    assert!(!roster::delete_student(&db.pool, &bridge, &boris.id).await?);
    assert_eq!(roster::list_students(&db.pool).await?.len(), 2);
    assert_eq!(schedule::list_templates(&db.pool).await?.len(), 2);

    Ok(())
}
