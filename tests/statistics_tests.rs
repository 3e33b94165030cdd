use anyhow::Result;
use chrono::{NaiveDate, Weekday};
use tempfile::{tempdir, TempDir};
use tutor_scheduler_bot::database::{connection::DatabaseManager, models::*};
use tutor_scheduler_bot::services::bridge::NoopBridge;
use tutor_scheduler_bot::services::statistics::{compute_statistics, Period, Statistics};
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

/// Three Monday lessons priced 500, 700 and 1000.
async fn seed(db: &DatabaseManager) -> Result<()> {
    let bridge = NoopBridge::default();
    roster::add_teacher(&db.pool, &bridge, "Anna").await?;
    roster::add_student(&db.pool, &bridge, "Boris").await?;

    for (time, price) in [("09:00", 500.0), ("11:00", 700.0), ("13:00", 1000.0)] {
        let form = TemplateForm {
            teacher: "Anna".to_string(),
            student: "Boris".to_string(),
            day_of_week: 1,
            time: time.to_string(),
            price,
        };
        schedule::add_template(&db.pool, &bridge, form).await?;
    }
    Ok(())
}

async fn set_statuses(db: &DatabaseManager, day: NaiveDate, statuses: &[LessonStatus]) -> Result<()> {
    let lessons = schedule::ensure_instances_for_date(&db.pool, day).await?;
    for (lesson, status) in lessons.iter().zip(statuses) {
        schedule::set_instance_status(&db.pool, &NoopBridge::default(), &lesson.instance.id, *status).await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_paid_lessons_drive_revenue() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed(&db).await?;
    let monday = date(2026, 10, 19);
    set_statuses(&db, monday, &[LessonStatus::Paid; 3]).await?;

    let stats = compute_statistics(&db.pool, monday, monday, 600.0).await?;

    assert_eq!(
        stats,
        Statistics {
            total_revenue: 2200.0,
            teacher_payments: 1800.0,
            net_profit: 400.0,
            paid_lessons: 3,
            cancelled_lessons: 0,
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_scheduled_lessons_are_ignored_and_cancelled_counted() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed(&db).await?;
    let monday = date(2026, 10, 19);
    set_statuses(&db, monday, &[LessonStatus::Paid, LessonStatus::Cancelled, LessonStatus::Scheduled]).await?;

    let stats = compute_statistics(&db.pool, monday, monday, 600.0).await?;

    assert_eq!(stats.total_revenue, 500.0);
    assert_eq!(stats.paid_lessons, 1);
    assert_eq!(stats.cancelled_lessons, 1);
    assert_eq!(stats.net_profit, -100.0);
    Ok(())
}

#[tokio::test]
async fn test_range_bounds_are_inclusive() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed(&db).await?;

    for monday in [date(2026, 10, 5), date(2026, 10, 12), date(2026, 10, 19)] {
        set_statuses(&db, monday, &[LessonStatus::Paid]).await?;
    }

    // Week containing Sunday 2026-10-18 with a Monday start
    let (start, end) = Period::Week.range(date(2026, 10, 18), Weekday::Mon);
    let stats = compute_statistics(&db.pool, start, end, 600.0).await?;
    assert_eq!(stats.paid_lessons, 1);
    assert_eq!(stats.total_revenue, 500.0);

    let stats = compute_statistics(&db.pool, date(2026, 10, 5), date(2026, 10, 19), 600.0).await?;
    assert_eq!(stats.paid_lessons, 3);

    let stats = compute_statistics(&db.pool, date(2026, 10, 6), date(2026, 10, 18), 600.0).await?;
    assert_eq!(stats.paid_lessons, 1);

    Ok(())
}

#[tokio::test]
async fn test_reversed_custom_range_is_empty() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed(&db).await?;
    set_statuses(&db, date(2026, 10, 19), &[LessonStatus::Paid; 3]).await?;

    let stats = compute_statistics(&db.pool, date(2026, 10, 31), date(2026, 10, 1), 600.0).await?;

    assert_eq!(stats, Statistics::from_prices(&[], 0, 600.0));
    Ok(())
}

#[tokio::test]
async fn test_teacher_rate_is_configurable() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    seed(&db).await?;
    let monday = date(2026, 10, 19);
    set_statuses(&db, monday, &[LessonStatus::Paid; 3]).await?;

    let stats = compute_statistics(&db.pool, monday, monday, 0.0).await?;

    assert_eq!(stats.teacher_payments, 0.0);
    assert_eq!(stats.net_profit, stats.total_revenue);
    Ok(())
}
