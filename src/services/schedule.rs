//! Day-level lesson operations: lazy materialization of instances from the
//! weekly templates, status changes, deletion and template creation.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::database::models::*;
use crate::error::SchedulerError;
use crate::services::bridge::{HostBridge, NotificationKind};
use crate::utils::datetime::day_of_week;
use crate::utils::logging::{log_database_error, log_database_operation};
use crate::utils::validation::TemplateForm;

/// Returns the lessons for `date`, creating them from the matching weekly
/// templates first when the date has no instances at all.
///
/// Once any instance exists for a date the templates are not consulted
/// again, so templates added later for that weekday only show up on dates
/// that have not been opened yet.
pub async fn ensure_instances_for_date(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<LessonInstanceDetails>, SchedulerError> {
    let existing = LessonInstance::find_by_date_detailed(pool, date).await?;
    if !existing.is_empty() {
        return Ok(existing);
    }

    let weekday = day_of_week(date);
    let templates = LessonTemplate::find_by_day_of_week(pool, weekday).await?;
    if templates.is_empty() {
        log_database_operation("MATERIALIZE", "lesson_instances", Some(&format!("{date}: no templates for weekday {weekday}")));
        return Ok(Vec::new());
    }

    match LessonInstance::insert_from_templates(pool, date, &templates).await {
        Ok(inserted) => {
            tracing::info!(
                "Materialized {} of {} templates for {} (weekday {})",
                inserted, templates.len(), date, weekday
            );
        }
        Err(e) => {
            log_database_error("MATERIALIZE", "lesson_instances", &e.to_string());
            return Err(e.into());
        }
    }

    Ok(LessonInstance::find_by_date_detailed(pool, date).await?)
}

/// Moves an instance to `status` regardless of its current status.
pub async fn set_instance_status(
    pool: &SqlitePool,
    bridge: &dyn HostBridge,
    instance_id: &str,
    status: LessonStatus,
) -> Result<LessonInstance, SchedulerError> {
    let instance = LessonInstance::update_status(pool, instance_id, status)
        .await?
        .ok_or_else(|| SchedulerError::NotFound("Lesson".to_string()))?;

    log_database_operation("UPDATE_STATUS", "lesson_instances", Some(&format!("{instance_id} -> {status}")));

    match status {
        LessonStatus::Paid => bridge.notify(NotificationKind::Success).await,
        LessonStatus::Cancelled => bridge.notify(NotificationKind::Warning).await,
        LessonStatus::Scheduled => {}
    }

    Ok(instance)
}

/// Deletes one instance after the operator confirms. Returns the deleted
/// instance, or `None` when the operator declined.
pub async fn delete_instance(
    pool: &SqlitePool,
    bridge: &dyn HostBridge,
    instance_id: &str,
) -> Result<Option<LessonInstance>, SchedulerError> {
    let instance = LessonInstance::find_by_id(pool, instance_id)
        .await?
        .ok_or_else(|| SchedulerError::NotFound("Lesson".to_string()))?;

    if !bridge.confirm("Are you sure you want to delete this lesson?").await {
        return Ok(None);
    }

    if !LessonInstance::delete(pool, instance_id).await? {
        return Err(SchedulerError::NotFound("Lesson".to_string()));
    }

    log_database_operation("DELETE", "lesson_instances", Some(instance_id));
    bridge.notify(NotificationKind::Success).await;

    Ok(Some(instance))
}

/// Creates a weekly template. Teacher and student may be given by id or by name.
pub async fn add_template(
    pool: &SqlitePool,
    bridge: &dyn HostBridge,
    form: TemplateForm,
) -> Result<LessonTemplate, SchedulerError> {
    let (teacher, student) =
        tokio::try_join!(resolve_teacher(pool, &form.teacher), resolve_student(pool, &form.student))?;

    let template = LessonTemplate::create(
        pool,
        NewLessonTemplate {
            teacher_id: teacher.id,
            student_id: student.id,
            day_of_week: form.day_of_week,
            time: form.time,
            price: form.price,
        },
    )
    .await?;

    log_database_operation("INSERT", "lesson_templates", Some(&template.id));
    bridge.notify(NotificationKind::Success).await;

    Ok(template)
}

async fn resolve_teacher(pool: &SqlitePool, key: &str) -> Result<Teacher, SchedulerError> {
    if let Some(teacher) = Teacher::find_by_id(pool, key).await? {
        return Ok(teacher);
    }
    Teacher::find_by_name(pool, key)
        .await?
        .ok_or_else(|| SchedulerError::NotFound(format!("Teacher '{key}'")))
}

async fn resolve_student(pool: &SqlitePool, key: &str) -> Result<Student, SchedulerError> {
    if let Some(student) = Student::find_by_id(pool, key).await? {
        return Ok(student);
    }
    Student::find_by_name(pool, key)
        .await?
        .ok_or_else(|| SchedulerError::NotFound(format!("Student '{key}'")))
}

pub async fn list_templates(pool: &SqlitePool) -> Result<Vec<LessonTemplateDetails>, SchedulerError> {
    Ok(LessonTemplate::find_all_detailed(pool).await?)
}
