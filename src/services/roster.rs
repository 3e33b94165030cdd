use sqlx::SqlitePool;

use crate::database::models::{Student, Teacher};
use crate::error::SchedulerError;
use crate::services::bridge::{HostBridge, NotificationKind};
use crate::utils::logging::log_database_operation;
use crate::utils::validation::validate_person_name;

pub async fn add_teacher(
    pool: &SqlitePool,
    bridge: &dyn HostBridge,
    name: &str,
) -> Result<Teacher, SchedulerError> {
    let name = validate_person_name(name)?;
    let teacher = Teacher::create(pool, &name).await?;

    log_database_operation("INSERT", "teachers", Some(&teacher.id));
    bridge.notify(NotificationKind::Success).await;

    Ok(teacher)
}

pub async fn list_teachers(pool: &SqlitePool) -> Result<Vec<Teacher>, SchedulerError> {
    Ok(Teacher::find_all(pool).await?)
}

/// Removes the teacher and, in the same transaction, every template and
/// lesson that references them. Returns false if the operator declined.
pub async fn delete_teacher(
    pool: &SqlitePool,
    bridge: &dyn HostBridge,
    teacher_id: &str,
) -> Result<bool, SchedulerError> {
    let confirmed = bridge
        .confirm("Are you sure you want to delete this teacher? This also deletes all of their lessons.")
        .await;
    if !confirmed {
        return Ok(false);
    }

    if !Teacher::delete_cascade(pool, teacher_id).await? {
        return Err(SchedulerError::NotFound("Teacher".to_string()));
    }

    log_database_operation("DELETE_CASCADE", "teachers", Some(teacher_id));
    bridge.notify(NotificationKind::Success).await;

    Ok(true)
}

pub async fn add_student(
    pool: &SqlitePool,
    bridge: &dyn HostBridge,
    name: &str,
) -> Result<Student, SchedulerError> {
    let name = validate_person_name(name)?;
    let student = Student::create(pool, &name).await?;

    log_database_operation("INSERT", "students", Some(&student.id));
    bridge.notify(NotificationKind::Success).await;

    Ok(student)
}

pub async fn list_students(pool: &SqlitePool) -> Result<Vec<Student>, SchedulerError> {
    Ok(Student::find_all(pool).await?)
}

pub async fn delete_student(
    pool: &SqlitePool,
    bridge: &dyn HostBridge,
    student_id: &str,
) -> Result<bool, SchedulerError> {
    let confirmed = bridge
        .confirm("Are you sure you want to delete this student? This also deletes all of their lessons.")
        .await;
    if !confirmed {
        return Ok(false);
    }

    if !Student::delete_cascade(pool, student_id).await? {
        return Err(SchedulerError::NotFound("Student".to_string()));
    }

    log_database_operation("DELETE_CASCADE", "students", Some(student_id));
    bridge.notify(NotificationKind::Success).await;

    Ok(true)
}
