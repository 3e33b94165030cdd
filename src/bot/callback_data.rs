//! Compact encoding of inline-button actions. Telegram limits callback data
//! to 64 bytes, which fits a prefix plus one UUID.

use chrono::NaiveDate;

use crate::database::models::LessonStatus;
use crate::services::statistics::Period;
use crate::utils::validation::validate_record_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    ShowDay(NaiveDate),
    SetStatus { instance_id: String, status: LessonStatus },
    DeleteInstance { instance_id: String, confirmed: bool },
    DeleteTeacher { teacher_id: String, confirmed: bool },
    DeleteStudent { student_id: String, confirmed: bool },
    ShowStats(Period),
    Dismiss,
}

impl CallbackAction {
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::ShowDay(date) => format!("day:{}", date.format("%Y-%m-%d")),
            CallbackAction::SetStatus { instance_id, status } => format!("st:{status}:{instance_id}"),
            CallbackAction::DeleteInstance { instance_id, confirmed } => {
                format!("di{}:{instance_id}", bang(*confirmed))
            }
            CallbackAction::DeleteTeacher { teacher_id, confirmed } => {
                format!("dt{}:{teacher_id}", bang(*confirmed))
            }
            CallbackAction::DeleteStudent { student_id, confirmed } => {
                format!("ds{}:{student_id}", bang(*confirmed))
            }
            CallbackAction::ShowStats(period) => format!("stats:{}", period.label()),
            CallbackAction::Dismiss => "dismiss".to_string(),
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        if data == "dismiss" {
            return Some(CallbackAction::Dismiss);
        }

        let (prefix, rest) = data.split_once(':')?;
        match prefix {
            "day" => NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                .ok()
                .map(CallbackAction::ShowDay),
            "st" => {
                let (status, instance_id) = rest.split_once(':')?;
                let status = status.parse().ok()?;
                validate_record_id(instance_id).ok()?;
                Some(CallbackAction::SetStatus { instance_id: instance_id.to_string(), status })
            }
            "stats" => match Period::parse(rest).ok()? {
                Period::Custom { .. } => None,
                period => Some(CallbackAction::ShowStats(period)),
            },
            _ => {
                validate_record_id(rest).ok()?;
                let id = rest.to_string();
                match prefix {
                    "di" => Some(CallbackAction::DeleteInstance { instance_id: id, confirmed: false }),
                    "di!" => Some(CallbackAction::DeleteInstance { instance_id: id, confirmed: true }),
                    "dt" => Some(CallbackAction::DeleteTeacher { teacher_id: id, confirmed: false }),
                    "dt!" => Some(CallbackAction::DeleteTeacher { teacher_id: id, confirmed: true }),
                    "ds" => Some(CallbackAction::DeleteStudent { student_id: id, confirmed: false }),
                    "ds!" => Some(CallbackAction::DeleteStudent { student_id: id, confirmed: true }),
                    _ => None,
                }
            }
        }
    }

    /// Whether the operator already answered "yes" for this action.
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self,
            CallbackAction::DeleteInstance { confirmed: true, .. }
                | CallbackAction::DeleteTeacher { confirmed: true, .. }
                | CallbackAction::DeleteStudent { confirmed: true, .. }
        )
    }

    /// The approved form of a destructive action, if it needs approval.
    pub fn confirmed(&self) -> Option<Self> {
        match self {
            CallbackAction::DeleteInstance { instance_id, .. } => Some(CallbackAction::DeleteInstance {
                instance_id: instance_id.clone(),
                confirmed: true,
            }),
            CallbackAction::DeleteTeacher { teacher_id, .. } => Some(CallbackAction::DeleteTeacher {
                teacher_id: teacher_id.clone(),
                confirmed: true,
            }),
            CallbackAction::DeleteStudent { student_id, .. } => Some(CallbackAction::DeleteStudent {
                student_id: student_id.clone(),
                confirmed: true,
            }),
            _ => None,
        }
    }
}

fn bang(confirmed: bool) -> &'static str {
    if confirmed { "!" } else { "" }
}
