//! Plain-text renderings of the operator's screens with their inline keyboards.

use chrono::NaiveDate;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::callback_data::CallbackAction;
use crate::database::models::*;
use crate::services::statistics::{Period, Statistics};
use crate::utils::datetime::{format_date, weekday_name};
use crate::utils::money::format_money;

pub type View = (String, InlineKeyboardMarkup);

fn button(text: impl Into<String>, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, action.encode())
}

fn status_label(status: LessonStatus) -> &'static str {
    match status {
        LessonStatus::Scheduled => "🕒 Scheduled",
        LessonStatus::Paid => "✅ Paid",
        LessonStatus::Cancelled => "❌ Cancelled",
    }
}

/// One day of lessons. Shows the instance snapshot (time, price, people),
/// never the current template values.
pub fn render_day(
    date: NaiveDate,
    today: NaiveDate,
    lessons: &[LessonInstanceDetails],
    currency: &str,
) -> View {
    let mut text = format!("📅 {}", format_date(date));
    if date == today {
        text.push_str(" (today)");
    }
    text.push_str("\n\n");

    let mut rows = Vec::new();

    if lessons.is_empty() {
        text.push_str("No lessons on this day.");
    }

    for (i, lesson) in lessons.iter().enumerate() {
        let instance = &lesson.instance;
        let n = i + 1;
        let recurring = if lesson.template_day_of_week.is_some() { " 🔁" } else { "" };

        text.push_str(&format!(
            "{n}. {}{recurring}\n   👨‍🏫 {}  👨‍🎓 {}\n   💰 {} · {}\n\n",
            instance.time,
            lesson.teacher_name.as_deref().unwrap_or("Teacher"),
            lesson.student_name.as_deref().unwrap_or("Student"),
            format_money(instance.price, currency),
            status_label(instance.status),
        ));

        let is_paid = instance.status == LessonStatus::Paid;
        let is_cancelled = instance.status == LessonStatus::Cancelled;
        let mut row = Vec::new();

        // A cancelled lesson has to be restored before it can be paid
        if !is_cancelled {
            let (label, next) = if is_paid {
                (format!("{n} ✅ Paid"), LessonStatus::Scheduled)
            } else {
                (format!("{n} 💳 Pay"), LessonStatus::Paid)
            };
            row.push(button(label, CallbackAction::SetStatus {
                instance_id: instance.id.clone(),
                status: next,
            }));
        }

        let (label, next) = if is_cancelled {
            (format!("{n} ❌ Cancelled"), LessonStatus::Scheduled)
        } else {
            (format!("{n} Cancel"), LessonStatus::Cancelled)
        };
        row.push(button(label, CallbackAction::SetStatus {
            instance_id: instance.id.clone(),
            status: next,
        }));

        row.push(button(format!("{n} 🗑"), CallbackAction::DeleteInstance {
            instance_id: instance.id.clone(),
            confirmed: false,
        }));

        rows.push(row);
    }

    let today_label = if date == today { "✓ Today" } else { "Today" };
    let mut nav = Vec::new();
    if let Some(previous) = date.pred_opt() {
        nav.push(button("← Previous", CallbackAction::ShowDay(previous)));
    }
    nav.push(button(today_label, CallbackAction::ShowDay(today)));
    if let Some(next) = date.succ_opt() {
        nav.push(button("Next →", CallbackAction::ShowDay(next)));
    }
    rows.push(nav);

    (text.trim_end().to_string(), InlineKeyboardMarkup::new(rows))
}

pub fn render_teachers(teachers: &[Teacher]) -> View {
    let rows: Vec<(String, CallbackAction)> = teachers
        .iter()
        .map(|t| {
            (t.name.clone(), CallbackAction::DeleteTeacher { teacher_id: t.id.clone(), confirmed: false })
        })
        .collect();
    render_people("👨‍🏫 Teachers", "No teachers yet. Add one with /addteacher <name>", rows)
}

pub fn render_students(students: &[Student]) -> View {
    let rows: Vec<(String, CallbackAction)> = students
        .iter()
        .map(|s| {
            (s.name.clone(), CallbackAction::DeleteStudent { student_id: s.id.clone(), confirmed: false })
        })
        .collect();
    render_people("👨‍🎓 Students", "No students yet. Add one with /addstudent <name>", rows)
}

fn render_people(title: &str, empty: &str, people: Vec<(String, CallbackAction)>) -> View {
    if people.is_empty() {
        return (format!("{title}\n\n{empty}"), InlineKeyboardMarkup::new(Vec::<Vec<InlineKeyboardButton>>::new()));
    }

    let mut text = format!("{title}\n\n");
    let mut rows = Vec::new();
    for (i, (name, delete)) in people.into_iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, name));
        rows.push(vec![button(format!("🗑 {name}"), delete)]);
    }

    (text.trim_end().to_string(), InlineKeyboardMarkup::new(rows))
}

pub fn render_templates(templates: &[LessonTemplateDetails], currency: &str) -> String {
    if templates.is_empty() {
        return "🔁 Weekly schedule\n\nNo recurring lessons yet. Add one with /addlesson".to_string();
    }

    let mut text = String::from("🔁 Weekly schedule\n");
    let mut current_day = None;
    for template in templates {
        if current_day != Some(template.day_of_week) {
            text.push_str(&format!("\n{}\n", weekday_name(template.day_of_week)));
            current_day = Some(template.day_of_week);
        }
        text.push_str(&format!(
            "  {} · {} → {} · {}\n",
            template.time,
            template.teacher_name.as_deref().unwrap_or("Teacher"),
            template.student_name.as_deref().unwrap_or("Student"),
            format_money(template.price, currency),
        ));
    }

    text.trim_end().to_string()
}

pub fn render_statistics(
    period: Period,
    (start, end): (NaiveDate, NaiveDate),
    stats: &Statistics,
    teacher_rate: f64,
    currency: &str,
) -> View {
    let range = if start == end {
        start.format("%d.%m.%Y").to_string()
    } else {
        format!("{} – {}", start.format("%d.%m.%Y"), end.format("%d.%m.%Y"))
    };

    let text = format!(
        "📊 Statistics ({range})\n\n\
        💰 Total revenue: {}\n\
        💵 Net profit: {}\n   (revenue minus {} per lesson to the teacher)\n\
        💸 Teacher payments: {}\n   ({} lessons × {})\n\
        ✅ Paid lessons: {}\n\
        ❌ Cancelled lessons: {}",
        format_money(stats.total_revenue, currency),
        format_money(stats.net_profit, currency),
        format_money(teacher_rate, currency),
        format_money(stats.teacher_payments, currency),
        stats.paid_lessons,
        format_money(teacher_rate, currency),
        stats.paid_lessons,
        stats.cancelled_lessons,
    );

    let periods = [
        (Period::Today, "Today"),
        (Period::Week, "Week"),
        (Period::Month, "Month"),
        (Period::Year, "Year"),
    ];
    let row = periods
        .into_iter()
        .map(|(p, label)| {
            let label = if p == period { format!("• {label}") } else { label.to_string() };
            button(label, CallbackAction::ShowStats(p))
        })
        .collect::<Vec<_>>();

    (text, InlineKeyboardMarkup::new(vec![row]))
}

/// Yes/No prompt shown before a destructive action.
pub fn confirm_keyboard(confirmed: CallbackAction) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("Yes, delete", confirmed),
        button("No", CallbackAction::Dismiss),
    ]])
}
