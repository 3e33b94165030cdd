use std::sync::Arc;
use teloxide::prelude::*;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::bot::views::render_day;
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::services::schedule::ensure_instances_for_date;
use crate::utils::datetime::today;
use crate::utils::logging::log_system_event;

type AgendaResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Posts the day's lessons to the operator chat on a cron schedule.
pub struct AgendaService {
    bot: Bot,
    db: Arc<DatabaseManager>,
    config: Arc<Config>,
    scheduler: JobScheduler,
}

impl AgendaService {
    pub async fn new(bot: Bot, db: Arc<DatabaseManager>, config: Arc<Config>) -> AgendaResult<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            bot,
            db,
            config,
            scheduler,
        })
    }

    /// Registers the job. Does nothing unless an operator chat is configured.
    pub async fn start(&mut self) -> AgendaResult<()> {
        let Some(chat_id) = self.config.operator_chat_id else {
            log_system_event("Agenda disabled", Some("OPERATOR_CHAT_ID is not set"));
            return Ok(());
        };

        let bot = self.bot.clone();
        let db = self.db.clone();
        let currency = self.config.currency.clone();

        let job = Job::new_async(self.config.agenda_cron.as_str(), move |_uuid, _l| {
            let bot = bot.clone();
            let db = db.clone();
            let currency = currency.clone();
            Box::pin(async move {
                if let Err(e) = send_agenda(&bot, &db, ChatId(chat_id), &currency).await {
                    tracing::error!("Failed to send daily agenda: {}", e);
                }
            })
        })?;

        self.scheduler.add(job).await?;
        self.scheduler.start().await?;

        log_system_event(
            "Agenda started",
            Some(&format!("cron '{}' to chat {}", self.config.agenda_cron, chat_id)),
        );
        Ok(())
    }

    pub async fn stop(&mut self) -> AgendaResult<()> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}

async fn send_agenda(
    bot: &Bot,
    db: &DatabaseManager,
    chat_id: ChatId,
    currency: &str,
) -> AgendaResult<()> {
    let today = today();
    let lessons = ensure_instances_for_date(&db.pool, today).await?;
    let (text, keyboard) = render_day(today, today, &lessons, currency);

    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    tracing::info!("Sent agenda for {} with {} lessons to chat {}", today, lessons.len(), chat_id);

    Ok(())
}
