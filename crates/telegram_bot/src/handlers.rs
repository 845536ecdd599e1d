use engine::{Effect, EngineError, Event, RecordHandle, SystemClock};
use teloxide::{
    prelude::*,
    types::{ChatId, MessageId, User},
};

use crate::{ConfigParameters, ui};

pub(crate) async fn handle_message(
    bot: Bot,
    msg: Message,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    if !is_allowed(&cfg, msg.from.as_ref()) {
        return Ok(());
    }
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let event = if let Some(cmd) = parse_command(text) {
        match cmd {
            Command::Start => Event::Start,
            Command::Energy => Event::EnergyRequested,
            Command::Complete => Event::CompleteRequested,
        }
    } else if text.trim_start().starts_with('/') {
        // Unknown command; leave it to other bots or typos.
        return Ok(());
    } else {
        Event::Text(text.to_string())
    };

    dispatch(&bot, msg.chat.id, None, &cfg, from.id.0, event).await
}

pub(crate) async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    if q.from.id != cfg.allowed_user {
        return Ok(());
    }

    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let origin = message.id();

    let _ = bot.answer_callback_query(q.id.clone()).await;

    let Some(choice) = q.data.as_deref().and_then(ui::parse_choice) else {
        return Ok(());
    };

    dispatch(&bot, chat_id, Some(origin), &cfg, q.from.id.0, Event::Chose(choice)).await
}

/// Runs one engine step: plan, execute the effects, commit.
///
/// The engine lock is held for the whole step, so events are processed one
/// at a time. A failed transport call bails out before the commit, leaving
/// the stored session ready for a retry of the same step.
///
/// `origin` is the keyboard message a callback came from; the first
/// chat-bound effect edits it in place instead of sending a new message.
async fn dispatch(
    bot: &Bot,
    chat_id: ChatId,
    origin: Option<MessageId>,
    cfg: &ConfigParameters,
    user_id: u64,
    event: Event,
) -> ResponseResult<()> {
    let mut engine = cfg.engine.lock().await;

    let mut outcome = match engine.plan(user_id, &event, &SystemClock) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::debug!("rejected {event:?}: {err}");
            bot.send_message(chat_id, user_message(&err)).await?;
            return Ok(());
        }
    };

    let mut origin = origin;
    for effect in &outcome.effects {
        match effect {
            Effect::Prompt { text } => {
                if let Some(message_id) = origin.take() {
                    bot.edit_message_text(chat_id, message_id, text.clone())
                        .await?;
                } else {
                    bot.send_message(chat_id, text.clone()).await?;
                }
            }
            Effect::Choose { text, options } => {
                let keyboard = ui::choice_keyboard(options);
                if let Some(message_id) = origin.take() {
                    bot.edit_message_text(chat_id, message_id, text.clone())
                        .reply_markup(keyboard)
                        .await?;
                } else {
                    bot.send_message(chat_id, text.clone())
                        .reply_markup(keyboard)
                        .await?;
                }
            }
            Effect::Publish { text } => {
                let sent = bot.send_message(cfg.channel, text.clone()).await?;
                outcome.session.attach_record(RecordHandle(sent.id.0));
            }
            Effect::Edit { record, text } => {
                bot.edit_message_text(cfg.channel, MessageId(record.0), text.clone())
                    .await?;
            }
        }
    }

    engine.commit(user_id, outcome.session);
    Ok(())
}

fn user_message(err: &EngineError) -> String {
    match err {
        EngineError::InvalidDecimal(_) => "❌ Enter valid decimal value".to_string(),
        EngineError::InvalidInteger(_) => "❌ Enter valid number".to_string(),
        EngineError::EnergyNotHome => "❌ Energy is only for Home Charging.".to_string(),
        EngineError::NoActiveSession => "❌ No active charging session.".to_string(),
        EngineError::RecordUnavailable => {
            "❌ The log entry is not published yet. Try again.".to_string()
        }
        EngineError::Inapplicable(reason) => format!("❌ Nothing to do here: {reason}."),
    }
}

fn is_allowed(cfg: &ConfigParameters, from: Option<&User>) -> bool {
    from.is_some_and(|user| user.id == cfg.allowed_user)
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Start,
    Energy,
    Complete,
}

fn parse_command(text: &str) -> Option<Command> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }
    let cmd = trimmed.split_whitespace().next().unwrap_or("");

    match cmd {
        "/start" => Some(Command::Start),
        "/energy" => Some(Command::Energy),
        "/complete" => Some(Command::Complete),
        _ => None,
    }
}
