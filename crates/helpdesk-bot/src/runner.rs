//! Long-polling runner
//!
//! Polls the transport, confirms each update by advancing the offset and
//! handles every update in its own task. Store work runs on the blocking
//! pool. Returns once `shutdown` resolves and in-flight updates finished.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use helpdesk_core::errors::{HdError, HdErrorKind};
use helpdesk_core_types::RequestId;
use helpdesk_store::Storage;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::dispatcher::{dispatch_callback, dispatch_text};
use crate::telegram::{CallbackQuery, ChatTransport, Message, Update};

/// Pause before re-polling after a failed `get_updates`
pub const POLL_RETRY_PAUSE: Duration = Duration::from_secs(3);

/// Run until `shutdown` completes, then close the storage
///
/// # Errors
///
/// `getMe` failing at startup (a bad token, usually) and teardown
/// failures; polling errors are logged and retried.
pub async fn run<T, F>(
    transport: Arc<T>,
    storage: Storage,
    poll_timeout_secs: u64,
    shutdown: F,
) -> Result<(), HdError>
where
    T: ChatTransport + ?Sized + 'static,
    F: Future<Output = ()>,
{
    let me = transport.get_me().await?;
    let bot_username: Option<Arc<str>> = me.username.map(Arc::from);

    tokio::pin!(shutdown);
    let mut offset: Option<i64> = None;
    let mut in_flight = JoinSet::new();

    tracing::info!(
        db = %storage.path().display(),
        bot = bot_username.as_deref().unwrap_or("?"),
        "bot polling started"
    );

    loop {
        while in_flight.try_join_next().is_some() {}

        let polled = tokio::select! {
            _ = &mut shutdown => break,
            polled = transport.get_updates(offset, poll_timeout_secs) => polled,
        };

        match polled {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);

                    let span = tracing::info_span!(
                        "update",
                        request_id = %RequestId::new(),
                        update_id = update.update_id
                    );
                    let transport = Arc::clone(&transport);
                    let storage = storage.clone();
                    let bot_username = bot_username.clone();
                    in_flight.spawn(
                        async move {
                            let bot_username = bot_username.as_deref();
                            handle_update(transport.as_ref(), &storage, bot_username, update).await
                        }
                        .instrument(span),
                    );
                }
            }
            Err(e) => {
                tracing::warn!(err.code = e.code(), error = %e, "polling failed");
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(POLL_RETRY_PAUSE) => {}
                }
            }
        }
    }

    tracing::info!(pending = in_flight.len(), "shutting down");
    while in_flight.join_next().await.is_some() {}

    tokio::task::spawn_blocking(move || storage.close())
        .await
        .map_err(|e| {
            HdError::new(HdErrorKind::Internal)
                .with_op("storage_close")
                .with_message(e.to_string())
        })?
}

/// Handle one update; every failure is logged, never propagated
///
/// `bot_username` is this bot's own name, used to skip commands
/// addressed to other bots.
pub async fn handle_update<T>(
    transport: &T,
    storage: &Storage,
    bot_username: Option<&str>,
    update: Update,
) where
    T: ChatTransport + ?Sized,
{
    if let Some(query) = update.callback_query {
        handle_callback(transport, storage, query).await;
    } else if let Some(message) = update.message {
        handle_message(transport, storage, bot_username, message).await;
    }
}

async fn handle_message<T>(
    transport: &T,
    storage: &Storage,
    bot_username: Option<&str>,
    message: Message,
) where
    T: ChatTransport + ?Sized,
{
    let Some(text) = message.text else {
        return;
    };
    let chat_id = message.chat.id;

    let storage = storage.clone();
    let bot_username = bot_username.map(str::to_owned);
    let dispatch = move || dispatch_text(&storage, bot_username.as_deref(), &text);
    let replies = match tokio::task::spawn_blocking(dispatch).await {
        Ok(replies) => replies,
        Err(e) => {
            tracing::error!(chat_id, error = %e, "dispatcher task failed");
            return;
        }
    };

    for reply in &replies {
        if let Err(e) = transport.send_message(chat_id, reply).await {
            tracing::warn!(chat_id, err.code = e.code(), error = %e, "send failed");
        }
    }
}

async fn handle_callback<T>(transport: &T, storage: &Storage, query: CallbackQuery)
where
    T: ChatTransport + ?Sized,
{
    // Acknowledge before touching any state
    if let Err(e) = transport.answer_callback(&query.id).await {
        tracing::warn!(err.code = e.code(), error = %e, "callback answer failed");
    }

    let data = query.data.unwrap_or_default();
    let storage = storage.clone();
    let dispatch = move || dispatch_callback(&storage, &data);
    let outcome = match tokio::task::spawn_blocking(dispatch).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "callback task failed");
            return;
        }
    };

    let Some(message) = query.message else {
        tracing::debug!("callback without message, nothing to edit");
        return;
    };
    if let Err(e) = transport
        .edit_message_text(message.chat.id, message.message_id, &outcome)
        .await
    {
        tracing::warn!(err.code = e.code(), error = %e, "edit failed");
    }
}
