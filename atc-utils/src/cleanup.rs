use poise::serenity_prelude as serenity;
use tracing::{error, warn};

use crate::time::now_unix_secs;

const BULK_DELETE_MAX_AGE_SECS: u64 = 14 * 24 * 60 * 60;
const BULK_DELETE_SAFETY_BUFFER_SECS: u64 = 60 * 60;
const HISTORY_PAGE_SIZE: u8 = 100;
const BULK_DELETE_CHUNK: usize = 100;

/// Oldest unix timestamp still eligible for the bulk-delete endpoint.
pub fn bulk_delete_cutoff(now_secs: u64) -> i64 {
    now_secs.saturating_sub(BULK_DELETE_MAX_AGE_SECS.saturating_sub(BULK_DELETE_SAFETY_BUFFER_SECS))
        as i64
}

/// Split `(id, created_at)` pairs into bulk-deletable and single-delete ids.
pub fn partition_by_age<T: Copy>(messages: &[(T, i64)], cutoff: i64) -> (Vec<T>, Vec<T>) {
    let mut bulk = Vec::new();
    let mut single = Vec::new();

    for (id, created_at) in messages {
        if *created_at >= cutoff {
            bulk.push(*id);
        } else {
            single.push(*id);
        }
    }

    (bulk, single)
}

/// Delete the newest `limit` messages of a channel, returning how many were removed.
///
/// Recent messages go through the bulk endpoint in chunks; anything older than
/// the bulk window, or a chunk of one, is deleted individually.
pub async fn purge_recent_messages(
    http: &serenity::Http,
    channel_id: serenity::ChannelId,
    limit: u64,
) -> anyhow::Result<u64> {
    let mut collected: Vec<(serenity::MessageId, i64)> = Vec::new();
    let mut before: Option<serenity::MessageId> = None;

    while (collected.len() as u64) < limit {
        let remaining = limit - collected.len() as u64;
        let page_size = remaining.min(u64::from(HISTORY_PAGE_SIZE)) as u8;

        let get_messages = match before {
            Some(before_id) => serenity::GetMessages::new().before(before_id).limit(page_size),
            None => serenity::GetMessages::new().limit(page_size),
        };

        let messages = channel_id.messages(http, get_messages).await?;
        if messages.is_empty() {
            break;
        }

        before = messages.last().map(|message| message.id);
        let page_len = messages.len();
        collected.extend(
            messages
                .into_iter()
                .map(|message| (message.id, message.timestamp.unix_timestamp())),
        );

        if page_len < usize::from(page_size) {
            break;
        }
    }

    if collected.is_empty() {
        return Ok(0);
    }

    let (bulk_candidate_ids, mut single_delete_ids) =
        partition_by_age(&collected, bulk_delete_cutoff(now_unix_secs()));

    let mut deleted_count = 0_u64;
    let mut last_error: Option<serenity::Error> = None;

    for chunk in bulk_candidate_ids.chunks(BULK_DELETE_CHUNK) {
        if chunk.len() < 2 {
            single_delete_ids.extend_from_slice(chunk);
            continue;
        }

        match channel_id.delete_messages(http, chunk.to_vec()).await {
            Ok(()) => {
                deleted_count = deleted_count.saturating_add(chunk.len() as u64);
            }
            Err(source) => {
                error!(
                    ?source,
                    channel_id = channel_id.get(),
                    count = chunk.len(),
                    "bulk delete failed, falling back to single delete"
                );
                single_delete_ids.extend_from_slice(chunk);
            }
        }
    }

    for message_id in single_delete_ids {
        match channel_id.delete_message(http, message_id).await {
            Ok(()) => deleted_count = deleted_count.saturating_add(1),
            Err(source) => {
                warn!(?source, message_id = message_id.get(), "single delete failed");
                last_error = Some(source);
            }
        }
    }

    match last_error {
        Some(source) if deleted_count == 0 => Err(source.into()),
        _ => Ok(deleted_count),
    }
}
