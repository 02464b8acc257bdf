use anchor_lang::prelude::*;

use crate::{events::RequestCancelled, CancelStalledRequest};

/// Anyone may reopen a round whose randomness request went unanswered for
/// `REQUEST_TIMEOUT_SECONDS`. Players and pool carry over; the next upkeep re-requests.
pub fn cancel_stalled_request(ctx: Context<CancelStalledRequest>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let raffle_key = ctx.accounts.raffle.key();

    let cancelled = ctx.accounts.raffle.cancel_stalled_request(now)?;

    msg!(
        "Stalled request cancelled: requested_at={} now={}",
        cancelled.requested_at,
        now
    );

    emit!(RequestCancelled {
        raffle: raffle_key,
        request_id: cancelled.request_id,
        cancelled_by: ctx.accounts.caller.key(),
    });

    Ok(())
}
