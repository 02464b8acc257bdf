use anchor_lang::prelude::*;

use crate::{
    constants::{NUM_WORDS, REQUEST_CONFIRMATIONS},
    events::{RandomWordsRequested, RequestedRaffleWinner},
    state::{RaffleInfo, UpkeepStatus},
    utils::pool_balance,
    BeginSelection, ViewRaffle,
};

/// Polled by the automation agent. Never writes.
pub fn check_upkeep(ctx: Context<ViewRaffle>, _check_data: Vec<u8>) -> Result<UpkeepStatus> {
    let now = Clock::get()?.unix_timestamp;
    let pool = pool_balance(&ctx.accounts.vault, &Rent::get()?);

    Ok(ctx.accounts.raffle.upkeep_status(now, pool))
}

pub fn begin_selection(ctx: Context<BeginSelection>, _perform_data: Vec<u8>) -> Result<()> {
    let clock = Clock::get()?;
    let pool = pool_balance(&ctx.accounts.vault, &Rent::get()?);
    let raffle_key = ctx.accounts.raffle.key();

    let raffle = &mut ctx.accounts.raffle;
    let pending = raffle.open_request(&raffle_key, clock.unix_timestamp, clock.slot, pool)?;

    msg!(
        "Raffle calculating: players={} pool={}",
        raffle.player_count(),
        pool
    );

    // dispatch: the oracle serves requests off this event
    emit!(RandomWordsRequested {
        raffle: raffle_key,
        request_id: pending.request_id,
        key_hash: raffle.oracle.key_hash,
        subscription_id: raffle.oracle.subscription_id,
        request_confirmations: REQUEST_CONFIRMATIONS,
        callback_compute_limit: raffle.oracle.callback_compute_limit,
        num_words: NUM_WORDS,
        request_slot: pending.request_slot,
    });

    emit!(RequestedRaffleWinner {
        raffle: raffle_key,
        request_id: pending.request_id,
    });

    Ok(())
}

pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
    ctx.accounts.raffle.player(index)
}

pub fn get_raffle_info(ctx: Context<ViewRaffle>) -> Result<RaffleInfo> {
    let pool = pool_balance(&ctx.accounts.vault, &Rent::get()?);
    Ok(ctx.accounts.raffle.info(pool))
}
