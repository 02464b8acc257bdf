use anchor_lang::prelude::*;

use crate::events::RaffleInitialized;
use crate::utils::InitializeRaffleParams;
use crate::InitializeRaffle;

pub fn initialize_raffle(
    ctx: Context<InitializeRaffle>,
    params: InitializeRaffleParams,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let raffle_key = ctx.accounts.raffle.key();
    let vault_key = ctx.accounts.vault.key();
    let creator = ctx.accounts.creator.key();

    let raffle = &mut ctx.accounts.raffle;
    raffle.initialize(
        creator,
        ctx.bumps.raffle,
        vault_key,
        ctx.bumps.vault,
        &params,
        now,
    )?;

    emit!(RaffleInitialized {
        raffle: raffle_key,
        vault: vault_key,
        entrance_fee: raffle.entrance_fee,
        interval: raffle.interval,
        coordinator: raffle.oracle.coordinator,
    });

    Ok(())
}
