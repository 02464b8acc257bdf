use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::{events::EnteredRaffle, EnterRaffle};

/// Pays `amount` (at least the entrance fee) into the vault and joins the current round.
/// The whole payment stays in the pool; there are no refunds.
pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();

    // state first, then the transfer
    ctx.accounts.raffle.record_entry(player, amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(EnteredRaffle {
        raffle: ctx.accounts.raffle.key(),
        player,
        amount,
    });

    Ok(())
}
