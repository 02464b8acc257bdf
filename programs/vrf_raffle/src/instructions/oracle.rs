use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::{
    errors::RaffleError,
    events::PickedWinner,
    utils::{assert_fulfillment_signed, check_winner_account, pool_balance, verify_payout},
    FulfillRandomWords, VAULT_SEED,
};

// Tx layout must be: [ ed25519_verify, fulfill_random_words ]
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: [u8; 32],
    random_words: Vec<u64>,
) -> Result<()> {
    let raffle_key = ctx.accounts.raffle.key();

    // --- ed25519 introspection ---
    let ix_sys = ctx.accounts.instructions.to_account_info();
    let current_ix = load_current_index_checked(&ix_sys)? as usize;
    require!(current_ix >= 1, RaffleError::MissingOrInvalidEd25519Ix);

    let ed_ix = load_instruction_at_checked(current_ix - 1, &ix_sys)
        .map_err(|_| error!(RaffleError::MissingOrInvalidEd25519Ix))?;

    assert_fulfillment_signed(
        &ed_ix,
        ctx.program_id,
        &raffle_key,
        &ctx.accounts.raffle.oracle.coordinator,
        &request_id,
        &random_words,
    )?;

    // select + reset
    let clock = Clock::get()?;
    let raffle = &mut ctx.accounts.raffle;
    let vault_bump = raffle.vault_bump;
    let winner = raffle.settle(&request_id, &random_words, clock.unix_timestamp, clock.slot)?;

    check_winner_account(&ctx.accounts.winner.key(), &winner)?;

    msg!("Winner: {}", winner);
    emit!(PickedWinner {
        raffle: raffle_key,
        winner,
    });

    // payout: whole pool, rent reserve stays in the vault
    let payout = pool_balance(&ctx.accounts.vault, &Rent::get()?);
    if payout > 0 {
        let pre_balance = ctx.accounts.winner.lamports();

        let ix = system_instruction::transfer(&ctx.accounts.vault.key(), &winner, payout);
        let signer_seeds: &[&[u8]] = &[VAULT_SEED, raffle_key.as_ref(), &[vault_bump]];

        invoke_signed(
            &ix,
            &[
                ctx.accounts.vault.to_account_info(),
                ctx.accounts.winner.to_account_info(),
                ctx.accounts.system_program.to_account_info(),
            ],
            &[signer_seeds],
        )
        .map_err(|_| error!(RaffleError::PayoutTransferFailed))?;

        verify_payout(pre_balance, ctx.accounts.winner.lamports(), payout)?;
    }

    Ok(())
}
