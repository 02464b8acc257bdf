// programs/vrf_raffle/src/contexts.rs

use anchor_lang::prelude::*;

use crate::state::Raffle;

#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    #[account(
        init,
        payer = creator,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [crate::RAFFLE_SEED, creator.key().as_ref()],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// CHECK: system-owned vault PDA, holds lamports, no data
    #[account(
        init,
        payer = creator,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::VAULT_SEED, raffle.key().as_ref()],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, raffle.creator.as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, raffle.key().as_ref()],
        bump = raffle.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Read-only: no account is writable, so nothing can change.
#[derive(Accounts)]
pub struct ViewRaffle<'info> {
    #[account(
        seeds = [crate::RAFFLE_SEED, raffle.creator.as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        seeds = [crate::VAULT_SEED, raffle.key().as_ref()],
        bump = raffle.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct BeginSelection<'info> {
    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, raffle.creator.as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        seeds = [crate::VAULT_SEED, raffle.key().as_ref()],
        bump = raffle.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, raffle.creator.as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, raffle.key().as_ref()],
        bump = raffle.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: must equal the selected player; checked in the handler.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    /// CHECK: instruction sysvar (for ed25519 introspection). Address enforced.
    #[account(address = anchor_lang::solana_program::sysvar::instructions::ID)]
    pub instructions: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CancelStalledRequest<'info> {
    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, raffle.creator.as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    pub caller: Signer<'info>,
}
