use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    // Required fields
    name: "VRF Raffle",
    project_url: "https://github.com/vrf-raffle/vrf-raffle",
    contacts: "link:https://github.com/vrf-raffle/vrf-raffle/security/advisories/new",
    policy: "https://github.com/vrf-raffle/vrf-raffle/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/vrf-raffle/vrf-raffle"
}

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod vrf_raffle {
    use super::*;
    use crate::instructions::{admin, enter, lifecycle, oracle, upkeep};

    pub fn initialize_raffle(
        ctx: Context<InitializeRaffle>,
        params: InitializeRaffleParams,
    ) -> Result<()> {
        admin::initialize_raffle(ctx, params)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        enter::enter_raffle(ctx, amount)
    }

    // ----------------------------
    // Automation
    // ----------------------------
    pub fn check_upkeep(ctx: Context<ViewRaffle>, check_data: Vec<u8>) -> Result<UpkeepStatus> {
        upkeep::check_upkeep(ctx, check_data)
    }

    pub fn begin_selection(ctx: Context<BeginSelection>, perform_data: Vec<u8>) -> Result<()> {
        upkeep::begin_selection(ctx, perform_data)
    }

    // ----------------------------
    // Oracle
    // ----------------------------
    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: [u8; 32],
        random_words: Vec<u64>,
    ) -> Result<()> {
        oracle::fulfill_random_words(ctx, request_id, random_words)
    }

    pub fn cancel_stalled_request(ctx: Context<CancelStalledRequest>) -> Result<()> {
        lifecycle::cancel_stalled_request(ctx)
    }

    // views
    pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
        upkeep::get_player(ctx, index)
    }

    pub fn get_raffle_info(ctx: Context<ViewRaffle>) -> Result<RaffleInfo> {
        upkeep::get_raffle_info(ctx)
    }
}
