use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::RaffleError,
    utils::{derive_request_id, winner_index, InitializeRaffleParams},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum RaffleState {
    Open,
    Calculating,
}

/// Where randomness comes from. Fixed at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct OracleBinding {
    /// Ed25519 key of the oracle; fulfillments must be signed by it.
    pub coordinator: Pubkey,
    /// Gas lane the oracle serves the request on.
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_compute_limit: u32,
}

impl OracleBinding {
    pub fn validate(&self) -> Result<()> {
        require!(self.coordinator != Pubkey::default(), RaffleError::OracleNotSet);
        require!(
            self.callback_compute_limit > 0
                && self.callback_compute_limit <= MAX_CALLBACK_COMPUTE_LIMIT,
            RaffleError::InvalidCallbackLimit
        );
        Ok(())
    }
}

/// Token for the one randomness request a round may have in flight.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct PendingRequest {
    pub request_id: [u8; 32],
    pub requested_at: i64,
    pub request_slot: u64,
}

#[account]
#[derive(InitSpace)]
pub struct Raffle {
    pub creator: Pubkey,
    pub bump: u8,

    // System-owned PDA vault (holds the pool, no data)
    pub vault: Pubkey,
    pub vault_bump: u8,

    pub entrance_fee: u64,
    /// Seconds between rounds.
    pub interval: u64,
    pub last_timestamp: i64,

    pub state: RaffleState,
    pub recent_winner: Pubkey,

    pub oracle: OracleBinding,
    pub request_nonce: u64,
    pub pending_request: Option<PendingRequest>,

    // NOTE: must match MAX_PLAYERS
    #[max_len(256)]
    pub players: Vec<Pubkey>,

    pub version: u16,
}

/// Result of the readiness predicate, with the inputs it was computed from.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct UpkeepStatus {
    pub upkeep_needed: bool,
    pub perform_data: Vec<u8>,
    pub pool_balance: u64,
    pub player_count: u64,
    pub state: RaffleState,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct RaffleInfo {
    pub entrance_fee: u64,
    pub interval: u64,
    pub player_count: u64,
    pub last_timestamp: i64,
    pub recent_winner: Pubkey,
    pub state: RaffleState,
    pub pool_balance: u64,
}

impl Raffle {
    pub fn initialize(
        &mut self,
        creator: Pubkey,
        bump: u8,
        vault: Pubkey,
        vault_bump: u8,
        params: &InitializeRaffleParams,
        now: i64,
    ) -> Result<()> {
        require!(params.entrance_fee > 0, RaffleError::InvalidEntranceFee);
        require!(params.interval > 0, RaffleError::InvalidInterval);

        let oracle = OracleBinding {
            coordinator: params.coordinator,
            key_hash: params.key_hash,
            subscription_id: params.subscription_id,
            callback_compute_limit: params.callback_compute_limit,
        };
        oracle.validate()?;

        self.creator = creator;
        self.bump = bump;
        self.vault = vault;
        self.vault_bump = vault_bump;

        self.entrance_fee = params.entrance_fee;
        self.interval = params.interval;
        self.last_timestamp = now;

        self.state = RaffleState::Open;
        self.recent_winner = Pubkey::default();

        self.oracle = oracle;
        self.request_nonce = 0;
        self.pending_request = None;

        self.players = Vec::new();
        self.version = INITIAL_VERSION;

        Ok(())
    }

    pub fn player_count(&self) -> u64 {
        self.players.len() as u64
    }

    pub fn player(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.players.get(i))
            .copied()
            .ok_or_else(|| error!(RaffleError::IndexOutOfRange))
    }

    pub fn info(&self, pool_balance: u64) -> RaffleInfo {
        RaffleInfo {
            entrance_fee: self.entrance_fee,
            interval: self.interval,
            player_count: self.player_count(),
            last_timestamp: self.last_timestamp,
            recent_winner: self.recent_winner,
            state: self.state,
            pool_balance,
        }
    }

    /// Readiness predicate: interval elapsed, open, funded and populated.
    pub fn upkeep_status(&self, now: i64, pool_balance: u64) -> UpkeepStatus {
        let elapsed = now.saturating_sub(self.last_timestamp);
        let time_passed = u64::try_from(elapsed).is_ok_and(|e| e >= self.interval);
        let is_open = self.state == RaffleState::Open;
        let player_count = self.player_count();

        UpkeepStatus {
            upkeep_needed: time_passed && is_open && pool_balance > 0 && player_count > 0,
            perform_data: Vec::new(),
            pool_balance,
            player_count,
            state: self.state,
        }
    }

    pub fn record_entry(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(amount >= self.entrance_fee, RaffleError::InsufficientPayment);
        require!(self.state == RaffleState::Open, RaffleError::RaffleClosed);
        require!(self.players.len() < MAX_PLAYERS, RaffleError::RaffleFull);

        self.players.push(player);
        Ok(())
    }

    /// OPEN -> CALCULATING. The state flips before the caller dispatches the request.
    pub fn open_request(
        &mut self,
        raffle_key: &Pubkey,
        now: i64,
        slot: u64,
        pool_balance: u64,
    ) -> Result<PendingRequest> {
        let status = self.upkeep_status(now, pool_balance);
        if !status.upkeep_needed {
            msg!(
                "Upkeep not needed: balance={} players={} state={:?}",
                status.pool_balance,
                status.player_count,
                status.state
            );
            return Err(RaffleError::UpkeepNotReady.into());
        }

        let request_id = derive_request_id(raffle_key, &self.oracle, self.request_nonce);
        let next_nonce = self
            .request_nonce
            .checked_add(1)
            .ok_or(RaffleError::MathOverflow)?;

        let pending = PendingRequest {
            request_id,
            requested_at: now,
            request_slot: slot,
        };

        self.state = RaffleState::Calculating;
        self.request_nonce = next_nonce;
        self.pending_request = Some(pending);

        Ok(pending)
    }

    /// CALCULATING -> OPEN. Picks the winner and resets the ledger; the caller pays out.
    pub fn settle(
        &mut self,
        request_id: &[u8; 32],
        random_words: &[u64],
        now: i64,
        slot: u64,
    ) -> Result<Pubkey> {
        let pending = self.pending_request.ok_or(RaffleError::NoPendingRequest)?;
        require!(
            self.state == RaffleState::Calculating,
            RaffleError::NoPendingRequest
        );
        require!(
            pending.request_id == *request_id,
            RaffleError::RequestIdMismatch
        );

        let confirmed_slot = pending
            .request_slot
            .checked_add(REQUEST_CONFIRMATIONS as u64)
            .ok_or(RaffleError::MathOverflow)?;
        require!(slot >= confirmed_slot, RaffleError::RandomnessNotConfirmed);

        let random_word = *random_words.first().ok_or(RaffleError::NoRandomWords)?;

        // count is read before the list is cleared
        let player_count = self.player_count();
        let index = winner_index(random_word, player_count)?;
        let winner = self.player(index)?;

        self.recent_winner = winner;
        self.state = RaffleState::Open;
        self.players.clear();
        self.last_timestamp = now;
        self.pending_request = None;

        Ok(winner)
    }

    /// Drops a request the oracle never answered. Players and pool stay for the next attempt.
    pub fn cancel_stalled_request(&mut self, now: i64) -> Result<PendingRequest> {
        let pending = self.pending_request.ok_or(RaffleError::NoPendingRequest)?;

        let deadline = pending
            .requested_at
            .checked_add(REQUEST_TIMEOUT_SECONDS)
            .ok_or(RaffleError::MathOverflow)?;
        require!(now >= deadline, RaffleError::RequestNotStalled);

        self.state = RaffleState::Open;
        self.pending_request = None;

        Ok(pending)
    }
}
