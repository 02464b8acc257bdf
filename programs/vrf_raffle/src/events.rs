use anchor_lang::prelude::*;

#[event]
pub struct RaffleInitialized {
    pub raffle: Pubkey,
    pub vault: Pubkey,
    pub entrance_fee: u64,
    pub interval: u64,
    pub coordinator: Pubkey,
}

#[event]
pub struct EnteredRaffle {
    pub raffle: Pubkey,
    pub player: Pubkey,
    pub amount: u64,
}

/// The request the oracle serves. Off-chain oracles subscribe to this event.
#[event]
pub struct RandomWordsRequested {
    pub raffle: Pubkey,
    pub request_id: [u8; 32],
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_compute_limit: u32,
    pub num_words: u32,
    pub request_slot: u64,
}

#[event]
pub struct RequestedRaffleWinner {
    pub raffle: Pubkey,
    pub request_id: [u8; 32],
}

#[event]
pub struct PickedWinner {
    pub raffle: Pubkey,
    pub winner: Pubkey,
}

#[event]
pub struct RequestCancelled {
    pub raffle: Pubkey,
    pub request_id: [u8; 32],
    pub cancelled_by: Pubkey,
}
