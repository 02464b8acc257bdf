use anchor_lang::prelude::*;

#[error_code]
pub enum RaffleError {
    #[msg("Payment is below the entrance fee")]
    InsufficientPayment,
    #[msg("Raffle is not open")]
    RaffleClosed,
    #[msg("Upkeep not needed")]
    UpkeepNotReady,
    #[msg("Payout transfer to winner failed")]
    PayoutTransferFailed,
    #[msg("Player index out of range")]
    IndexOutOfRange,

    // -----------------
    // Configuration
    // -----------------
    #[msg("Entrance fee must be greater than zero")]
    InvalidEntranceFee,
    #[msg("Interval must be greater than zero")]
    InvalidInterval,
    #[msg("Invalid callback compute limit")]
    InvalidCallbackLimit,
    #[msg("Oracle coordinator not set")]
    OracleNotSet,

    #[msg("Raffle is full")]
    RaffleFull,

    // -----------------
    // Randomness fulfillment
    // -----------------
    #[msg("No randomness request pending")]
    NoPendingRequest,
    #[msg("Request id does not match the pending request")]
    RequestIdMismatch,
    #[msg("Randomness request not confirmed yet")]
    RandomnessNotConfirmed,
    #[msg("No random words delivered")]
    NoRandomWords,
    #[msg("No players in round")]
    NoPlayers,
    #[msg("Winner account does not match selected winner")]
    WinnerAccountMismatch,
    #[msg("Pending request has not timed out")]
    RequestNotStalled,

    #[msg("Missing or invalid ed25519 verify instruction")]
    MissingOrInvalidEd25519Ix,
    #[msg("Ed25519 pubkey mismatch")]
    Ed25519PubkeyMismatch,
    #[msg("Ed25519 message mismatch")]
    Ed25519MessageMismatch,

    #[msg("Math overflow")]
    MathOverflow,
}
