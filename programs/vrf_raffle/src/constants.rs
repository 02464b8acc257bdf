// Centralized Raffle Constants

// Oracle Request Parameters
// =========================

/// Slots the oracle must wait after a request before its fulfillment is accepted.
pub const REQUEST_CONFIRMATIONS: u16 = 3;

/// Random words requested per round. Only the first word is consumed.
pub const NUM_WORDS: u32 = 1;

/// Upper bound for the compute budget the oracle may spend delivering a fulfillment.
/// Matches the per-transaction compute unit ceiling.
pub const MAX_CALLBACK_COMPUTE_LIMIT: u32 = 1_400_000;

// Liveness
// ========

/// Seconds after which an unanswered randomness request may be cancelled by anyone.
/// The round reopens with its players and pool intact.
pub const REQUEST_TIMEOUT_SECONDS: i64 = 3_600;

// Ledger
// ======

/// Maximum number of entries per round. Must match `#[max_len]` on `Raffle::players`.
pub const MAX_PLAYERS: usize = 256;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;
