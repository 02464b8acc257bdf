use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use solana_sha256_hasher::hashv;

use crate::{errors::RaffleError, state::OracleBinding};

// Ed25519SigVerify111111111111111111111111111
pub fn ed25519_program_id() -> Pubkey {
    Pubkey::new_from_array([
        3, 125, 70, 214, 124, 147, 251, 190, 18, 249, 66, 143, 131, 141, 64, 255,
        5, 112, 116, 73, 39, 244, 138, 100, 252, 202, 112, 68, 128, 0, 0, 0,
    ])
}

// -----------------
// Seeds
// -----------------
pub const RAFFLE_SEED: &[u8] = b"raffle_v1";
pub const VAULT_SEED: &[u8] = b"vault_v1";

const REQUEST_DOMAIN: &[u8] = b"vrf-raffle:request_v1";
const FULFILL_DOMAIN: &[u8] = b"vrf-raffle:fulfill_v1";

// ---------------
// Payloads
// ---------------
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct InitializeRaffleParams {
    pub entrance_fee: u64,
    pub interval: u64,
    pub coordinator: Pubkey,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_compute_limit: u32,
}

// -------------------------
// Request id
// -------------------------
/// Unique per raffle and nonce; the oracle binds its randomness to this id.
pub fn derive_request_id(raffle: &Pubkey, oracle: &OracleBinding, nonce: u64) -> [u8; 32] {
    hashv(&[
        REQUEST_DOMAIN,
        raffle.as_ref(),
        oracle.key_hash.as_ref(),
        oracle.subscription_id.to_le_bytes().as_ref(),
        nonce.to_le_bytes().as_ref(),
    ])
    .to_bytes()
}

/// Lamports available for payout; the vault's rent reserve is never paid out.
pub fn pool_balance(vault: &AccountInfo, rent: &Rent) -> u64 {
    vault.lamports().saturating_sub(rent.minimum_balance(0))
}

/// The winner must have received exactly the payout.
pub fn verify_payout(pre_balance: u64, post_balance: u64, payout: u64) -> Result<()> {
    let expected = pre_balance
        .checked_add(payout)
        .ok_or(RaffleError::MathOverflow)?;
    require!(post_balance == expected, RaffleError::PayoutTransferFailed);
    Ok(())
}

pub fn check_winner_account(supplied: &Pubkey, selected: &Pubkey) -> Result<()> {
    require_keys_eq!(*supplied, *selected, RaffleError::WinnerAccountMismatch);
    Ok(())
}

pub fn winner_index(random_word: u64, player_count: u64) -> Result<u64> {
    random_word
        .checked_rem(player_count)
        .ok_or_else(|| error!(RaffleError::NoPlayers))
}

// -------------------------
// Oracle fulfillment msg + ed25519 parsing
// -------------------------
pub fn expected_fulfillment_msg(
    program_id: &Pubkey,
    raffle: &Pubkey,
    request_id: &[u8; 32],
    random_words: &[u64],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(FULFILL_DOMAIN.len() + 32 + 32 + 32 + 4 + 8 * random_words.len());
    out.extend_from_slice(FULFILL_DOMAIN);
    out.extend_from_slice(program_id.as_ref());
    out.extend_from_slice(raffle.as_ref());
    out.extend_from_slice(request_id);
    out.extend_from_slice(&(random_words.len() as u32).to_le_bytes());
    for word in random_words {
        out.extend_from_slice(&word.to_le_bytes());
    }
    out
}

pub fn parse_ed25519_ix_pubkey_and_msg(ix: &Instruction) -> Result<(Pubkey, Vec<u8>)> {
    require!(
        ix.program_id == ed25519_program_id(),
        RaffleError::MissingOrInvalidEd25519Ix
    );

    let data = &ix.data;
    require!(data.len() >= 16, RaffleError::MissingOrInvalidEd25519Ix);

    let num_sigs = data[0];
    require!(num_sigs == 1, RaffleError::MissingOrInvalidEd25519Ix);

    // Offsets must point into this same instruction (index == u16::MAX)
    let sig_ix = u16::from_le_bytes([data[4], data[5]]);
    let pk_ix = u16::from_le_bytes([data[8], data[9]]);
    let msg_ix = u16::from_le_bytes([data[14], data[15]]);
    require!(sig_ix == u16::MAX, RaffleError::MissingOrInvalidEd25519Ix);
    require!(pk_ix == u16::MAX, RaffleError::MissingOrInvalidEd25519Ix);
    require!(msg_ix == u16::MAX, RaffleError::MissingOrInvalidEd25519Ix);

    let pk_off = u16::from_le_bytes([data[6], data[7]]) as usize;
    let msg_off = u16::from_le_bytes([data[10], data[11]]) as usize;
    let msg_sz = u16::from_le_bytes([data[12], data[13]]) as usize;

    require!(pk_off + 32 <= data.len(), RaffleError::MissingOrInvalidEd25519Ix);
    require!(msg_off + msg_sz <= data.len(), RaffleError::MissingOrInvalidEd25519Ix);

    let pk_bytes: [u8; 32] = data[pk_off..pk_off + 32]
        .try_into()
        .map_err(|_| error!(RaffleError::MissingOrInvalidEd25519Ix))?;
    let msg = data[msg_off..msg_off + msg_sz].to_vec();

    Ok((Pubkey::new_from_array(pk_bytes), msg))
}

pub fn assert_ed25519_ix_matches(
    ix: &Instruction,
    expected_pubkey: &Pubkey,
    expected_msg: &[u8],
) -> Result<()> {
    let (pk, msg) = parse_ed25519_ix_pubkey_and_msg(ix)?;

    require_keys_eq!(pk, *expected_pubkey, RaffleError::Ed25519PubkeyMismatch);
    require!(msg.as_slice() == expected_msg, RaffleError::Ed25519MessageMismatch);

    Ok(())
}

/// `ix` must be the coordinator's signature over exactly these words for this request.
pub fn assert_fulfillment_signed(
    ix: &Instruction,
    program_id: &Pubkey,
    raffle: &Pubkey,
    coordinator: &Pubkey,
    request_id: &[u8; 32],
    random_words: &[u64],
) -> Result<()> {
    let expected = expected_fulfillment_msg(program_id, raffle, request_id, random_words);
    assert_ed25519_ix_matches(ix, coordinator, expected.as_slice())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn u16le(v: u16) -> [u8; 2] {
        v.to_le_bytes()
    }

    /// Builds ed25519 precompile instruction data with the standard layout:
    /// [num_sigs: u8, padding: u8, offsets(14 bytes), signature(64), pubkey(32), msg(N)]
    ///
    /// The signature bytes are zeroed; only the parser is under test here.
    pub(crate) fn make_ed25519_ix(pubkey: [u8; 32], msg: &[u8], sig_ix: u16, pk_ix: u16, msg_ix: u16) -> Instruction {
        let header_len: usize = 2 + 14;
        let sig_off: u16 = header_len as u16;
        let pk_off: u16 = sig_off + 64;
        let msg_off: u16 = pk_off + 32;
        let msg_sz: u16 = msg
            .len()
            .try_into()
            .expect("message too long for u16 size in this test");

        let mut data = vec![0u8; header_len + 64 + 32 + msg.len()];
        data[0] = 1;

        let o = 2usize;
        data[o..o + 2].copy_from_slice(&u16le(sig_off));
        data[o + 2..o + 4].copy_from_slice(&u16le(sig_ix));
        data[o + 4..o + 6].copy_from_slice(&u16le(pk_off));
        data[o + 6..o + 8].copy_from_slice(&u16le(pk_ix));
        data[o + 8..o + 10].copy_from_slice(&u16le(msg_off));
        data[o + 10..o + 12].copy_from_slice(&u16le(msg_sz));
        data[o + 12..o + 14].copy_from_slice(&u16le(msg_ix));

        let pk_start = pk_off as usize;
        let msg_start = msg_off as usize;
        data[pk_start..pk_start + 32].copy_from_slice(&pubkey);
        data[msg_start..msg_start + msg.len()].copy_from_slice(msg);

        Instruction {
            program_id: ed25519_program_id(),
            accounts: vec![],
            data,
        }
    }

    fn self_contained_ix(msg: &[u8]) -> Instruction {
        make_ed25519_ix(Pubkey::new_unique().to_bytes(), msg, u16::MAX, u16::MAX, u16::MAX)
    }

    fn vault_info<'a>(
        key: &'a Pubkey,
        lamports: &'a mut u64,
        data: &'a mut [u8],
        owner: &'a Pubkey,
    ) -> AccountInfo<'a> {
        AccountInfo::new(key, false, true, lamports, data, owner, false, 0)
    }

    fn binding() -> OracleBinding {
        OracleBinding {
            coordinator: Pubkey::new_unique(),
            key_hash: [7u8; 32],
            subscription_id: 42,
            callback_compute_limit: 200_000,
        }
    }

    #[test]
    fn request_id_changes_with_nonce_and_raffle() {
        let raffle = Pubkey::new_unique();
        let oracle = binding();

        let first = derive_request_id(&raffle, &oracle, 0);
        assert_eq!(first, derive_request_id(&raffle, &oracle, 0));
        assert_ne!(first, derive_request_id(&raffle, &oracle, 1));
        assert_ne!(first, derive_request_id(&Pubkey::new_unique(), &oracle, 0));
    }

    #[test]
    fn winner_index_is_word_mod_count() {
        assert_eq!(winner_index(7, 3).unwrap(), 1);
        assert_eq!(winner_index(u64::MAX, 1).unwrap(), 0);
        assert!(winner_index(7, 0).is_err());
    }

    #[test]
    fn fulfillment_msg_binds_every_word() {
        let program_id = Pubkey::new_unique();
        let raffle = Pubkey::new_unique();
        let request_id = [9u8; 32];

        let one = expected_fulfillment_msg(&program_id, &raffle, &request_id, &[7]);
        let two = expected_fulfillment_msg(&program_id, &raffle, &request_id, &[7, 8]);
        assert_eq!(one.len() + 8, two.len());
        assert!(one.starts_with(FULFILL_DOMAIN));
        assert_ne!(one, expected_fulfillment_msg(&program_id, &raffle, &request_id, &[8]));
    }

    #[test]
    fn parse_ed25519_accepts_self_contained_indices() {
        let oracle = Pubkey::new_unique();
        let msg = b"hello-world".to_vec();

        let ix = make_ed25519_ix(oracle.to_bytes(), &msg, u16::MAX, u16::MAX, u16::MAX);

        let (pk, parsed_msg) = parse_ed25519_ix_pubkey_and_msg(&ix).expect("should parse");
        assert_eq!(pk, oracle);
        assert_eq!(parsed_msg, msg);
    }

    #[test]
    fn parse_ed25519_rejects_external_message_instruction_index() {
        let oracle = Pubkey::new_unique();
        let ix = make_ed25519_ix(oracle.to_bytes(), b"evil-msg", u16::MAX, u16::MAX, 0);

        let res = parse_ed25519_ix_pubkey_and_msg(&ix);
        assert!(res.is_err(), "parser must reject non-self-contained msg_ix");
    }

    #[test]
    fn parse_ed25519_rejects_other_programs() {
        let oracle = Pubkey::new_unique();
        let mut ix = make_ed25519_ix(oracle.to_bytes(), b"msg", u16::MAX, u16::MAX, u16::MAX);
        ix.program_id = Pubkey::new_unique();

        assert!(parse_ed25519_ix_pubkey_and_msg(&ix).is_err());
    }

    #[test]
    fn assert_ed25519_ix_matches_rejects_wrong_pubkey_or_msg() {
        let oracle = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let msg = expected_fulfillment_msg(&Pubkey::new_unique(), &Pubkey::new_unique(), &[1u8; 32], &[7]);

        let ix = make_ed25519_ix(oracle.to_bytes(), &msg, u16::MAX, u16::MAX, u16::MAX);

        assert!(assert_ed25519_ix_matches(&ix, &oracle, &msg).is_ok());

        let res_pk = assert_ed25519_ix_matches(&ix, &other, &msg);
        assert_eq!(res_pk.unwrap_err(), anchor_lang::error::Error::from(RaffleError::Ed25519PubkeyMismatch));

        let res_msg = assert_ed25519_ix_matches(&ix, &oracle, b"bad");
        assert_eq!(res_msg.unwrap_err(), anchor_lang::error::Error::from(RaffleError::Ed25519MessageMismatch));
    }

    #[test]
    fn parse_ed25519_rejects_short_header() {
        let ix = Instruction {
            program_id: ed25519_program_id(),
            accounts: vec![],
            data: vec![1u8; 15],
        };
        assert_eq!(
            parse_ed25519_ix_pubkey_and_msg(&ix).unwrap_err(),
            anchor_lang::error::Error::from(RaffleError::MissingOrInvalidEd25519Ix)
        );
    }

    #[test]
    fn parse_ed25519_rejects_multiple_signatures() {
        for num_sigs in [0u8, 2] {
            let mut ix = self_contained_ix(b"msg");
            ix.data[0] = num_sigs;
            assert!(parse_ed25519_ix_pubkey_and_msg(&ix).is_err());
        }
    }

    #[test]
    fn parse_ed25519_rejects_offsets_past_end() {
        let mut ix = self_contained_ix(b"msg");
        let len = ix.data.len() as u16;
        ix.data[6..8].copy_from_slice(&u16le(len - 31));
        assert!(parse_ed25519_ix_pubkey_and_msg(&ix).is_err());

        let mut ix = self_contained_ix(b"msg");
        ix.data[12..14].copy_from_slice(&u16le(4));
        assert!(parse_ed25519_ix_pubkey_and_msg(&ix).is_err());

        let mut ix = self_contained_ix(b"msg");
        ix.data[10..12].copy_from_slice(&u16le(len));
        assert!(parse_ed25519_ix_pubkey_and_msg(&ix).is_err());
    }

    #[test]
    fn pool_balance_excludes_rent_reserve() {
        let rent = Rent::default();
        let reserve = rent.minimum_balance(0);
        let key = Pubkey::new_unique();
        let owner = Pubkey::default();

        for (lamports, expected) in [(reserve + 3, 3), (reserve, 0), (reserve - 1, 0), (0, 0)] {
            let mut lamports = lamports;
            let mut data: [u8; 0] = [];
            let vault = vault_info(&key, &mut lamports, &mut data, &owner);
            assert_eq!(pool_balance(&vault, &rent), expected);
        }
    }

    #[test]
    fn payout_must_land_in_full() {
        assert!(verify_payout(10, 13, 3).is_ok());
        assert_eq!(
            verify_payout(10, 12, 3).unwrap_err(),
            anchor_lang::error::Error::from(RaffleError::PayoutTransferFailed)
        );
        assert_eq!(
            verify_payout(u64::MAX, u64::MAX, 1).unwrap_err(),
            anchor_lang::error::Error::from(RaffleError::MathOverflow)
        );
    }

    #[test]
    fn winner_account_must_match_selection() {
        let winner = Pubkey::new_unique();
        assert!(check_winner_account(&winner, &winner).is_ok());
        assert_eq!(
            check_winner_account(&Pubkey::new_unique(), &winner).unwrap_err(),
            anchor_lang::error::Error::from(RaffleError::WinnerAccountMismatch)
        );
    }
}
