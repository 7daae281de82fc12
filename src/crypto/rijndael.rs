//! The Rijndael block cipher with selectable block size.
//!
//! AES fixes the block at 128 bits. Containers produced by this crate use the
//! original Rijndael 256-bit block, which no AES implementation covers, so the
//! round function is implemented here directly. The 128-bit block is kept so the
//! key schedule and round function can be checked against the FIPS-197 vectors.
//!
//! [`Rijndael256`] plugs the wide block into the `cipher` traits so block modes
//! from the `cbc` crate can drive it.

use cipher::consts::{U1, U32};
use cipher::inout::InOut;
use cipher::{
    Block, BlockBackend, BlockCipher, BlockClosure, BlockDecrypt, BlockEncrypt, BlockSizeUser,
    InvalidLength, Key, KeyInit, KeySizeUser, ParBlocksSizeUser,
};
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};

const SBOX: [u8; 256] = build_sbox();
const INV_SBOX: [u8; 256] = invert(&SBOX);

/// Builds the S-box by walking the multiplicative group of GF(2^8) with generator 3
/// and applying the affine transform to each inverse.
const fn build_sbox() -> [u8; 256] {
    let mut sbox = [0u8; 256];
    let mut p: u8 = 1;
    let mut q: u8 = 1;

    loop {
        // p *= 3
        p = p ^ (p << 1) ^ if p & 0x80 != 0 { 0x1b } else { 0 };

        // q /= 3
        q ^= q << 1;
        q ^= q << 2;
        q ^= q << 4;
        if q & 0x80 != 0 {
            q ^= 0x09;
        }

        let x = q ^ q.rotate_left(1) ^ q.rotate_left(2) ^ q.rotate_left(3) ^ q.rotate_left(4);
        sbox[p as usize] = x ^ 0x63;

        if p == 1 {
            break;
        }
    }

    // zero has no inverse
    sbox[0] = 0x63;
    sbox
}

const fn invert(sbox: &[u8; 256]) -> [u8; 256] {
    let mut inv = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inv[sbox[i] as usize] = i as u8;
        i += 1;
    }
    inv
}

#[inline]
const fn xtime(b: u8) -> u8 {
    (b << 1) ^ if b & 0x80 != 0 { 0x1b } else { 0 }
}

/// Rijndael block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSize {
    /// 128-bit block (AES).
    Bits128,
    /// 256-bit block.
    Bits256,
}

impl BlockSize {
    /// Block length in bytes.
    pub const fn byte_len(self) -> usize {
        match self {
            BlockSize::Bits128 => 16,
            BlockSize::Bits256 => 32,
        }
    }

    const fn columns(self) -> usize {
        self.byte_len() / 4
    }

    /// Left rotation applied to each state row by ShiftRows.
    const fn row_shifts(self) -> [usize; 4] {
        match self {
            BlockSize::Bits128 => [0, 1, 2, 3],
            BlockSize::Bits256 => [0, 1, 3, 4],
        }
    }
}

/// An expanded Rijndael key for one block size.
///
/// State bytes are column-major: byte `r + 4 * c` is row `r` of column `c`.
/// Round keys are wiped on drop.
pub struct Rijndael {
    round_keys: Vec<u8>,
    rounds: usize,
    block: BlockSize,
}

impl Drop for Rijndael {
    fn drop(&mut self) {
        self.round_keys.zeroize();
    }
}

impl std::fmt::Debug for Rijndael {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rijndael")
            .field("round_keys", &"[REDACTED]")
            .field("rounds", &self.rounds)
            .field("block", &self.block)
            .finish()
    }
}

impl Rijndael {
    /// Expands `key` (16, 24 or 32 bytes) for the given block size.
    pub fn new(key: &[u8], block: BlockSize) -> Result<Self> {
        if !matches!(key.len(), 16 | 24 | 32) {
            return Err(CryptoError::InvalidParameters(format!(
                "rijndael key must be 16, 24 or 32 bytes, got {}",
                key.len()
            )));
        }
        Ok(Self::expand(key, block))
    }

    /// Key expansion. `key` must already be 16, 24 or 32 bytes.
    fn expand(key: &[u8], block: BlockSize) -> Self {
        let nk = key.len() / 4;
        let nb = block.columns();
        let rounds = nk.max(nb) + 6;
        let total_words = nb * (rounds + 1);

        let mut w = vec![0u8; total_words * 4];
        w[..key.len()].copy_from_slice(key);

        let mut rcon: u8 = 1;
        let mut temp = [0u8; 4];
        for i in nk..total_words {
            temp.copy_from_slice(&w[4 * (i - 1)..4 * i]);

            if i % nk == 0 {
                temp.rotate_left(1);
                for b in temp.iter_mut() {
                    *b = SBOX[*b as usize];
                }
                temp[0] ^= rcon;
                rcon = xtime(rcon);
            } else if nk > 6 && i % nk == 4 {
                for b in temp.iter_mut() {
                    *b = SBOX[*b as usize];
                }
            }

            for j in 0..4 {
                w[4 * i + j] = w[4 * (i - nk) + j] ^ temp[j];
            }
        }
        temp.zeroize();

        Self {
            round_keys: w,
            rounds,
            block,
        }
    }

    /// Encrypts one block in place. `block` must be exactly one block long.
    pub fn encrypt_block(&self, block: &mut [u8]) {
        debug_assert_eq!(block.len(), self.block.byte_len());

        self.add_round_key(block, 0);
        for round in 1..self.rounds {
            sub_bytes(block, &SBOX);
            self.shift_rows(block);
            mix_columns(block);
            self.add_round_key(block, round);
        }
        sub_bytes(block, &SBOX);
        self.shift_rows(block);
        self.add_round_key(block, self.rounds);
    }

    /// Decrypts one block in place. `block` must be exactly one block long.
    pub fn decrypt_block(&self, block: &mut [u8]) {
        debug_assert_eq!(block.len(), self.block.byte_len());

        self.add_round_key(block, self.rounds);
        for round in (1..self.rounds).rev() {
            self.inv_shift_rows(block);
            sub_bytes(block, &INV_SBOX);
            self.add_round_key(block, round);
            inv_mix_columns(block);
        }
        self.inv_shift_rows(block);
        sub_bytes(block, &INV_SBOX);
        self.add_round_key(block, 0);
    }

    fn add_round_key(&self, state: &mut [u8], round: usize) {
        let len = self.block.byte_len();
        let key = &self.round_keys[round * len..(round + 1) * len];
        for (s, k) in state.iter_mut().zip(key) {
            *s ^= k;
        }
    }

    fn shift_rows(&self, state: &mut [u8]) {
        let nb = self.block.columns();
        let shifts = self.block.row_shifts();
        let mut tmp = [0u8; 32];
        tmp[..state.len()].copy_from_slice(state);

        for (r, shift) in shifts.iter().enumerate().skip(1) {
            for c in 0..nb {
                state[r + 4 * c] = tmp[r + 4 * ((c + shift) % nb)];
            }
        }
    }

    fn inv_shift_rows(&self, state: &mut [u8]) {
        let nb = self.block.columns();
        let shifts = self.block.row_shifts();
        let mut tmp = [0u8; 32];
        tmp[..state.len()].copy_from_slice(state);

        for (r, shift) in shifts.iter().enumerate().skip(1) {
            for c in 0..nb {
                state[r + 4 * ((c + shift) % nb)] = tmp[r + 4 * c];
            }
        }
    }
}

/// Rijndael with a 256-bit block, usable wherever the `cipher` block traits are.
///
/// The nominal key size is 32 bytes; [`KeyInit::new_from_slice`] also accepts
/// 16- and 24-byte keys.
#[derive(Debug)]
pub struct Rijndael256(Rijndael);

impl KeySizeUser for Rijndael256 {
    type KeySize = U32;
}

impl KeyInit for Rijndael256 {
    fn new(key: &Key<Self>) -> Self {
        Self(Rijndael::expand(key, BlockSize::Bits256))
    }

    fn new_from_slice(key: &[u8]) -> std::result::Result<Self, InvalidLength> {
        Rijndael::new(key, BlockSize::Bits256)
            .map(Self)
            .map_err(|_| InvalidLength)
    }
}

impl BlockSizeUser for Rijndael256 {
    type BlockSize = U32;
}

impl BlockCipher for Rijndael256 {}

impl BlockEncrypt for Rijndael256 {
    fn encrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut EncBackend(&self.0));
    }
}

impl BlockDecrypt for Rijndael256 {
    fn decrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut DecBackend(&self.0));
    }
}

struct EncBackend<'a>(&'a Rijndael);

impl BlockSizeUser for EncBackend<'_> {
    type BlockSize = U32;
}

impl ParBlocksSizeUser for EncBackend<'_> {
    type ParBlocksSize = U1;
}

impl BlockBackend for EncBackend<'_> {
    #[inline]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block<Self>>) {
        let mut buf = block.clone_in();
        self.0.encrypt_block(&mut buf);
        *block.get_out() = buf;
    }
}

struct DecBackend<'a>(&'a Rijndael);

impl BlockSizeUser for DecBackend<'_> {
    type BlockSize = U32;
}

impl ParBlocksSizeUser for DecBackend<'_> {
    type ParBlocksSize = U1;
}

impl BlockBackend for DecBackend<'_> {
    #[inline]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block<Self>>) {
        let mut buf = block.clone_in();
        self.0.decrypt_block(&mut buf);
        *block.get_out() = buf;
    }
}

fn sub_bytes(state: &mut [u8], table: &[u8; 256]) {
    for b in state.iter_mut() {
        *b = table[*b as usize];
    }
}

fn mix_columns(state: &mut [u8]) {
    for col in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
        let t = a0 ^ a1 ^ a2 ^ a3;
        col[0] = a0 ^ t ^ xtime(a0 ^ a1);
        col[1] = a1 ^ t ^ xtime(a1 ^ a2);
        col[2] = a2 ^ t ^ xtime(a2 ^ a3);
        col[3] = a3 ^ t ^ xtime(a3 ^ a0);
    }
}

fn inv_mix_columns(state: &mut [u8]) {
    for col in state.chunks_exact_mut(4) {
        let u = xtime(xtime(col[0] ^ col[2]));
        let v = xtime(xtime(col[1] ^ col[3]));
        col[0] ^= u;
        col[1] ^= v;
        col[2] ^= u;
        col[3] ^= v;
    }
    mix_columns(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIPS_PLAINTEXT: &str = "00112233445566778899aabbccddeeff";

    fn key_of(len: usize) -> Vec<u8> {
        (0..len as u8).collect()
    }

    fn aes_kat(key_len: usize, expected: &str) {
        let cipher = Rijndael::new(&key_of(key_len), BlockSize::Bits128).unwrap();
        let mut block = hex::decode(FIPS_PLAINTEXT).unwrap();

        cipher.encrypt_block(&mut block);
        assert_eq!(hex::encode(&block), expected);

        cipher.decrypt_block(&mut block);
        assert_eq!(hex::encode(&block), FIPS_PLAINTEXT);
    }

    #[test]
    fn sbox_spot_values() {
        assert_eq!(SBOX[0x00], 0x63);
        assert_eq!(SBOX[0x01], 0x7c);
        assert_eq!(SBOX[0x53], 0xed);
        assert_eq!(SBOX[0xff], 0x16);
        assert_eq!(INV_SBOX[0x63], 0x00);
        assert_eq!(INV_SBOX[0x16], 0xff);
    }

    #[test]
    fn sbox_is_a_permutation() {
        for i in 0..=255u8 {
            assert_eq!(INV_SBOX[SBOX[i as usize] as usize], i);
        }
    }

    #[test]
    fn fips197_aes128() {
        aes_kat(16, "69c4e0d86a7b0430d8cdb78070b4c55a");
    }

    #[test]
    fn fips197_aes192() {
        aes_kat(24, "dda97ca4864cdfe06eaf70a0ec0d7191");
    }

    #[test]
    fn fips197_aes256() {
        aes_kat(32, "8ea2b7ca516745bfeafc49904b496089");
    }

    fn wide_kat(key_len: usize, expected: &str) {
        let cipher = Rijndael::new(&key_of(key_len), BlockSize::Bits256).unwrap();
        let original: Vec<u8> = (100..132).collect();
        let mut block = original.clone();

        cipher.encrypt_block(&mut block);
        assert_eq!(hex::encode(&block), expected);

        cipher.decrypt_block(&mut block);
        assert_eq!(block, original);
    }

    #[test]
    fn wide_block_known_answer_128_bit_key() {
        wide_kat(
            16,
            "da50f489fe24ce67bb850a931f1e9fc1fb76d3b2b4f0c185ffbba33fdf6a3408",
        );
    }

    #[test]
    fn wide_block_known_answer_192_bit_key() {
        wide_kat(
            24,
            "23a79dd029040fb059dd149cb51e55b5c4eb87d093df2b1700df8475ebab05f3",
        );
    }

    #[test]
    fn wide_block_known_answer_256_bit_key() {
        wide_kat(
            32,
            "4d9caa78e5bf36f2779547700b3b682e69ec428aca665c81cb9b1e67ae902b9a",
        );
    }

    #[test]
    fn block_traits_match_raw_cipher() {
        let key = key_of(32);
        let raw = Rijndael::new(&key, BlockSize::Bits256).unwrap();
        let wide = Rijndael256::new_from_slice(&key).unwrap();

        let mut expected: Vec<u8> = (100..132).collect();
        raw.encrypt_block(&mut expected);

        let mut block = Block::<Rijndael256>::clone_from_slice(&(100..132).collect::<Vec<u8>>());
        wide.encrypt_block(&mut block);
        assert_eq!(block.as_slice(), &expected[..]);

        wide.decrypt_block(&mut block);
        assert_eq!(block.as_slice(), &(100..132).collect::<Vec<u8>>()[..]);
    }

    #[test]
    fn slice_init_accepts_rijndael_key_sizes() {
        assert!(Rijndael256::new_from_slice(&key_of(16)).is_ok());
        assert!(Rijndael256::new_from_slice(&key_of(24)).is_ok());
        assert!(Rijndael256::new_from_slice(&key_of(20)).is_err());
        assert!(Rijndael256::new_from_slice(&[]).is_err());
    }

    #[test]
    fn wide_block_roundtrip_all_key_sizes() {
        for key_len in [16, 24, 32] {
            let cipher = Rijndael::new(&key_of(key_len), BlockSize::Bits256).unwrap();
            let original: Vec<u8> = (100..132).collect();
            let mut block = original.clone();

            cipher.encrypt_block(&mut block);
            assert_ne!(block, original);

            cipher.decrypt_block(&mut block);
            assert_eq!(block, original);
        }
    }

    #[test]
    fn wide_block_single_bit_diffuses() {
        let cipher = Rijndael::new(&key_of(32), BlockSize::Bits256).unwrap();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        b[31] = 1;

        cipher.encrypt_block(&mut a);
        cipher.encrypt_block(&mut b);

        let differing = a.iter().zip(&b).filter(|(x, y)| x != y).count();
        assert!(differing > 24, "only {differing} bytes changed");
    }

    #[test]
    fn wide_block_uses_fourteen_rounds() {
        let cipher = Rijndael::new(&key_of(16), BlockSize::Bits256).unwrap();
        assert_eq!(cipher.rounds, 14);
        assert_eq!(cipher.round_keys.len(), 32 * 15);
    }

    #[test]
    fn invalid_key_length_is_rejected() {
        assert!(Rijndael::new(&[0u8; 20], BlockSize::Bits256).is_err());
        assert!(Rijndael::new(&[], BlockSize::Bits128).is_err());
    }

    #[test]
    fn debug_output_hides_round_keys() {
        let cipher = Rijndael::new(&[0xAB; 32], BlockSize::Bits256).unwrap();
        let shown = format!("{cipher:?}");
        assert!(shown.contains("REDACTED"));
        assert!(!shown.contains("171"));
    }
}
