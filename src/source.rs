use std::time::{SystemTime, UNIX_EPOCH};

use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha20;
use log::{debug, warn};
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

const BUF_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Operating system CSPRNG.
    Os,
    /// ChaCha20 keystream. Used as the fallback when no OS generator is
    /// available, and for seeded deterministic sources in tests.
    Keystream,
}

/// Buffered byte source. The variant is chosen once at construction and
/// never re-probed; `kind` exposes which path a session is running on.
pub struct RandomSource {
    kind: SourceKind,
    cipher: Option<ChaCha20>,
    buf: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl RandomSource {
    /// Probe the OS generator once; fall back to a time-seeded keystream
    /// if the probe fails. The fallback weakens unpredictability and is
    /// logged so callers can tell which path they got.
    pub fn new() -> Self {
        let mut probe = [0u8; 32];
        match OsRng.try_fill_bytes(&mut probe) {
            Ok(()) => {
                debug!("entropy source: operating system CSPRNG");
                Self {
                    kind: SourceKind::Os,
                    cipher: None,
                    buf: Zeroizing::new(vec![0u8; BUF_LEN]),
                    pos: BUF_LEN,
                }
            }
            Err(err) => {
                warn!(
                    "OS entropy source unavailable ({}), falling back to time-seeded keystream",
                    err
                );
                let mut key = [0u8; 32];
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|elapsed| elapsed.as_nanos())
                    .unwrap_or(0);
                key[..16].copy_from_slice(&nanos.to_le_bytes());
                key[16..20].copy_from_slice(&std::process::id().to_le_bytes());
                Self::seeded(&key)
            }
        }
    }

    /// Deterministic source: every byte comes from the ChaCha20 keystream
    /// under `key`. Identical keys replay identical byte sequences.
    pub fn seeded(key: &[u8; 32]) -> Self {
        let cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
        Self {
            kind: SourceKind::Keystream,
            cipher: Some(cipher),
            buf: Zeroizing::new(vec![0u8; BUF_LEN]),
            pos: BUF_LEN,
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn is_secure(&self) -> bool {
        self.kind == SourceKind::Os
    }

    pub fn next_byte(&mut self) -> u8 {
        if self.pos >= self.buf.len() {
            self.refill();
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        byte
    }

    fn refill(&mut self) {
        match self.cipher {
            // Probe already succeeded at construction; steady-state refills
            // use the infallible fill.
            None => OsRng.fill_bytes(&mut self.buf),
            Some(ref mut cipher) => cipher.apply_keystream(&mut self.buf),
        }
        self.pos = 0;
    }

    /// Uniform index in `[0, bound)` via rejection sampling: bytes at or
    /// above the highest multiple of `bound` below 256 are discarded, so
    /// `byte % bound` carries no modulo bias. Expected draws per index are
    /// below 2 for any `bound` up to 256.
    ///
    /// `bound == 0` is a degenerate no-op and yields 0.
    pub fn random_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        debug_assert!(bound <= 256, "random_index bound out of byte range");
        let limit = (256 / bound) * bound;
        loop {
            let byte = self.next_byte() as usize;
            if byte < limit {
                return byte % bound;
            }
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}
