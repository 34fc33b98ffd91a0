//! Identifier and credential generation
//!
//! Names are drawn from a seedable [`StdRng`]. This is meant for obfuscated
//! object names and throwaway provisioning credentials, not for secrets that
//! need unpredictability guarantees.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NAME_TAIL: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Symbols a password may contain
pub const PASSWORD_SYMBOLS: &[u8] = b"-_.,";

/// Smallest password that can hold one character of every required class
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// How physical names are derived from logical names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingMode {
    #[default]
    Random,
    Passthrough,
}

impl std::str::FromStr for NamingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" | "randomize" => Ok(NamingMode::Random),
            "passthrough" | "verbatim" => Ok(NamingMode::Passthrough),
            _ => Err(format!(
                "Unknown naming mode: '{}'. Supported modes: random, passthrough.",
                s
            )),
        }
    }
}

/// Generated login for a freshly created database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub user: String,
    pub password: String,
}

/// Produces physical object names, usernames and passwords
#[derive(Debug)]
pub struct IdentifierGenerator {
    rng: StdRng,
    mode: NamingMode,
    name_length: usize,
    user_length: usize,
    password_length: usize,
}

impl IdentifierGenerator {
    pub fn new(mode: NamingMode, rng: StdRng) -> Self {
        Self {
            rng,
            mode,
            name_length: 8,
            user_length: 10,
            password_length: 20,
        }
    }

    /// Generator with a fixed seed, for reproducible runs
    pub fn seeded(mode: NamingMode, seed: u64) -> Self {
        Self::new(mode, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(mode: NamingMode) -> Self {
        Self::new(mode, StdRng::from_entropy())
    }

    pub fn with_lengths(mut self, name: usize, user: usize, password: usize) -> Self {
        self.name_length = name.max(1);
        self.user_length = user.max(1);
        self.password_length = password.max(MIN_PASSWORD_LENGTH);
        self
    }

    /// Physical name for a logical database, table or column name
    pub fn object_name(&mut self, logical: &str) -> String {
        match self.mode {
            NamingMode::Random => self.random_name(),
            NamingMode::Passthrough => logical.to_string(),
        }
    }

    /// Lowercase letter followed by lowercase letters or digits
    pub fn random_name(&mut self) -> String {
        let mut name = String::with_capacity(self.name_length);
        name.push(self.pick(LOWERCASE));
        for _ in 1..self.name_length {
            name.push(self.pick(NAME_TAIL));
        }
        name
    }

    /// Letters only
    pub fn username(&mut self) -> String {
        (0..self.user_length).map(|_| self.pick(LETTERS)).collect()
    }

    /// Password with at least one uppercase, lowercase, digit and symbol,
    /// ending in a letter
    pub fn password(&mut self) -> String {
        let mut chars = vec![
            self.pick(UPPERCASE),
            self.pick(LOWERCASE),
            self.pick(DIGITS),
            self.pick(PASSWORD_SYMBOLS),
        ];
        let pool: Vec<u8> = [LETTERS, DIGITS, PASSWORD_SYMBOLS].concat();
        while chars.len() < self.password_length {
            chars.push(self.pick(&pool));
        }
        chars.shuffle(&mut self.rng);

        // Swapping keeps every class present, the two letters guarantee a candidate
        let last = chars.len() - 1;
        if !chars[last].is_ascii_alphabetic() {
            let letters: Vec<usize> = (0..last)
                .filter(|&i| chars[i].is_ascii_alphabetic())
                .collect();
            if let Some(&i) = letters.choose(&mut self.rng) {
                chars.swap(i, last);
            }
        }

        chars.into_iter().collect()
    }

    pub fn credential(&mut self) -> Credential {
        Credential {
            user: self.username(),
            password: self.password(),
        }
    }

    fn pick(&mut self, set: &[u8]) -> char {
        set[self.rng.gen_range(0..set.len())] as char
    }
}
