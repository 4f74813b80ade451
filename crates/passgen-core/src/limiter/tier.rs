//! Caller tiers and trusted-token matching.

use subtle::ConstantTimeEq;

/// Class of caller, each with its own admission ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Standard,
    Trusted,
}

impl Tier {
    /// Picks the tier for a caller-supplied token.
    ///
    /// A caller is trusted only when a non-empty trusted token is configured
    /// and the supplied one matches it exactly. The comparison runs in
    /// constant time over the token bytes.
    pub fn resolve(provided: Option<&str>, trusted_token: Option<&str>) -> Self {
        match (provided, trusted_token) {
            (Some(provided), Some(expected)) if !expected.is_empty() => {
                if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
                    Tier::Trusted
                } else {
                    Tier::Standard
                }
            }
            _ => Tier::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "standard",
            Tier::Trusted => "trusted",
        }
    }
}
