use logos::{Lexer, Logos};
use std::{fmt, str::FromStr};

/// A [`BitRate`] expresses a number of bits over one sample interval,
/// used as the goodput threshold for outage detection and as the display
/// bound of rate-kind metrics.
///
/// Internally stores a plain bit count. The captures the pipeline
/// consumes are sampled at a fixed interval (1 Hz in the emulation
/// runs), so a threshold of `"100kbps"` means 100,000 bits of goodput
/// per sample.
///
/// # Example
///
/// ```
/// use satflow_core::measure::BitRate;
///
/// let threshold: BitRate = "100kbps".parse().unwrap();
/// assert_eq!(threshold.bits(), 100_000);
/// assert_eq!(threshold.to_string(), "100kbps");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BitRate(u64);

const K: u64 = 1_000;
const M: u64 = 1_000_000;
const G: u64 = 1_000_000_000;

impl BitRate {
    /// The `0` bit rate: every sample, including an exactly-zero one,
    /// is above it.
    pub const ZERO: Self = Self::new(0);

    /// create a new [`BitRate`] from a number of bits per sample interval.
    ///
    /// ```
    /// # use satflow_core::measure::BitRate;
    /// // 2 mbps
    /// let rate = BitRate::new(2_000_000);
    /// ```
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// the raw number of bits.
    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// the number of whole bytes this rate corresponds to.
    ///
    /// ```
    /// # use satflow_core::measure::BitRate;
    /// assert_eq!(BitRate::new(100_000).bytes(), 12_500);
    /// ```
    #[inline(always)]
    pub const fn bytes(self) -> u64 {
        self.0 / 8
    }
}

impl fmt::Display for BitRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self.0;
        let k = v / K;
        let m = v / M;
        let g = v / G;

        let v_r = v % K;
        let k_r = v % M;
        let m_r = v % G;

        if v < K || v_r != 0 {
            write!(f, "{v}bps")
        } else if v < M || k_r != 0 {
            write!(f, "{k}kbps")
        } else if v < G || m_r != 0 {
            write!(f, "{m}mbps")
        } else {
            write!(f, "{g}gbps")
        }
    }
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\n\f]+")] // Ignore this regex pattern between tokens
enum BitRateToken {
    #[regex("bps")]
    Bps,
    #[regex("kbps")]
    Kbps,
    #[regex("mbps")]
    Mbps,
    #[regex("gbps")]
    Gbps,

    #[regex("[0-9]+")]
    Value,
}

/// Error returned when parsing a [`BitRate`] from a string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BitRateParseError {
    /// The string does not start with a number.
    #[error("expected a number at the start of `{input}`")]
    MissingNumber { input: String },
    /// No unit (or an unknown unit) follows the number.
    #[error("expected a unit (bps, kbps, mbps, gbps) in `{input}`")]
    MissingUnit { input: String },
    /// Tokens remain after the unit.
    #[error("trailing input after the unit in `{input}`")]
    TrailingInput { input: String },
    /// The numeric part does not fit in a `u64`.
    #[error("invalid number in `{input}`")]
    InvalidNumber { input: String },
}

impl FromStr for BitRate {
    type Err = BitRateParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lex = Lexer::<'_, BitRateToken>::new(s);

        let Some(Ok(BitRateToken::Value)) = lex.next() else {
            return Err(BitRateParseError::MissingNumber {
                input: s.to_owned(),
            });
        };
        let number: u64 = lex
            .slice()
            .parse()
            .map_err(|_| BitRateParseError::InvalidNumber {
                input: s.to_owned(),
            })?;
        let Some(Ok(token)) = lex.next() else {
            return Err(BitRateParseError::MissingUnit {
                input: s.to_owned(),
            });
        };
        let bits = match token {
            BitRateToken::Bps => number,
            BitRateToken::Kbps => number * K,
            BitRateToken::Mbps => number * M,
            BitRateToken::Gbps => number * G,
            BitRateToken::Value => {
                return Err(BitRateParseError::MissingUnit {
                    input: s.to_owned(),
                });
            }
        };

        if lex.next().is_some() {
            return Err(BitRateParseError::TrailingInput {
                input: s.to_owned(),
            });
        }

        Ok(Self::new(bits))
    }
}
