use logos::{Lexer, Logos};
use std::{str::FromStr, time};

/// Crate-private wrapper around [`std::time::Duration`] providing the
/// human-readable parsing used by [`Interval`].
///
/// [`Interval`]: crate::measure::Interval
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub(crate) struct Duration(time::Duration);

impl Duration {
    #[inline]
    pub fn into_duration(self) -> time::Duration {
        self.0
    }
}

/// Error returned when parsing a duration string such as `"50ms"` or
/// `"1s 500ms"`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DurationParseError {
    /// The string contains a token that is neither a number nor a unit.
    #[error("unrecognized token in duration `{input}`")]
    UnrecognizedToken { input: String },
    /// A unit appeared without a leading number.
    #[error("expected a number before the unit in `{input}`")]
    MissingNumber { input: String },
    /// A number appeared without a trailing unit.
    #[error("expected a unit (ns, us, ms, s, m) after the number in `{input}`")]
    MissingUnit { input: String },
    /// The numeric part does not fit in a `u64`.
    #[error("invalid number in duration `{input}`")]
    InvalidNumber { input: String },
}

impl FromStr for Duration {
    type Err = DurationParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lex = Lexer::new(s);

        let mut durations = Vec::new();

        while let Some(next) = lex.next() {
            let number: Token = next.map_err(|()| DurationParseError::UnrecognizedToken {
                input: s.to_owned(),
            })?;

            if number != Token::Value {
                return Err(DurationParseError::MissingNumber {
                    input: s.to_owned(),
                });
            }
            let number: u64 =
                lex.slice()
                    .parse()
                    .map_err(|_| DurationParseError::InvalidNumber {
                        input: s.to_owned(),
                    })?;

            let Some(Ok(measure)) = lex.next() else {
                return Err(DurationParseError::MissingUnit {
                    input: s.to_owned(),
                });
            };
            let duration = match measure {
                Token::NanoSeconds => time::Duration::from_nanos(number),
                Token::MicroSeconds => time::Duration::from_micros(number),
                Token::MilliSeconds => time::Duration::from_millis(number),
                Token::Seconds => time::Duration::from_secs(number),
                Token::Minutes => time::Duration::from_secs(number * 60),
                Token::Value => {
                    return Err(DurationParseError::MissingUnit {
                        input: s.to_owned(),
                    });
                }
            };
            durations.push(duration);
        }

        Ok(Self(durations.into_iter().sum()))
    }
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\n\f]+")] // Ignore this regex pattern between tokens
enum Token {
    #[token("ns")]
    NanoSeconds,
    #[regex("us|μs")]
    MicroSeconds,
    #[token("ms")]
    MilliSeconds,
    #[token("s")]
    Seconds,
    #[token("m")]
    Minutes,

    #[regex("[0-9]+")]
    Value,
}
