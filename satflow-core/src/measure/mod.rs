mod bitrate;
mod interval;

pub use self::{
    bitrate::{BitRate, BitRateParseError},
    interval::Interval,
};
