use std::{fmt, ops::Mul};

use derive_more::{Display, Into};

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reps(u32);

impl Reps {
    pub const MAX: u32 = 999;

    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(1..=Self::MAX).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }

    /// Values below one become one, values above the maximum become the maximum.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = value.clamp(1, i64::from(Self::MAX)) as u32;
        Self(value)
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

impl Mul<Weight> for Reps {
    type Output = f32;

    fn mul(self, rhs: Weight) -> Self::Output {
        #[allow(clippy::cast_precision_loss)]
        let reps = self.0 as f32;
        reps * rhs.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sets(u32);

impl Sets {
    pub const MAX: u32 = 99;

    pub fn new(value: u32) -> Result<Self, SetsError> {
        if !(1..=Self::MAX).contains(&value) {
            return Err(SetsError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Sets::new(parsed_value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be in the range 1 to 99")]
    OutOfRange,
    #[error("Sets must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);
    pub const MAX: f32 = 9999.9;

    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() || !(0.0..=Self::MAX).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }

    /// Negative and undefined values become zero.
    #[must_use]
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, Self::MAX))
    }

    /// Rounds to a resolution of 0.1.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self((self.0 * 10.0).round() / 10.0)
    }

    /// Bodyweight sets carry no external load.
    #[must_use]
    pub fn is_bodyweight(self) -> bool {
        self.0 <= 0.0
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 9999.9")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Rate of perceived exertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RPE(u8);

impl RPE {
    pub const ONE: RPE = RPE(1);
    pub const FIVE: RPE = RPE(5);
    pub const SEVEN: RPE = RPE(7);
    pub const EIGHT: RPE = RPE(8);
    pub const NINE: RPE = RPE(9);
    pub const TEN: RPE = RPE(10);

    pub fn new(value: u8) -> Result<Self, RPEError> {
        if !(1..=10).contains(&value) {
            return Err(RPEError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn avg(values: &[RPE]) -> Option<f32> {
        if values.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let avg = values.iter().map(|rpe| u32::from(rpe.0)).sum::<u32>() as f32
            / values.len() as f32;
        Some(avg)
    }
}

impl From<RPE> for u8 {
    fn from(value: RPE) -> Self {
        value.0
    }
}

impl TryFrom<i64> for RPE {
    type Error = RPEError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| RPEError::OutOfRange)
            .and_then(RPE::new)
    }
}

impl TryFrom<&str> for RPE {
    type Error = RPEError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<i64>() {
            Ok(parsed_value) => RPE::try_from(parsed_value),
            Err(_) => Err(RPEError::ParseError),
        }
    }
}

impl fmt::Display for RPE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RPEError {
    #[error("RPE must be in the range 1 to 10")]
    OutOfRange,
    #[error("RPE must be an integer")]
    ParseError,
}
