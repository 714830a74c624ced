use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An integer rating in `[0, 100]`, used for both `score` and `fitScore`.
///
/// Out-of-range values are rejected at decode time rather than clamped,
/// so a model response carrying one fails the response contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("score {0} is outside the range 0-{max}", max = MAX_SCORE)]
pub struct ScoreOutOfRange(pub i64);

impl Score {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if (0..=i64::from(MAX_SCORE)).contains(&raw) {
            Ok(Score(raw as u8))
        } else {
            Err(ScoreOutOfRange(raw))
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_accepted() {
        assert_eq!(serde_json::from_str::<Score>("0").unwrap().value(), 0);
        assert_eq!(serde_json::from_str::<Score>("100").unwrap().value(), 100);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(serde_json::from_str::<Score>("101").is_err());
        assert!(serde_json::from_str::<Score>("-1").is_err());
    }

    #[test]
    fn test_out_of_range_error_names_value_and_bounds() {
        let err = Score::try_from(150).unwrap_err();
        assert_eq!(err, ScoreOutOfRange(150));
        assert_eq!(err.to_string(), "score 150 is outside the range 0-100");

        let decode_err = serde_json::from_str::<Score>("-3").unwrap_err();
        assert!(decode_err.to_string().contains("score -3 is outside the range 0-100"));
    }

    #[test]
    fn test_non_integer_rejected() {
        assert!(serde_json::from_str::<Score>("72.5").is_err());
        assert!(serde_json::from_str::<Score>("\"80\"").is_err());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let score = Score::try_from(64).unwrap();
        assert_eq!(serde_json::to_string(&score).unwrap(), "64");
    }
}
