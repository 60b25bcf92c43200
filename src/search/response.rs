use crate::Chips;
use crate::Equity;
use crate::Probability;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// a live decision point as the caller sees it. cards arrive in
/// their two-character text form and are validated on parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spot {
    pub hole: String,
    pub board: String,
    pub pot: Chips,
    pub to_call: Chips,
    pub hero_stack: Chips,
    pub villain_stack: Chips,
    #[serde(default)]
    pub history: String,
}

/// what the query service answers with: a point action with its
/// chip amount, the hand's equity, and the full action distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: String,
    pub amount: Option<Chips>,
    pub equity: Equity,
    pub distribution: BTreeMap<String, Probability>,
}

impl Recommendation {
    pub fn json(&self) -> String {
        serde_json::to_string(self).expect("recommendation serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let recommendation = Recommendation {
            action: "bMID".to_string(),
            amount: Some(12),
            equity: 0.71,
            distribution: BTreeMap::from([
                ("c".to_string(), 0.3), //
                ("bMID".to_string(), 0.7),
            ]),
        };
        let json = recommendation.json();
        let parsed = serde_json::from_str::<Recommendation>(&json).unwrap();
        assert_eq!(recommendation, parsed);
    }
}
