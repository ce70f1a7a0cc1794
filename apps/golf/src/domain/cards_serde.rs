//! Serialization and deserialization for card types

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_parsing::parse_optional_suit;
use super::cards_types::{Card, Rank, Suit};

impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| D::Error::custom(format!("Invalid suit: {s}")))
    }
}

impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| D::Error::custom(format!("Invalid rank: {s}")))
    }
}

// Card serde: {"rank": "10", "suit": "♥", "faceUp": false}; suit-less jokers carry "".
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut st = serializer.serialize_struct("Card", 3)?;
        st.serialize_field("rank", &self.rank)?;
        st.serialize_field("suit", self.suit.as_ref().map_or("", Suit::as_token))?;
        st.serialize_field("faceUp", &self.face_up)?;
        st.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRepr {
    rank: Rank,
    #[serde(default)]
    suit: String,
    #[serde(default)]
    face_up: bool,
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = CardRepr::deserialize(deserializer)?;
        let suit = parse_optional_suit(&repr.suit).map_err(|e| D::Error::custom(e.to_string()))?;
        if suit.is_none() && repr.rank != Rank::Joker {
            return Err(D::Error::custom(format!(
                "Card {} is missing a suit",
                repr.rank.as_token()
            )));
        }
        Ok(Card {
            rank: repr.rank,
            suit,
            face_up: repr.face_up,
        })
    }
}
