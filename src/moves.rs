// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move values exchanged with callers. A `Move` is only a request; the
//! board decides whether it is legal and how it is carried out.
use std::fmt;

use crate::history::MoveRecord;
use crate::types::{PieceKind, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn promoting(from: Square, to: Square, kind: PieceKind) -> Move {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    pub fn source(self) -> Square {
        self.from
    }

    pub fn destination(self) -> Square {
        self.to
    }

    pub fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }
}

/// Long algebraic form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}

impl From<&MoveRecord> for Move {
    fn from(record: &MoveRecord) -> Move {
        Move {
            from: record.from,
            to: record.to,
            promotion: record.promotion,
        }
    }
}

/// The serialized shape of a move as relayed between two players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInfo {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl From<&MoveRecord> for MoveInfo {
    fn from(record: &MoveRecord) -> MoveInfo {
        MoveInfo {
            from: record.from,
            to: record.to,
            promotion: record.promotion,
        }
    }
}

impl From<MoveInfo> for Move {
    fn from(info: MoveInfo) -> Move {
        Move {
            from: info.from,
            to: info.to,
            promotion: info.promotion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn display() {
        assert_eq!("e2e4", Move::new(sq("e2"), sq("e4")).to_string());
        assert_eq!(
            "a7a8n",
            Move::promoting(sq("a7"), sq("a8"), PieceKind::Knight).to_string()
        );
    }

    #[test]
    fn move_info_json() {
        let info = MoveInfo {
            from: sq("e2"),
            to: sq("e4"),
            promotion: None,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(r#"{"from":"e2","to":"e4"}"#, json);

        let promo: MoveInfo =
            serde_json::from_str(r#"{"from":"b7","to":"b8","promotion":"rook"}"#).unwrap();
        assert_eq!(Some(PieceKind::Rook), promo.promotion);
        assert_eq!(
            Move::promoting(sq("b7"), sq("b8"), PieceKind::Rook),
            Move::from(promo)
        );
    }

    #[test]
    fn move_info_rejects_bad_square() {
        let res = serde_json::from_str::<MoveInfo>(r#"{"from":"z9","to":"e4"}"#);
        assert!(res.is_err());
    }
}
