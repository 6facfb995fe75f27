//! Bond-type codes and their one-hot encoding

use serde::{Deserialize, Serialize};

use crate::error::{HeatError, Result};

/// Width of the bond-type one-hot vector
pub const BOND_ONE_HOT_WIDTH: usize = 4;

/// Code the chemistry toolkit uses for aromatic bonds
pub const AROMATIC_BOND_CODE: u32 = 12;

/// Bond classes recognised by the feature encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondType {
    /// Code 1
    Single,
    /// Code 2
    Double,
    /// Code 3
    Triple,
    /// Code 12, the aromatic-equivalent class
    Aromatic,
}

impl BondType {
    /// Decode a toolkit bond code
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            1 => Ok(BondType::Single),
            2 => Ok(BondType::Double),
            3 => Ok(BondType::Triple),
            AROMATIC_BOND_CODE => Ok(BondType::Aromatic),
            other => Err(HeatError::UnsupportedBondCode(other)),
        }
    }

    /// Toolkit code for this bond type
    pub fn code(self) -> u32 {
        match self {
            BondType::Single => 1,
            BondType::Double => 2,
            BondType::Triple => 3,
            BondType::Aromatic => AROMATIC_BOND_CODE,
        }
    }

    /// Position of the hot entry in the one-hot vector
    pub fn position(self) -> usize {
        match self {
            BondType::Single => 0,
            BondType::Double => 1,
            BondType::Triple => 2,
            BondType::Aromatic => 3,
        }
    }

    /// One-hot vector for this bond type
    pub fn one_hot(self) -> [f32; BOND_ONE_HOT_WIDTH] {
        let mut v = [0.0; BOND_ONE_HOT_WIDTH];
        v[self.position()] = 1.0;
        v
    }
}

/// One-hot encode a raw bond code.
///
/// Codes 1, 2, 3 set positions 0, 1, 2; code 12 sets position 3.
pub fn bond_one_hot(code: u32) -> Result<[f32; BOND_ONE_HOT_WIDTH]> {
    BondType::from_code(code).map(BondType::one_hot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot_positions() {
        assert_eq!(bond_one_hot(1).unwrap(), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(bond_one_hot(2).unwrap(), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(bond_one_hot(3).unwrap(), [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(bond_one_hot(12).unwrap(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unsupported_codes() {
        for code in [0, 4, 5, 11, 13, 99] {
            assert_eq!(bond_one_hot(code), Err(HeatError::UnsupportedBondCode(code)));
        }
    }

    #[test]
    fn test_code_round_trip() {
        for ty in [BondType::Single, BondType::Double, BondType::Triple, BondType::Aromatic] {
            assert_eq!(BondType::from_code(ty.code()).unwrap(), ty);
        }
    }
}
