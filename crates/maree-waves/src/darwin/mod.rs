// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! The Darwin engine: Schureman's constituent development.
//!
//! Arguments are 11-tuples of integer multipliers on
//! `(T, s, h, p, N, p₁, 90°, ξ, ν, ν′, ν″)`; amplitude modulation comes
//! from closed-form node factors.

mod analysis;
mod inference;
mod table;
mod wave;

pub use analysis::{harmonic_analysis, AnalysisError};
pub use inference::Inference;
pub use table::WaveTable;
pub use wave::{ArgumentCorrection, NodeFactor, Wave};

use crate::{ConstituentId, UnknownConstituentError};

/// The tidal constituents of the Darwin development.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Constituent {
    _2MK2,
    _2MK3,
    _2MK6,
    _2MN2,
    _2MN6,
    _2MNS4,
    _2MP5,
    _2MS2,
    _2MS6,
    _2MSN4,
    _2N2,
    _2NM6,
    _2NS2,
    _2Q1,
    _2SM2,
    _2SM6,
    _2SMu2,
    _3MS4,
    _3MS8,
    A5,
    Chi1,
    Eps2,
    Eta2,
    J1,
    K1,
    K2,
    L2,
    L2P,
    Lambda2,
    M0,
    M1,
    M11,
    M12,
    M13,
    M2,
    M3,
    M4,
    M6,
    M8,
    Mf,
    Mf1,
    Mf2,
    MK3,
    MK4,
    MKS2,
    ML4,
    Mm,
    Mm1,
    Mm2,
    MN4,
    MNK6,
    MNS2,
    MNu4,
    MNuS2,
    MO3,
    MP1,
    MS4,
    MSf,
    MSK2,
    MSK6,
    MSN2,
    MSN6,
    MSqm,
    Mtm,
    Mu2,
    N2,
    N2P,
    N4,
    NK4,
    NKM2,
    Nu2,
    O1,
    OO1,
    OQ2,
    P1,
    Phi1,
    Pi1,
    Psi1,
    Q1,
    R2,
    R4,
    Rho1,
    S1,
    S2,
    S4,
    S6,
    Sa,
    Sa1,
    Sigma1,
    SK3,
    SK4,
    SKM2,
    SN4,
    SO1,
    SO3,
    Ssa,
    Sta,
    T2,
    Theta1,
}

use Constituent::*;

/// Every constituent, in canonical (name) order. The discriminant of a
/// constituent is its index in this slice.
pub const ALL: [Constituent; 99] = [
    _2MK2, _2MK3, _2MK6, _2MN2, _2MN6, _2MNS4, _2MP5, _2MS2, _2MS6, _2MSN4, _2N2,
    _2NM6, _2NS2, _2Q1, _2SM2, _2SM6, _2SMu2, _3MS4, _3MS8, A5, Chi1, Eps2, Eta2,
    J1, K1, K2, L2, L2P, Lambda2, M0, M1, M11, M12, M13, M2, M3, M4, M6, M8, Mf,
    Mf1, Mf2, MK3, MK4, MKS2, ML4, Mm, Mm1, Mm2, MN4, MNK6, MNS2, MNu4, MNuS2,
    MO3, MP1, MS4, MSf, MSK2, MSK6, MSN2, MSN6, MSqm, Mtm, Mu2, N2, N2P, N4, NK4,
    NKM2, Nu2, O1, OO1, OQ2, P1, Phi1, Pi1, Psi1, Q1, R2, R4, Rho1, S1, S2, S4,
    S6, Sa, Sa1, Sigma1, SK3, SK4, SKM2, SN4, SO1, SO3, Ssa, Sta, T2, Theta1,
];

const NAMES: [&str; 99] = [
    "2MK2", "2MK3", "2MK6", "2MN2", "2MN6", "2MNS4", "2MP5", "2MS2", "2MS6",
    "2MSN4", "2N2", "2NM6", "2NS2", "2Q1", "2SM2", "2SM6", "2SMu2", "3MS4",
    "3MS8", "A5", "Chi1", "Eps2", "Eta2", "J1", "K1", "K2", "L2", "L2P",
    "Lambda2", "M0", "M1", "M11", "M12", "M13", "M2", "M3", "M4", "M6", "M8",
    "Mf", "Mf1", "Mf2", "MK3", "MK4", "MKS2", "ML4", "Mm", "Mm1", "Mm2", "MN4",
    "MNK6", "MNS2", "MNu4", "MNuS2", "MO3", "MP1", "MS4", "MSf", "MSK2", "MSK6",
    "MSN2", "MSN6", "MSqm", "Mtm", "Mu2", "N2", "N2P", "N4", "NK4", "NKM2",
    "Nu2", "O1", "OO1", "OQ2", "P1", "Phi1", "Pi1", "Psi1", "Q1", "R2", "R4",
    "Rho1", "S1", "S2", "S4", "S6", "Sa", "Sa1", "Sigma1", "SK3", "SK4", "SKM2",
    "SN4", "SO1", "SO3", "Ssa", "Sta", "T2", "Theta1",
];

impl Constituent {
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl ConstituentId for Constituent {
    fn parse(name: &str) -> Result<Self, UnknownConstituentError> {
        NAMES
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
            .map(|index| ALL[index])
            .ok_or_else(|| UnknownConstituentError(name.to_owned()))
    }

    fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    fn all() -> &'static [Self] {
        &ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for &constituent in Constituent::all() {
            assert_eq!(
                Constituent::parse(constituent.name()),
                Ok(constituent),
                "{constituent:?}"
            );
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Constituent::parse("msqm"), Ok(Constituent::MSqm));
        assert_eq!(Constituent::parse("MSQM"), Ok(Constituent::MSqm));
        assert_eq!(Constituent::parse("m2"), Ok(Constituent::M2));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Constituent::parse("X9"),
            Err(UnknownConstituentError("X9".to_owned()))
        );
    }

    #[test]
    fn test_discriminants_match_name_order() {
        for (index, &constituent) in ALL.iter().enumerate() {
            assert_eq!(constituent.index(), index);
        }
    }
}
