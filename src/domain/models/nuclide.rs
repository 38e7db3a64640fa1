use serde::Serialize;
use std::fmt;

/// Target nuclide encoded as a nuclear PDG code
///
/// The code has the form `10LZZZAAAI`: `ZZZ` is the proton number, `AAA` the
/// mass number and `I` the isomer level. Strange nuclei (`L != 0`) are not
/// valid targets. Argon-40 is `1000180400`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Nuclide(u32);

impl Nuclide {
    pub const ARGON_40: Self = Self(1_000_180_400);

    const BASE: u64 = 1_000_000_000;
    const LIMIT: u64 = 1_010_000_000;

    /// Decode a PDG code, returning `None` if it is not a valid target nucleus
    pub fn from_pdg(code: u64) -> Option<Self> {
        if !(Self::BASE..Self::LIMIT).contains(&code) {
            return None;
        }
        let code = u32::try_from(code).ok()?;
        let nuclide = Self(code);
        let (z, a) = (nuclide.atomic_number(), nuclide.mass_number());
        (z >= 1 && a >= z).then_some(nuclide)
    }

    pub const fn pdg_code(self) -> u32 {
        self.0
    }

    /// Proton number Z
    pub const fn atomic_number(self) -> u32 {
        (self.0 / 10_000) % 1_000
    }

    /// Mass number A
    pub const fn mass_number(self) -> u32 {
        (self.0 / 10) % 1_000
    }

    pub const fn isomer_level(self) -> u32 {
        self.0 % 10
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Z={} A={} ({})",
            self.atomic_number(),
            self.mass_number(),
            self.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_argon_40() {
        let ar40 = Nuclide::from_pdg(1_000_180_400).expect("Ar-40 should decode");
        assert_eq!(ar40, Nuclide::ARGON_40);
        assert_eq!(ar40.atomic_number(), 18);
        assert_eq!(ar40.mass_number(), 40);
        assert_eq!(ar40.isomer_level(), 0);
    }

    #[test]
    fn test_decode_hydrogen() {
        let h1 = Nuclide::from_pdg(1_000_010_010).expect("H-1 should decode");
        assert_eq!(h1.atomic_number(), 1);
        assert_eq!(h1.mass_number(), 1);
    }

    #[test]
    fn test_rejects_invalid_codes() {
        // Particle codes, not nuclei
        assert!(Nuclide::from_pdg(12).is_none());
        assert!(Nuclide::from_pdg(2212).is_none());
        // Strange nucleus (L = 1)
        assert!(Nuclide::from_pdg(1_010_180_400).is_none());
        // Z = 0
        assert!(Nuclide::from_pdg(1_000_000_010).is_none());
        // A < Z
        assert!(Nuclide::from_pdg(1_000_180_100).is_none());
    }
}
