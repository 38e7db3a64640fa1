use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Neutrino species emitted by the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NeutrinoFlavor {
    Ve,
    Vebar,
    Vu,
    Vubar,
    Vt,
    Vtbar,
}

impl NeutrinoFlavor {
    pub const VARIANTS: &'static [&'static str] = &["ve", "vebar", "vu", "vubar", "vt", "vtbar"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ve => "ve",
            Self::Vebar => "vebar",
            Self::Vu => "vu",
            Self::Vubar => "vubar",
            Self::Vt => "vt",
            Self::Vtbar => "vtbar",
        }
    }

    pub const fn pdg_code(self) -> i32 {
        match self {
            Self::Ve => 12,
            Self::Vebar => -12,
            Self::Vu => 14,
            Self::Vubar => -14,
            Self::Vt => 16,
            Self::Vtbar => -16,
        }
    }

    /// Accepts the integer PDG code as an alternative spelling of the flavor
    pub const fn from_pdg(code: i64) -> Option<Self> {
        match code {
            12 => Some(Self::Ve),
            -12 => Some(Self::Vebar),
            14 => Some(Self::Vu),
            -14 => Some(Self::Vubar),
            16 => Some(Self::Vt),
            -16 => Some(Self::Vtbar),
            _ => None,
        }
    }
}

impl fmt::Display for NeutrinoFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NeutrinoFlavor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ve" => Ok(Self::Ve),
            "vebar" => Ok(Self::Vebar),
            "vu" => Ok(Self::Vu),
            "vubar" => Ok(Self::Vubar),
            "vt" => Ok(Self::Vt),
            "vtbar" => Ok(Self::Vtbar),
            _ => Err(()),
        }
    }
}

/// Spectrum tabulated in an external ROOT file
///
/// Neither `tfile` nor `namecycle` is resolved here; the engine opens the
/// file when it builds the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootSpectrum {
    pub neutrino: NeutrinoFlavor,
    /// Path of the ROOT file holding the spectrum object
    pub tfile: String,
    /// Name of the spectrum object inside `tfile`
    pub namecycle: String,
}

/// Neutrino energy spectrum, selected by the `type` discriminator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    /// Fixed neutrino energy in MeV
    Monoenergetic {
        neutrino: NeutrinoFlavor,
        energy: f64,
    },
    /// Spectrum read from a `TGraph`
    Tgraph(RootSpectrum),
    /// Spectrum read from a `TH1` histogram
    Th1(RootSpectrum),
}

impl Source {
    pub const VARIANTS: &'static [&'static str] = &["monoenergetic", "tgraph", "th1"];

    /// Value of the `type` discriminator
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Monoenergetic { .. } => "monoenergetic",
            Self::Tgraph(_) => "tgraph",
            Self::Th1(_) => "th1",
        }
    }

    pub const fn neutrino(&self) -> NeutrinoFlavor {
        match self {
            Self::Monoenergetic { neutrino, .. } => *neutrino,
            Self::Tgraph(spectrum) | Self::Th1(spectrum) => spectrum.neutrino,
        }
    }

    /// Fixed energy for monoenergetic sources
    pub const fn energy(&self) -> Option<f64> {
        match self {
            Self::Monoenergetic { energy, .. } => Some(*energy),
            _ => None,
        }
    }

    /// External spectrum file the engine has to open, if any
    pub fn external_file(&self) -> Option<&str> {
        match self {
            Self::Monoenergetic { .. } => None,
            Self::Tgraph(spectrum) | Self::Th1(spectrum) => Some(&spectrum.tfile),
        }
    }
}
