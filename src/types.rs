//! Shared primitive IDs and contest-related enums.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::QsoMatchError;

/// Unique identifier assigned to each QSO.
pub type QsoId = u64;
/// Unique identifier assigned to each submitted log.
pub type LogId = u64;
/// Frequency number as logged (kHz for HF, band label for VHF and up).
pub type Frequency = u32;

/// Contest band bucket.
///
/// Variants are declared in the same order as their names sort, so
/// `Band::ALL` doubles as the name-ordered lookup table used by log
/// interchange tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    /// 1.2 GHz.
    B1p2G,
    /// 10 GHz.
    B10G,
    /// 10 meters.
    B10m,
    /// 119 GHz.
    B119G,
    /// 142 GHz.
    B142G,
    /// 15 meters.
    B15m,
    /// 160 meters.
    B160m,
    /// 2.3 GHz.
    B2p3G,
    /// 20 meters.
    B20m,
    /// 222 MHz.
    B222,
    /// 241 GHz.
    B241G,
    /// 24 GHz.
    B24G,
    /// 2 meters.
    B2m,
    /// 3.4 GHz.
    B3p4G,
    /// 40 meters.
    B40m,
    /// 432 MHz.
    B432,
    /// 47 GHz.
    B47G,
    /// 5.7 GHz.
    B5p7G,
    /// 6 meters.
    B6m,
    /// 75 GHz.
    B75G,
    /// 80 meters.
    B80m,
    /// 902 MHz.
    B902,
    /// Band could not be determined from the log.
    Unknown,
}

impl Band {
    /// Every band, ordered by name.
    pub const ALL: [Band; 23] = [
        Band::B1p2G,
        Band::B10G,
        Band::B10m,
        Band::B119G,
        Band::B142G,
        Band::B15m,
        Band::B160m,
        Band::B2p3G,
        Band::B20m,
        Band::B222,
        Band::B241G,
        Band::B24G,
        Band::B2m,
        Band::B3p4G,
        Band::B40m,
        Band::B432,
        Band::B47G,
        Band::B5p7G,
        Band::B6m,
        Band::B75G,
        Band::B80m,
        Band::B902,
        Band::Unknown,
    ];

    /// Canonical log name of the band.
    pub fn as_str(self) -> &'static str {
        match self {
            Band::B1p2G => "1.2G",
            Band::B10G => "10G",
            Band::B10m => "10m",
            Band::B119G => "119G",
            Band::B142G => "142G",
            Band::B15m => "15m",
            Band::B160m => "160m",
            Band::B2p3G => "2.3G",
            Band::B20m => "20m",
            Band::B222 => "222",
            Band::B241G => "241G",
            Band::B24G => "24G",
            Band::B2m => "2m",
            Band::B3p4G => "3.4G",
            Band::B40m => "40m",
            Band::B432 => "432",
            Band::B47G => "47G",
            Band::B5p7G => "5.7G",
            Band::B6m => "6m",
            Band::B75G => "75G",
            Band::B80m => "80m",
            Band::B902 => "902",
            Band::Unknown => "unknown",
        }
    }
}

impl FromStr for Band {
    type Err = QsoMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Band::ALL
            .binary_search_by(|band| band.as_str().cmp(s))
            .map(|idx| Band::ALL[idx])
            .map_err(|_| QsoMatchError::InvalidBand(s.to_string()))
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emission mode bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Voice, any modulation other than FM.
    Phone,
    /// Continuous Wave.
    CW,
    /// Frequency-modulated voice.
    FM,
    /// Radio teletype.
    RTTY,
}

impl Mode {
    /// Every mode, in declaration order.
    pub const ALL: [Mode; 4] = [Mode::Phone, Mode::CW, Mode::FM, Mode::RTTY];

    /// Two-letter log code of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Phone => "PH",
            Mode::CW => "CW",
            Mode::FM => "FM",
            Mode::RTTY => "RY",
        }
    }
}

impl FromStr for Mode {
    type Err = QsoMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PH" => Ok(Mode::Phone),
            "CW" => Ok(Mode::CW),
            "FM" => Ok(Mode::FM),
            "RY" => Ok(Mode::RTTY),
            other => Err(QsoMatchError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
