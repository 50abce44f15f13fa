//! Instruments played in the club
//!
//! Instruments form a small hierarchy: single instruments belong to a
//! category (e.g. [`Instrument::Tuba`] is a [`Instrument::LowBrass`]
//! instrument, which in turn is [`Instrument::Brass`]).

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    // Categories
    Woodwind,
    Brass,
    HighBrass,
    LowBrass,
    Percussion,
    // Single instruments
    Conductor,
    Flute,
    Clarinet,
    Oboe,
    Bassoon,
    Saxophone,
    SopranoSaxophone,
    AltoSaxophone,
    TenorSaxophone,
    BaritoneSaxophone,
    Euphonium,
    BaritoneHorn,
    Baritone,
    Trombone,
    Tuba,
    Trumpet,
    Flugelhorn,
    Horn,
    Drums,
    Guitar,
    BassGuitar,
}

impl Instrument {
    pub const ALL: [Instrument; 26] = [
        Instrument::Woodwind,
        Instrument::Brass,
        Instrument::HighBrass,
        Instrument::LowBrass,
        Instrument::Percussion,
        Instrument::Conductor,
        Instrument::Flute,
        Instrument::Clarinet,
        Instrument::Oboe,
        Instrument::Bassoon,
        Instrument::Saxophone,
        Instrument::SopranoSaxophone,
        Instrument::AltoSaxophone,
        Instrument::TenorSaxophone,
        Instrument::BaritoneSaxophone,
        Instrument::Euphonium,
        Instrument::BaritoneHorn,
        Instrument::Baritone,
        Instrument::Trombone,
        Instrument::Tuba,
        Instrument::Trumpet,
        Instrument::Flugelhorn,
        Instrument::Horn,
        Instrument::Drums,
        Instrument::Guitar,
        Instrument::BassGuitar,
    ];

    /// German display name
    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Woodwind => "Holz",
            Instrument::Brass => "Blech",
            Instrument::HighBrass => "Hochblech",
            Instrument::LowBrass => "Tiefblech",
            Instrument::Percussion => "Percussion",
            Instrument::Conductor => "Anzähler",
            Instrument::Flute => "Querflöte",
            Instrument::Clarinet => "Klarinette",
            Instrument::Oboe => "Oboe",
            Instrument::Bassoon => "Fagott",
            Instrument::Saxophone => "Saxophon",
            Instrument::SopranoSaxophone => "Sopransaxophon",
            Instrument::AltoSaxophone => "Altsaxophon",
            Instrument::TenorSaxophone => "Tenorsaxophon",
            Instrument::BaritoneSaxophone => "Baritonsaxophon",
            Instrument::Euphonium => "Euphonium",
            Instrument::BaritoneHorn => "Tenorhorn",
            Instrument::Baritone => "Bariton",
            Instrument::Trombone => "Posaune",
            Instrument::Tuba => "Tuba",
            Instrument::Trumpet => "Trompete",
            Instrument::Flugelhorn => "Flügelhorn",
            Instrument::Horn => "Horn",
            Instrument::Drums => "Schlagzeug",
            Instrument::Guitar => "Gitarre",
            Instrument::BassGuitar => "Bass-Gitarre",
        }
    }

    /// The category this instrument belongs to, if any
    pub fn parent(&self) -> Option<Instrument> {
        match self {
            Instrument::Woodwind
            | Instrument::Brass
            | Instrument::Percussion
            | Instrument::Conductor
            | Instrument::Guitar => None,
            Instrument::HighBrass | Instrument::LowBrass => Some(Instrument::Brass),
            Instrument::Flute
            | Instrument::Clarinet
            | Instrument::Oboe
            | Instrument::Bassoon
            | Instrument::Saxophone => Some(Instrument::Woodwind),
            Instrument::SopranoSaxophone
            | Instrument::AltoSaxophone
            | Instrument::TenorSaxophone
            | Instrument::BaritoneSaxophone => Some(Instrument::Saxophone),
            Instrument::Euphonium
            | Instrument::BaritoneHorn
            | Instrument::Baritone
            | Instrument::Trombone
            | Instrument::Tuba => Some(Instrument::LowBrass),
            Instrument::Trumpet | Instrument::Flugelhorn | Instrument::Horn => {
                Some(Instrument::HighBrass)
            }
            Instrument::Drums => Some(Instrument::Percussion),
            Instrument::BassGuitar => Some(Instrument::Guitar),
        }
    }

    /// Whether this instrument is `other` or belongs to it, e.g. a trumpet is brass
    pub fn is_a(&self, other: Instrument) -> bool {
        let mut current = Some(*self);
        while let Some(instrument) = current {
            if instrument == other {
                return true;
            }
            current = instrument.parent();
        }
        false
    }

    fn from_abbreviation(abbreviation: &str) -> Option<Instrument> {
        let instrument = match abbreviation {
            "flö" => Instrument::Flute,
            "kla" => Instrument::Clarinet,
            "obe" => Instrument::Oboe,
            "hlz" => Instrument::Woodwind,
            "sax" => Instrument::Saxophone,
            "asx" => Instrument::AltoSaxophone,
            "tsx" => Instrument::TenorSaxophone,
            "fag" => Instrument::Bassoon,
            "trp" => Instrument::Trumpet,
            "flü" => Instrument::Flugelhorn,
            "teh" => Instrument::BaritoneHorn,
            "hrn" => Instrument::Horn,
            "pos" => Instrument::Trombone,
            "tub" => Instrument::Tuba,
            "tpd" => Instrument::Percussion,
            "git" => Instrument::Guitar,
            "bss" => Instrument::BassGuitar,
            _ => return None,
        };
        Some(instrument)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Instrument {
    type Err = DomainError;

    /// Parse a display name or a roster abbreviation, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if let Some(instrument) = Self::from_abbreviation(&needle) {
            return Ok(instrument);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.name().to_lowercase() == needle)
            .ok_or_else(|| DomainError::UnknownInstrument(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_abbreviation() {
        assert_eq!("Tub".parse::<Instrument>().unwrap(), Instrument::Tuba);
        assert_eq!(" flü ".parse::<Instrument>().unwrap(), Instrument::Flugelhorn);
    }

    #[test]
    fn test_parse_name() {
        assert_eq!("trompete".parse::<Instrument>().unwrap(), Instrument::Trumpet);
        assert_eq!(
            "Bass-Gitarre".parse::<Instrument>().unwrap(),
            Instrument::BassGuitar
        );
        assert!(matches!(
            "Kazoo".parse::<Instrument>(),
            Err(DomainError::UnknownInstrument(_))
        ));
    }

    #[test]
    fn test_every_name_parses_back() {
        for instrument in Instrument::ALL {
            assert_eq!(instrument.name().parse::<Instrument>().unwrap(), instrument);
        }
    }

    #[test]
    fn test_hierarchy() {
        assert!(Instrument::Trumpet.is_a(Instrument::Brass));
        assert!(Instrument::Trumpet.is_a(Instrument::HighBrass));
        assert!(!Instrument::Flugelhorn.is_a(Instrument::Trumpet));
        assert!(Instrument::AltoSaxophone.is_a(Instrument::Woodwind));
        assert!(!Instrument::AltoSaxophone.is_a(Instrument::TenorSaxophone));
        assert!(Instrument::Brass.is_a(Instrument::Brass));
    }
}
