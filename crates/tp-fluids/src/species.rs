//! Fluid identifiers understood by the property engine.

use crate::error::FluidError;

/// Pure fluids (and pseudo-pure air) that the CoolProp backend can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Water (H₂O)
    H2O,
    /// Air (pseudo-pure backend fluid)
    Air,
    /// Nitrogen (N₂)
    N2,
    /// Oxygen (O₂)
    O2,
    /// Argon (Ar)
    Ar,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Carbon monoxide (CO)
    CO,
    /// Hydrogen (H₂)
    H2,
    /// Helium (He)
    He,
    /// Neon
    Neon,
    /// Krypton
    Krypton,
    /// Xenon
    Xenon,
    /// Methane (CH₄)
    CH4,
    /// Ethane
    Ethane,
    /// Ethylene
    Ethylene,
    /// Propane
    Propane,
    /// Propylene
    Propylene,
    /// n-Butane
    NButane,
    /// Isobutane
    Isobutane,
    /// n-Pentane
    NPentane,
    /// Isopentane
    Isopentane,
    /// n-Hexane
    NHexane,
    /// Benzene
    Benzene,
    /// Toluene
    Toluene,
    /// Ethanol
    Ethanol,
    /// Acetone
    Acetone,
    /// Ammonia (NH₃)
    Ammonia,
    /// Nitrous oxide (N₂O)
    NitrousOxide,
    /// Sulfur dioxide (SO₂)
    SulfurDioxide,
    /// Hydrogen sulfide (H₂S)
    HydrogenSulfide,
    /// Refrigerant R22
    R22,
    /// Refrigerant R32
    R32,
    /// Refrigerant R125
    R125,
    /// Refrigerant R134a
    R134a,
    /// Refrigerant R152a
    R152a,
    /// Refrigerant R245fa
    R245fa,
    /// Refrigerant R1234yf
    R1234yf,
}

impl Species {
    pub const ALL: [Species; 37] = [
        Species::H2O,
        Species::Air,
        Species::N2,
        Species::O2,
        Species::Ar,
        Species::CO2,
        Species::CO,
        Species::H2,
        Species::He,
        Species::Neon,
        Species::Krypton,
        Species::Xenon,
        Species::CH4,
        Species::Ethane,
        Species::Ethylene,
        Species::Propane,
        Species::Propylene,
        Species::NButane,
        Species::Isobutane,
        Species::NPentane,
        Species::Isopentane,
        Species::NHexane,
        Species::Benzene,
        Species::Toluene,
        Species::Ethanol,
        Species::Acetone,
        Species::Ammonia,
        Species::NitrousOxide,
        Species::SulfurDioxide,
        Species::HydrogenSulfide,
        Species::R22,
        Species::R32,
        Species::R125,
        Species::R134a,
        Species::R152a,
        Species::R245fa,
        Species::R1234yf,
    ];

    /// Short canonical identifier (chemical formula where one is common).
    pub fn key(&self) -> &'static str {
        match self {
            Species::H2O => "H2O",
            Species::Air => "Air",
            Species::N2 => "N2",
            Species::O2 => "O2",
            Species::Ar => "Ar",
            Species::CO2 => "CO2",
            Species::CO => "CO",
            Species::H2 => "H2",
            Species::He => "He",
            Species::Neon => "Ne",
            Species::Krypton => "Kr",
            Species::Xenon => "Xe",
            Species::CH4 => "CH4",
            Species::Ethane => "C2H6",
            Species::Ethylene => "C2H4",
            Species::Propane => "C3H8",
            Species::Propylene => "C3H6",
            Species::NButane => "nButane",
            Species::Isobutane => "Isobutane",
            Species::NPentane => "nPentane",
            Species::Isopentane => "Isopentane",
            Species::NHexane => "nHexane",
            Species::Benzene => "C6H6",
            Species::Toluene => "Toluene",
            Species::Ethanol => "Ethanol",
            Species::Acetone => "Acetone",
            Species::Ammonia => "NH3",
            Species::NitrousOxide => "N2O",
            Species::SulfurDioxide => "SO2",
            Species::HydrogenSulfide => "H2S",
            Species::R22 => "R22",
            Species::R32 => "R32",
            Species::R125 => "R125",
            Species::R134a => "R134a",
            Species::R152a => "R152a",
            Species::R245fa => "R245fa",
            Species::R1234yf => "R1234yf",
        }
    }

    /// Human-readable name, as offered in fluid pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::H2O => "Water",
            Species::Air => "Air",
            Species::N2 => "Nitrogen",
            Species::O2 => "Oxygen",
            Species::Ar => "Argon",
            Species::CO2 => "Carbon Dioxide",
            Species::CO => "Carbon Monoxide",
            Species::H2 => "Hydrogen",
            Species::He => "Helium",
            Species::Neon => "Neon",
            Species::Krypton => "Krypton",
            Species::Xenon => "Xenon",
            Species::CH4 => "Methane",
            Species::Ethane => "Ethane",
            Species::Ethylene => "Ethylene",
            Species::Propane => "Propane",
            Species::Propylene => "Propylene",
            Species::NButane => "n-Butane",
            Species::Isobutane => "Isobutane",
            Species::NPentane => "n-Pentane",
            Species::Isopentane => "Isopentane",
            Species::NHexane => "n-Hexane",
            Species::Benzene => "Benzene",
            Species::Toluene => "Toluene",
            Species::Ethanol => "Ethanol",
            Species::Acetone => "Acetone",
            Species::Ammonia => "Ammonia",
            Species::NitrousOxide => "Nitrous Oxide",
            Species::SulfurDioxide => "Sulfur Dioxide",
            Species::HydrogenSulfide => "Hydrogen Sulfide",
            Species::R22 => "R22",
            Species::R32 => "R32",
            Species::R125 => "R125",
            Species::R134a => "R134a",
            Species::R152a => "R152a",
            Species::R245fa => "R245fa",
            Species::R1234yf => "R1234yf",
        }
    }

    /// Whether this is water, the condensable component for humid-air mixing.
    pub fn is_water(&self) -> bool {
        matches!(self, Species::H2O)
    }

    /// Map to the rfluids pure substance backing this species.
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Species::H2O => Pure::Water,
            Species::Air => Pure::Air,
            Species::N2 => Pure::Nitrogen,
            Species::O2 => Pure::Oxygen,
            Species::Ar => Pure::Argon,
            Species::CO2 => Pure::CarbonDioxide,
            Species::CO => Pure::CarbonMonoxide,
            Species::H2 => Pure::Hydrogen,
            Species::He => Pure::Helium,
            Species::Neon => Pure::Neon,
            Species::Krypton => Pure::Krypton,
            Species::Xenon => Pure::Xenon,
            Species::CH4 => Pure::Methane,
            Species::Ethane => Pure::Ethane,
            Species::Ethylene => Pure::Ethylene,
            Species::Propane => Pure::nPropane,
            Species::Propylene => Pure::Propylene,
            Species::NButane => Pure::nButane,
            Species::Isobutane => Pure::Isobutane,
            Species::NPentane => Pure::nPentane,
            Species::Isopentane => Pure::Isopentane,
            Species::NHexane => Pure::nHexane,
            Species::Benzene => Pure::Benzene,
            Species::Toluene => Pure::Toluene,
            Species::Ethanol => Pure::Ethanol,
            Species::Acetone => Pure::Acetone,
            Species::Ammonia => Pure::Ammonia,
            Species::NitrousOxide => Pure::NitrousOxide,
            Species::SulfurDioxide => Pure::SulfurDioxide,
            Species::HydrogenSulfide => Pure::HydrogenSulfide,
            Species::R22 => Pure::R22,
            Species::R32 => Pure::R32,
            Species::R125 => Pure::R125,
            Species::R134a => Pure::R134a,
            Species::R152a => Pure::R152a,
            Species::R245fa => Pure::R245fa,
            Species::R1234yf => Pure::R1234yf,
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Species {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "H2O" | "WATER" => Ok(Species::H2O),
            "AIR" => Ok(Species::Air),
            "N2" | "NITROGEN" => Ok(Species::N2),
            "O2" | "OXYGEN" => Ok(Species::O2),
            "AR" | "ARGON" => Ok(Species::Ar),
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Species::CO2),
            "CO" | "CARBONMONOXIDE" | "CARBON MONOXIDE" => Ok(Species::CO),
            "H2" | "HYDROGEN" => Ok(Species::H2),
            "HE" | "HELIUM" => Ok(Species::He),
            "NE" | "NEON" => Ok(Species::Neon),
            "KR" | "KRYPTON" => Ok(Species::Krypton),
            "XE" | "XENON" => Ok(Species::Xenon),
            "CH4" | "METHANE" => Ok(Species::CH4),
            "C2H6" | "ETHANE" => Ok(Species::Ethane),
            "C2H4" | "ETHYLENE" => Ok(Species::Ethylene),
            "C3H8" | "PROPANE" | "N-PROPANE" | "NPROPANE" => Ok(Species::Propane),
            "C3H6" | "PROPYLENE" => Ok(Species::Propylene),
            "NBUTANE" | "N-BUTANE" | "BUTANE" => Ok(Species::NButane),
            "ISOBUTANE" | "I-BUTANE" | "IBUTANE" => Ok(Species::Isobutane),
            "NPENTANE" | "N-PENTANE" | "PENTANE" => Ok(Species::NPentane),
            "ISOPENTANE" | "I-PENTANE" | "IPENTANE" => Ok(Species::Isopentane),
            "NHEXANE" | "N-HEXANE" | "HEXANE" => Ok(Species::NHexane),
            "C6H6" | "BENZENE" => Ok(Species::Benzene),
            "TOLUENE" => Ok(Species::Toluene),
            "ETHANOL" => Ok(Species::Ethanol),
            "ACETONE" => Ok(Species::Acetone),
            "NH3" | "AMMONIA" => Ok(Species::Ammonia),
            "N2O" | "NITROUSOXIDE" | "NITROUS OXIDE" => Ok(Species::NitrousOxide),
            "SO2" | "SULFURDIOXIDE" | "SULFUR DIOXIDE" => Ok(Species::SulfurDioxide),
            "H2S" | "HYDROGENSULFIDE" | "HYDROGEN SULFIDE" => Ok(Species::HydrogenSulfide),
            "R22" => Ok(Species::R22),
            "R32" => Ok(Species::R32),
            "R125" => Ok(Species::R125),
            "R134A" => Ok(Species::R134a),
            "R152A" => Ok(Species::R152a),
            "R245FA" => Ok(Species::R245fa),
            "R1234YF" => Ok(Species::R1234yf),
            _ => Err(FluidError::NotSupported {
                what: format!("unknown fluid '{}'", s.trim()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_display_names_parse_back() {
        for species in Species::ALL {
            assert_eq!(species.key().parse::<Species>().unwrap(), species);
            assert_eq!(species.display_name().parse::<Species>().unwrap(), species);
        }
    }

    #[test]
    fn parse_common_aliases() {
        assert_eq!("water".parse::<Species>().unwrap(), Species::H2O);
        assert_eq!("CarbonDioxide".parse::<Species>().unwrap(), Species::CO2);
        assert_eq!("n-Butane".parse::<Species>().unwrap(), Species::NButane);
        assert_eq!("i-Pentane".parse::<Species>().unwrap(), Species::Isopentane);
    }

    #[test]
    fn unknown_fluid_is_not_supported() {
        let err = "Unobtainium".parse::<Species>().unwrap_err();
        assert!(matches!(err, FluidError::NotSupported { .. }));
        assert!(err.to_string().contains("Unobtainium"));
    }

    #[test]
    fn only_water_is_water() {
        assert!(Species::H2O.is_water());
        assert_eq!(Species::ALL.iter().filter(|s| s.is_water()).count(), 1);
    }
}
