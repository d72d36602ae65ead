//! Connector types: the physical plug on a charging unit.

use std::fmt;

use super::status::ConnectorStatus;

/// Physical plug standard.
///
/// The vocabulary covers the standards actually deployed in Chile; the
/// upstream feeds occasionally report something else (or nothing), which
/// lands in `Unknown` rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConnectorStandard {
    /// SAE J1772, single-phase AC.
    Type1,
    /// IEC 62196 Type 2 (Mennekes), the Chilean AC standard.
    Type2,
    /// CCS Combo 2, DC fast charging over a Type 2 combo plug.
    Ccs,
    /// CHAdeMO DC fast charging.
    Chademo,
    /// Anything the feed reported that we do not recognize.
    Unknown,
}

impl ConnectorStandard {
    /// Spanish display label, as shown in the station list and map popups.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectorStandard::Type1 => "Tipo 1 (J1772)",
            ConnectorStandard::Type2 => "Tipo 2 (Mennekes)",
            ConnectorStandard::Ccs => "CCS (Tipo 2)",
            ConnectorStandard::Chademo => "CHAdeMO",
            ConnectorStandard::Unknown => "Desconocido",
        }
    }

    /// Parse a provider connector-type string.
    ///
    /// Accepts both OCPI-style identifiers (`IEC_62196_T2_COMBO`) and the
    /// looser names seen in the live feed (`CCS 2`, `Tipo 2`).
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase().replace(['-', ' '], "_");

        match normalized.as_str() {
            "IEC_62196_T1" | "TYPE_1" | "TYPE1" | "TIPO_1" | "TIPO1" | "J1772" | "SAE_J1772" => {
                ConnectorStandard::Type1
            }
            "IEC_62196_T2" | "TYPE_2" | "TYPE2" | "TIPO_2" | "TIPO2" | "MENNEKES" => {
                ConnectorStandard::Type2
            }
            "IEC_62196_T2_COMBO" | "CCS" | "CCS_2" | "CCS2" | "COMBO_2" | "COMBO_CCS" => {
                ConnectorStandard::Ccs
            }
            "CHADEMO" => ConnectorStandard::Chademo,
            _ => ConnectorStandard::Unknown,
        }
    }
}

impl fmt::Display for ConnectorStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current delivery type of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PowerType {
    Ac,
    Dc,
    Unknown,
}

impl PowerType {
    /// Parse a provider power-type string (`AC`, `DC`, `AC_3_PHASE`, ...).
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase();

        if normalized.starts_with("DC") {
            PowerType::Dc
        } else if normalized.starts_with("AC") {
            PowerType::Ac
        } else {
            PowerType::Unknown
        }
    }
}

/// One physical plug on a charging station.
#[derive(Debug, Clone)]
pub struct Connector {
    /// Plug standard.
    pub standard: ConnectorStandard,

    /// AC or DC.
    pub power_type: PowerType,

    /// Rated maximum power in kW. Zero when the feed does not report it.
    pub max_power_kw: f64,

    /// Classified status. Unit-level status is authoritative; this is the
    /// connector's own report, used as a fallback when the unit has none.
    pub status: ConnectorStatus,

    /// The verbatim upstream status string, kept when it did not classify
    /// as a known state so the raw value stays visible to the caller.
    pub status_label: Option<String>,

    /// How many identical plugs this entry represents.
    pub quantity: u32,

    /// Cable/socket format metadata, verbatim from the provider.
    pub format: Option<String>,
}

impl Connector {
    /// Create a connector with the given standard and power type, one
    /// plug, no status information.
    pub fn new(standard: ConnectorStandard, power_type: PowerType) -> Self {
        Self {
            standard,
            power_type,
            max_power_kw: 0.0,
            status: ConnectorStatus::NoData,
            status_label: None,
            quantity: 1,
            format: None,
        }
    }

    /// Whether this is a DC fast-charging plug.
    pub fn is_dc(&self) -> bool {
        self.power_type == PowerType::Dc
    }

    /// Display label for the status: the classified label normally, the
    /// verbatim upstream string when classification fell through.
    pub fn status_display(&self) -> &str {
        match &self.status_label {
            Some(raw) => raw,
            None => self.status.label(),
        }
    }
}
