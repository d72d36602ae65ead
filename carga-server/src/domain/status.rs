//! Charging-unit status classification.
//!
//! Upstream feeds report statuses as free-form strings, in English or
//! Spanish depending on the provider. This module is the single place
//! that maps those strings onto the four canonical status classes;
//! nothing else in the crate matches on raw status strings.

use std::fmt;

/// Canonical status of a charging unit or connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorStatus {
    /// Ready to start a charge right now.
    Available,

    /// A vehicle is plugged in (charging, finishing, or occupying the bay).
    InUse,

    /// The provider has no live telemetry for this unit. Distinct from a
    /// known-bad state: the unit may well be working.
    NoData,

    /// Known not to be usable: reserved, out of order, inoperative,
    /// blocked, planned, removed.
    OtherUnavailable,
}

impl ConnectorStatus {
    /// Spanish display label for this status class.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectorStatus::Available => "Disponible",
            ConnectorStatus::InUse => "En uso",
            ConnectorStatus::NoData => "Sin informacion",
            ConnectorStatus::OtherUnavailable => "No operativa",
        }
    }
}

impl fmt::Display for ConnectorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a raw provider status string.
///
/// Matching is case-insensitive and tolerant of surrounding whitespace.
/// An empty string and the explicit "no data" sentinels both mean the
/// API lacks telemetry, not that the unit is broken. Anything
/// unrecognized is treated as a known-unusable state; callers that care
/// about display should keep the raw string alongside (see
/// [`crate::domain::Connector::status_label`]) so nothing is silently
/// lost.
pub fn classify_status(raw: &str) -> ConnectorStatus {
    let normalized = raw.trim().to_uppercase();

    match normalized.as_str() {
        "" => ConnectorStatus::NoData,
        "AVAILABLE" | "DISPONIBLE" => ConnectorStatus::Available,
        "CHARGING" | "FINISHING" | "OCCUPIED" | "OCUPADO" | "CARGANDO" | "EN USO"
        | "FINALIZANDO" => ConnectorStatus::InUse,
        // "NO DISPONIBLE" is the feed's way of saying "no live data",
        // not "out of service".
        "NO DISPONIBLE" | "UNKNOWN" | "SIN INFORMACION" | "SIN INFORMACIÓN" => {
            ConnectorStatus::NoData
        }
        _ => ConnectorStatus::OtherUnavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_in_both_languages() {
        assert_eq!(classify_status("AVAILABLE"), ConnectorStatus::Available);
        assert_eq!(classify_status("DISPONIBLE"), ConnectorStatus::Available);
        assert_eq!(classify_status("disponible"), ConnectorStatus::Available);
        assert_eq!(classify_status(" Available "), ConnectorStatus::Available);
    }

    #[test]
    fn in_use_variants() {
        assert_eq!(classify_status("CHARGING"), ConnectorStatus::InUse);
        assert_eq!(classify_status("FINISHING"), ConnectorStatus::InUse);
        assert_eq!(classify_status("OCCUPIED"), ConnectorStatus::InUse);
        assert_eq!(classify_status("Ocupado"), ConnectorStatus::InUse);
        assert_eq!(classify_status("cargando"), ConnectorStatus::InUse);
        assert_eq!(classify_status("EN USO"), ConnectorStatus::InUse);
    }

    #[test]
    fn no_data_sentinels() {
        assert_eq!(classify_status(""), ConnectorStatus::NoData);
        assert_eq!(classify_status("   "), ConnectorStatus::NoData);
        assert_eq!(classify_status("NO DISPONIBLE"), ConnectorStatus::NoData);
        assert_eq!(classify_status("UNKNOWN"), ConnectorStatus::NoData);
        assert_eq!(classify_status("Sin informacion"), ConnectorStatus::NoData);
    }

    #[test]
    fn everything_else_is_unusable() {
        for raw in [
            "RESERVED",
            "OUTOFORDER",
            "INOPERATIVE",
            "BLOCKED",
            "PLANNED",
            "REMOVED",
            "FUERA DE SERVICIO",
            "EN MANTENCION",
            "???",
        ] {
            assert_eq!(
                classify_status(raw),
                ConnectorStatus::OtherUnavailable,
                "expected {raw:?} to classify as OtherUnavailable"
            );
        }
    }

    #[test]
    fn labels_are_spanish() {
        assert_eq!(ConnectorStatus::Available.label(), "Disponible");
        assert_eq!(ConnectorStatus::InUse.to_string(), "En uso");
    }
}
