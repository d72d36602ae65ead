//! Conversion from Energía Abierta DTOs to domain stations.
//!
//! Normalization never fails: a record missing coordinates (or almost
//! anything else) still becomes a Station, degraded rather than dropped,
//! so data-quality problems stay visible downstream instead of
//! disappearing here.

use chrono::DateTime;

use crate::domain::{
    Availability, Connector, ConnectorStandard, ConnectorStatus, Coordinate, PowerType, Station,
    classify_status,
};

use super::types::{EaChargePoint, EaConnector, EaEvse};

/// Convert one charge-point record into a Station.
///
/// Pure function of the record: converting the same record twice yields
/// identical stations.
pub fn convert_charge_point(record: &EaChargePoint) -> Station {
    let id = record
        .id
        .as_ref()
        .map(|raw| raw.as_string())
        .unwrap_or_default();
    let name = record
        .name
        .clone()
        .unwrap_or_else(|| "Estacion sin nombre".to_string());

    let mut station = Station::new(id, name);
    station.address = record.address.clone();
    station.commune = record.commune.clone();
    station.region = record.region.clone();
    station.operator = record.owner.clone();
    station.open_24h = record.open24h;

    if let (Some(lat), Some(lon)) = (record.latitude, record.longitude) {
        station.coordinate = Some(Coordinate::new(lat, lon));
    }

    station.last_updated = record
        .updated_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.to_utc());

    let evses = record.evses.as_deref().unwrap_or(&[]);

    let mut connectors = Vec::new();
    let mut availability = Availability::default();

    for evse in evses {
        tally_unit(&mut availability, unit_status(evse));
        for connector in evse.connectors.as_deref().unwrap_or(&[]) {
            connectors.push(convert_connector(connector));
        }
    }

    station.set_connectors(connectors);
    station.set_availability(availability);

    station
}

/// Effective status of a charging unit.
///
/// The unit's own status is authoritative. When it reports no data, fall
/// back to its connectors: the unit-level field is sometimes blank even
/// though connector-level telemetry exists.
fn unit_status(evse: &EaEvse) -> ConnectorStatus {
    let reported = classify_status(evse.status.as_deref().unwrap_or(""));
    if reported != ConnectorStatus::NoData {
        return reported;
    }

    let connector_statuses = || {
        evse.connectors
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|c| classify_status(c.status.as_deref().unwrap_or("")))
    };

    if connector_statuses().any(|s| s == ConnectorStatus::Available) {
        ConnectorStatus::Available
    } else if connector_statuses().any(|s| s == ConnectorStatus::InUse) {
        ConnectorStatus::InUse
    } else {
        ConnectorStatus::NoData
    }
}

fn tally_unit(availability: &mut Availability, status: ConnectorStatus) {
    availability.evse_count += 1;
    match status {
        ConnectorStatus::Available => availability.available += 1,
        ConnectorStatus::InUse => availability.in_use += 1,
        ConnectorStatus::NoData => availability.no_data += 1,
        ConnectorStatus::OtherUnavailable => availability.other += 1,
    }
}

fn convert_connector(raw: &EaConnector) -> Connector {
    let standard = raw
        .standard
        .as_deref()
        .map(ConnectorStandard::parse)
        .unwrap_or(ConnectorStandard::Unknown);
    let power_type = raw
        .power_type
        .as_deref()
        .map(PowerType::parse)
        .unwrap_or(PowerType::Unknown);

    let mut connector = Connector::new(standard, power_type);
    connector.max_power_kw = raw.max_power_kw.unwrap_or(0.0).max(0.0);
    connector.quantity = raw.quantity.unwrap_or(1).max(1);
    connector.format = raw.format.clone();

    let raw_status = raw.status.as_deref().unwrap_or("");
    connector.status = classify_status(raw_status);
    // Keep the verbatim string for statuses outside the canonical
    // vocabulary so nothing is silently lost.
    if connector.status == ConnectorStatus::OtherUnavailable {
        connector.status_label = Some(raw_status.to_string());
    }

    connector
}
