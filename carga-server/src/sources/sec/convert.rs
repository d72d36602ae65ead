//! Conversion from SEC socket rows to domain stations.
//!
//! The feed repeats station fields on every socket row, so conversion
//! groups rows by station id first. Each row is one charging unit with
//! one connector; the row's status is the unit status.

use chrono::DateTime;

use crate::domain::{
    Availability, Connector, ConnectorStandard, ConnectorStatus, Coordinate, PowerType, Station,
    classify_status,
};

use super::types::SecSocketRow;

/// Convert a batch of socket rows into stations, one per distinct
/// station id, in first-seen row order.
///
/// Rows without a station id cannot be grouped and are folded into a
/// single-socket station of their own, keyed by the empty id; the feed
/// is not supposed to produce them, but a malformed row must degrade,
/// not disappear.
pub fn convert_rows(rows: &[SecSocketRow]) -> Vec<Station> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: std::collections::HashMap<String, Vec<&SecSocketRow>> =
        std::collections::HashMap::new();

    for row in rows {
        let id = row
            .station_id
            .as_ref()
            .map(|raw| raw.as_string())
            .unwrap_or_default();
        let entry = grouped.entry(id.clone()).or_default();
        if entry.is_empty() {
            order.push(id);
        }
        entry.push(row);
    }

    order
        .into_iter()
        .map(|id| {
            let rows = &grouped[&id];
            convert_station(&id, rows)
        })
        .collect()
}

/// Build one station from all of its socket rows.
fn convert_station(id: &str, rows: &[&SecSocketRow]) -> Station {
    let first = rows[0];

    let name = first
        .station_name
        .clone()
        .unwrap_or_else(|| "Estacion sin nombre".to_string());

    let mut station = Station::new(id, name);
    station.address = first.address.clone();
    station.commune = first.commune.clone();
    station.region = first.region.clone();

    if let (Some(lat), Some(lon)) = (first.latitude, first.longitude) {
        station.coordinate = Some(Coordinate::new(lat, lon));
    }

    station.last_updated = rows
        .iter()
        .filter_map(|row| row.updated_at.as_deref())
        .filter_map(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.to_utc())
        .max();

    let mut connectors = Vec::new();
    let mut availability = Availability::default();

    for row in rows {
        let status = classify_status(row.status.as_deref().unwrap_or(""));

        availability.evse_count += 1;
        match status {
            ConnectorStatus::Available => availability.available += 1,
            ConnectorStatus::InUse => availability.in_use += 1,
            ConnectorStatus::NoData => availability.no_data += 1,
            ConnectorStatus::OtherUnavailable => availability.other += 1,
        }

        connectors.push(convert_socket(row, status));
    }

    station.set_connectors(connectors);
    station.set_availability(availability);

    station
}

fn convert_socket(row: &SecSocketRow, status: ConnectorStatus) -> Connector {
    let standard = row
        .connector_type
        .as_deref()
        .map(ConnectorStandard::parse)
        .unwrap_or(ConnectorStandard::Unknown);
    let power_type = row
        .power_type
        .as_deref()
        .map(PowerType::parse)
        .unwrap_or(PowerType::Unknown);

    let mut connector = Connector::new(standard, power_type);
    connector.max_power_kw = row.power_kw.unwrap_or(0.0).max(0.0);
    connector.status = status;
    if status == ConnectorStatus::OtherUnavailable {
        connector.status_label = row.status.clone();
    }

    connector
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::ea::RawId;

    fn row(station_id: &str, connector_type: &str, power: &str, status: &str) -> SecSocketRow {
        SecSocketRow {
            station_id: Some(RawId::Text(station_id.to_string())),
            station_name: Some(format!("Estacion {station_id}")),
            address: None,
            commune: Some("Santiago".to_string()),
            region: Some("Metropolitana".to_string()),
            latitude: Some(-33.45),
            longitude: Some(-70.65),
            connector_type: Some(connector_type.to_string()),
            power_type: Some(power.to_string()),
            power_kw: Some(50.0),
            status: Some(status.to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn groups_rows_by_station() {
        let rows = vec![
            row("a", "CCS 2", "DC", "DISPONIBLE"),
            row("b", "Tipo 2", "AC", "OCUPADO"),
            row("a", "CCS 2", "DC", "OCUPADO"),
        ];

        let stations = convert_rows(&rows);

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, "a");
        assert_eq!(stations[1].id, "b");

        let a = &stations[0];
        assert_eq!(a.availability().evse_count, 2);
        assert_eq!(a.availability().available, 1);
        assert_eq!(a.availability().in_use, 1);
        assert_eq!(a.connectors().len(), 2);
    }

    #[test]
    fn spanish_statuses_classified() {
        let rows = vec![
            row("x", "CCS 2", "DC", "DISPONIBLE"),
            row("x", "CCS 2", "DC", "CARGANDO"),
            row("x", "Tipo 2", "AC", "NO DISPONIBLE"),
            row("x", "Tipo 2", "AC", "FUERA DE SERVICIO"),
        ];

        let stations = convert_rows(&rows);
        let a = stations[0].availability();

        assert_eq!(a.evse_count, 4);
        assert_eq!(a.available, 1);
        assert_eq!(a.in_use, 1);
        assert_eq!(a.no_data, 1);
        assert_eq!(a.other, 1);

        // The out-of-vocabulary status string stays visible.
        assert_eq!(stations[0].connectors()[3].status_display(), "FUERA DE SERVICIO");
    }

    #[test]
    fn preserves_first_seen_order() {
        let rows = vec![
            row("c", "Tipo 2", "AC", "DISPONIBLE"),
            row("a", "Tipo 2", "AC", "DISPONIBLE"),
            row("b", "Tipo 2", "AC", "DISPONIBLE"),
            row("a", "Tipo 2", "AC", "DISPONIBLE"),
        ];

        let ids: Vec<String> = convert_rows(&rows).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn takes_latest_telemetry_timestamp() {
        let mut first = row("t", "CCS 2", "DC", "DISPONIBLE");
        first.updated_at = Some("2024-06-01T12:00:00Z".to_string());
        let mut second = row("t", "CCS 2", "DC", "OCUPADO");
        second.updated_at = Some("2024-06-01T12:30:00Z".to_string());

        let stations = convert_rows(&[first, second]);
        let updated = stations[0].last_updated.unwrap();

        assert_eq!(updated.to_rfc3339(), "2024-06-01T12:30:00+00:00");
    }

    #[test]
    fn row_without_station_id_degrades() {
        let mut anonymous = row("", "Tipo 2", "AC", "DISPONIBLE");
        anonymous.station_id = None;

        let stations = convert_rows(&[anonymous]);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "");
        assert_eq!(stations[0].availability().available, 1);
    }

    #[test]
    fn conversion_is_pure() {
        let rows = vec![
            row("a", "CCS 2", "DC", "DISPONIBLE"),
            row("a", "Tipo 2", "AC", "OCUPADO"),
        ];

        let first = convert_rows(&rows);
        let second = convert_rows(&rows);

        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].availability(), second[0].availability());
        assert_eq!(first[0].standards(), second[0].standards());
    }
}
