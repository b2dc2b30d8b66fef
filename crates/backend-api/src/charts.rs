//! Chart data preparation for the dashboard: modal-split doughnuts, NSM
//! filtering, push/pull measure grouping and map markers.

use chrono::{DateTime, Datelike, NaiveDate};
use mobilab_database::{
    KpiDefinition, KpiResultBeforeAfter, PopulatedLab, Project, ProjectType, TransportMode,
    TransportModeType,
};
use serde::Serialize;
use utoipa::ToSchema;

/// KPI numbers that break a lab's traffic down per transport mode.
const MODAL_SPLIT_KPI_NUMBERS: [&str; 3] = ["15.a", "15.b", "15.c"];

const FALLBACK_SLICE_COLOR: &str = "#cccccc";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SplitItem {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SplitDataset {
    pub label: String,
    pub data: Vec<SplitItem>,
}

/// Before/after doughnut pair for one modal-split KPI.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ModalSplitChart {
    pub kpi_name: String,
    pub before: SplitDataset,
    pub after: SplitDataset,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Meters.
    pub radius: Option<f64>,
}

/// Convert raw slice values into percentages of their sum, rounded to one
/// decimal. A zero sum falls back to an equal split so the chart still
/// renders (denominator 3 when the slice list itself is empty).
pub fn normalize_percentages(items: &[SplitItem]) -> Vec<f64> {
    let total: f64 = items.iter().map(|item| item.value).sum();
    if total == 0.0 {
        let len = if items.is_empty() { 3 } else { items.len() };
        let share = round_one_decimal(100.0 / len as f64);
        return items.iter().map(|_| share).collect();
    }

    items
        .iter()
        .map(|item| round_one_decimal(item.value * 100.0 / total))
        .collect()
}

/// Build the before/after modal-split datasets for every modal-split KPI
/// present in `definitions`, one slice per transport mode.
pub fn modal_split(
    definitions: &[KpiDefinition],
    transport_modes: &[TransportMode],
    paired: &[KpiResultBeforeAfter],
) -> Vec<ModalSplitChart> {
    if paired.is_empty() {
        return Vec::new();
    }

    definitions
        .iter()
        .filter(|definition| MODAL_SPLIT_KPI_NUMBERS.contains(&definition.kpi_number.as_str()))
        .map(|definition| {
            let results: Vec<&KpiResultBeforeAfter> = paired
                .iter()
                .filter(|pair| pair.kpi_definition_id == definition.id)
                .collect();
            build_chart(definition, transport_modes, &results)
        })
        .collect()
}

fn build_chart(
    definition: &KpiDefinition,
    transport_modes: &[TransportMode],
    results: &[&KpiResultBeforeAfter],
) -> ModalSplitChart {
    let mut before = SplitDataset {
        label: "Before".to_string(),
        data: Vec::new(),
    };
    let mut after = SplitDataset {
        label: "After".to_string(),
        data: Vec::new(),
    };

    if let Some(first) = results.first() {
        if let Some(year) = first.result_before.as_ref().and_then(|r| year_of(&r.date)) {
            before.label = format!("Before ({year})");
        }
        if let Some(year) = first.result_after.as_ref().and_then(|r| year_of(&r.date)) {
            after.label = format!("After ({year})");
        }
    }

    for pair in results {
        let Some(mode) = transport_modes
            .iter()
            .find(|mode| Some(mode.id) == pair.transport_mode_id)
        else {
            continue;
        };
        let color = mode
            .color
            .clone()
            .unwrap_or_else(|| FALLBACK_SLICE_COLOR.to_string());

        if let Some(result) = pair.result_before.as_ref().filter(|r| r.value != 0.0) {
            before.data.push(SplitItem {
                label: mode.name.clone(),
                value: result.value,
                color: color.clone(),
            });
        }
        if let Some(result) = pair.result_after.as_ref().filter(|r| r.value != 0.0) {
            after.data.push(SplitItem {
                label: mode.name.clone(),
                value: result.value,
                color,
            });
        }
    }

    ModalSplitChart {
        kpi_name: definition.name.clone(),
        before,
        after,
    }
}

/// Transport modes of the lab that are New Mobility Services.
pub fn nsm_transport_modes(lab: &PopulatedLab, all_modes: &[TransportMode]) -> Vec<TransportMode> {
    all_modes
        .iter()
        .filter(|mode| {
            mode.kind == TransportModeType::Nsm
                && lab.transport_modes.iter().any(|m| m.id == mode.id)
        })
        .cloned()
        .collect()
}

/// Split a lab's measures into push and pull groups. OTHER measures are
/// shown in neither group.
pub fn separate_measures(measures: &[Project]) -> (Vec<Project>, Vec<Project>) {
    let push = measures
        .iter()
        .filter(|m| m.kind == ProjectType::Push)
        .cloned()
        .collect();
    let pull = measures
        .iter()
        .filter(|m| m.kind == ProjectType::Pull)
        .cloned()
        .collect();
    (push, pull)
}

/// Marker for the lab overview map. The stored radius is kilometers.
pub fn map_marker(lab: &PopulatedLab) -> MapMarker {
    MapMarker {
        id: lab.lab.id.to_string(),
        name: lab.lab.name.clone(),
        lat: parse_coordinate(lab.lab.lat.as_deref()),
        lng: parse_coordinate(lab.lab.lng.as_deref()),
        radius: lab.lab.radius.map(|km| km * 1000.0),
    }
}

fn parse_coordinate(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(0.0)
}

fn year_of(date: &str) -> Option<i32> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(date) {
        return Some(datetime.year());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use mobilab_database::{KpiMetric, KpiResult, KpiType, Lab};

    fn slice(label: &str, value: f64) -> SplitItem {
        SplitItem {
            label: label.to_string(),
            value,
            color: "#112233".to_string(),
        }
    }

    fn definition(id: i64, kpi_number: &str, name: &str) -> KpiDefinition {
        KpiDefinition {
            id,
            kpi_number: kpi_number.to_string(),
            parent_kpi_id: None,
            name: name.to_string(),
            description: None,
            disclaimer: None,
            kind: KpiType::Global,
            progression_target: 1.0,
            metric: KpiMetric::Percentage,
            metric_description: None,
            min_value: None,
            max_value: None,
        }
    }

    fn mode(id: i64, name: &str, kind: TransportModeType, color: Option<&str>) -> TransportMode {
        TransportMode {
            id,
            name: name.to_string(),
            description: None,
            kind,
            color: color.map(str::to_string),
        }
    }

    fn result(id: i64, definition_id: i64, mode_id: i64, value: f64, date: &str) -> KpiResult {
        KpiResult {
            id,
            kpi_definition_id: definition_id,
            living_lab_id: 1,
            transport_mode_id: Some(mode_id),
            value,
            date: date.to_string(),
        }
    }

    fn pair(
        definition_id: i64,
        mode_id: i64,
        before: Option<KpiResult>,
        after: Option<KpiResult>,
    ) -> KpiResultBeforeAfter {
        KpiResultBeforeAfter {
            living_lab_id: 1,
            kpi_definition_id: definition_id,
            transport_mode_id: Some(mode_id),
            result_before: before,
            result_after: after,
        }
    }

    #[test]
    fn percentages_sum_from_raw_values() {
        let values = normalize_percentages(&[slice("bike", 1.0), slice("bus", 3.0)]);
        assert_eq!(values, vec![25.0, 75.0]);
    }

    #[test]
    fn zero_sum_becomes_equal_split() {
        let values = normalize_percentages(&[slice("a", 0.0), slice("b", 0.0)]);
        assert_eq!(values, vec![50.0, 50.0]);
    }

    #[test]
    fn empty_input_yields_no_slices() {
        assert!(normalize_percentages(&[]).is_empty());
    }

    #[test]
    fn modal_split_builds_labelled_datasets() {
        let definitions = vec![
            definition(10, "15.a", "Modal split (trips)"),
            definition(11, "3", "Air quality"),
        ];
        let modes = vec![
            mode(1, "E-bike", TransportModeType::Nsm, Some("#00ff00")),
            mode(2, "Bus", TransportModeType::PublicTransport, None),
        ];
        let paired = vec![
            pair(
                10,
                1,
                Some(result(1, 10, 1, 0.2, "2021-05-01")),
                Some(result(2, 10, 1, 0.35, "2023-05-01")),
            ),
            pair(10, 2, Some(result(3, 10, 2, 0.8, "2021-05-01")), None),
        ];

        let charts = modal_split(&definitions, &modes, &paired);
        assert_eq!(charts.len(), 1);

        let chart = &charts[0];
        assert_eq!(chart.kpi_name, "Modal split (trips)");
        assert_eq!(chart.before.label, "Before (2021)");
        assert_eq!(chart.after.label, "After (2023)");
        assert_eq!(chart.before.data.len(), 2);
        assert_eq!(chart.after.data.len(), 1);
        // mode without a color falls back to grey
        assert_eq!(chart.before.data[1].color, "#cccccc");
    }

    #[test]
    fn modal_split_is_empty_without_results() {
        let definitions = vec![definition(10, "15.a", "Modal split")];
        let modes = vec![mode(1, "E-bike", TransportModeType::Nsm, None)];
        assert!(modal_split(&definitions, &modes, &[]).is_empty());
    }

    fn populated(transport_modes: Vec<TransportMode>) -> PopulatedLab {
        PopulatedLab {
            lab: Lab {
                id: 7,
                name: "Ghent".to_string(),
                country: None,
                flag: None,
                description: None,
                area: None,
                radius: Some(2.5),
                population: None,
                country_code2: None,
                lat: Some("51.05".to_string()),
                lng: Some("3.72".to_string()),
                created_at: "2024-01-01".to_string(),
                updated_at: "2024-01-01".to_string(),
            },
            projects: Vec::new(),
            transport_modes,
            kpi_results: Vec::new(),
        }
    }

    #[test]
    fn nsm_filter_intersects_lab_modes() {
        let shared = mode(1, "E-scooter", TransportModeType::Nsm, None);
        let lab = populated(vec![shared.clone()]);
        let all = vec![
            shared,
            mode(2, "E-bike", TransportModeType::Nsm, None),
            mode(3, "Bus", TransportModeType::PublicTransport, None),
        ];

        let nsm = nsm_transport_modes(&lab, &all);
        assert_eq!(nsm.len(), 1);
        assert_eq!(nsm[0].name, "E-scooter");
    }

    #[test]
    fn map_marker_converts_radius_to_meters() {
        let marker = map_marker(&populated(Vec::new()));
        assert_eq!(marker.lat, 51.05);
        assert_eq!(marker.lng, 3.72);
        assert_eq!(marker.radius, Some(2500.0));
    }
}
