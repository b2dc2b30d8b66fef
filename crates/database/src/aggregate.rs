//! Before/after folding of KPI results.
//!
//! A lab accumulates measurements over time for each (KPI definition,
//! transport mode) key. The dashboard only shows the earliest and latest
//! of each series, so the populated lab view folds the raw rows here.

use chrono::{DateTime, NaiveDate};

use crate::entities::{KpiResult, KpiResultBeforeAfter};

/// Group a lab's KPI result rows by (kpi_definition_id, transport_mode_id)
/// and reduce each group to its earliest (`result_before`) and latest
/// (`result_after`) measurement. Groups keep the order in which their key
/// first appears in the date-sorted input; a singleton group reports
/// `result_after = None`.
pub fn pair_results(results: &[KpiResult]) -> Vec<KpiResultBeforeAfter> {
    let mut sorted: Vec<&KpiResult> = results.iter().collect();
    sorted.sort_by_key(|r| date_sort_key(&r.date));

    let mut keys: Vec<(i64, Option<i64>)> = Vec::new();
    for result in &sorted {
        let key = (result.kpi_definition_id, result.transport_mode_id);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    keys.into_iter()
        .map(|(kpi_definition_id, transport_mode_id)| {
            let group: Vec<&&KpiResult> = sorted
                .iter()
                .filter(|r| {
                    r.kpi_definition_id == kpi_definition_id
                        && r.transport_mode_id == transport_mode_id
                })
                .collect();

            let result_before = group.first().map(|r| (**r).clone());
            let result_after = if group.len() > 1 {
                group.last().map(|r| (**r).clone())
            } else {
                None
            };

            KpiResultBeforeAfter {
                living_lab_id: group
                    .first()
                    .map(|r| r.living_lab_id)
                    .unwrap_or_default(),
                kpi_definition_id,
                transport_mode_id,
                result_before,
                result_after,
            }
        })
        .collect()
}

/// Chronological sort key for stored result dates. Dates are written as
/// RFC 3339 timestamps or plain `YYYY-MM-DD`; anything unparseable sorts
/// first, ties broken by the raw string.
fn date_sort_key(date: &str) -> (i64, String) {
    let timestamp = DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|dt| dt.timestamp())
        .or_else(|| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().timestamp())
        })
        .unwrap_or(i64::MIN);
    (timestamp, date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: i64, kpi: i64, mode: Option<i64>, date: &str) -> KpiResult {
        KpiResult {
            id,
            kpi_definition_id: kpi,
            living_lab_id: 1,
            transport_mode_id: mode,
            value: id as f64,
            date: date.to_string(),
        }
    }

    #[test]
    fn before_has_min_date_and_after_has_max_date() {
        let rows = vec![
            result(1, 10, Some(5), "2022-06-01"),
            result(2, 10, Some(5), "2019-01-01"),
            result(3, 10, Some(5), "2024-03-15"),
        ];

        let pairs = pair_results(&rows);
        assert_eq!(pairs.len(), 1);
        let pair = &pairs[0];
        assert_eq!(pair.result_before.as_ref().unwrap().date, "2019-01-01");
        assert_eq!(pair.result_after.as_ref().unwrap().date, "2024-03-15");
    }

    #[test]
    fn singleton_group_has_no_after() {
        let rows = vec![result(1, 10, None, "2021-05-05")];

        let pairs = pair_results(&rows);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].result_before.as_ref().unwrap().id, 1);
        assert!(pairs[0].result_after.is_none());
    }

    #[test]
    fn groups_split_on_kpi_and_transport_mode() {
        let rows = vec![
            result(1, 10, Some(1), "2020-01-01"),
            result(2, 10, Some(2), "2020-01-01"),
            result(3, 10, None, "2020-01-01"),
            result(4, 11, Some(1), "2020-01-01"),
            result(5, 10, Some(1), "2023-01-01"),
        ];

        let pairs = pair_results(&rows);
        assert_eq!(pairs.len(), 4);

        let with_mode_one = pairs
            .iter()
            .find(|p| p.kpi_definition_id == 10 && p.transport_mode_id == Some(1))
            .unwrap();
        assert_eq!(with_mode_one.result_before.as_ref().unwrap().id, 1);
        assert_eq!(with_mode_one.result_after.as_ref().unwrap().id, 5);

        let without_mode = pairs
            .iter()
            .find(|p| p.kpi_definition_id == 10 && p.transport_mode_id.is_none())
            .unwrap();
        assert!(without_mode.result_after.is_none());
    }

    #[test]
    fn mixed_date_formats_sort_chronologically() {
        let rows = vec![
            result(1, 7, None, "2023-01-02T10:00:00+00:00"),
            result(2, 7, None, "2021-11-30"),
        ];

        let pairs = pair_results(&rows);
        assert_eq!(pairs[0].result_before.as_ref().unwrap().id, 2);
        assert_eq!(pairs[0].result_after.as_ref().unwrap().id, 1);
    }

    #[test]
    fn unparseable_dates_sort_first() {
        let rows = vec![
            result(1, 7, None, "2022-06-01"),
            result(2, 7, None, "sometime in spring"),
        ];

        let pairs = pair_results(&rows);
        assert_eq!(pairs[0].result_before.as_ref().unwrap().id, 2);
        assert_eq!(pairs[0].result_after.as_ref().unwrap().id, 1);
    }

    #[test]
    fn empty_input_yields_no_pairs() {
        assert!(pair_results(&[]).is_empty());
    }
}
