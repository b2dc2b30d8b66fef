use mobilab_database::{KpiResult, KpiResultInput, KpiResultRepository};
use sqlx::SqlitePool;

use super::error::ServiceError;

pub async fn upsert(pool: &SqlitePool, input: &KpiResultInput) -> Result<KpiResult, ServiceError> {
    validate(input)?;
    Ok(KpiResultRepository::new(pool.clone()).upsert(input).await?)
}

/// Returns `false` when no row with that id exists.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, ServiceError> {
    Ok(KpiResultRepository::new(pool.clone()).delete(id).await?)
}

/// All required fields are reported together rather than one at a time.
fn validate(input: &KpiResultInput) -> Result<(), ServiceError> {
    let mut missing = Vec::new();
    if input.kpi_definition_id.is_none() {
        missing.push("kpi_definition_id");
    }
    if input.living_lab_id.is_none() {
        missing.push("living_lab_id");
    }
    if input.value.is_none() {
        missing.push("value");
    }
    if input.date.as_deref().map_or(true, str::is_empty) {
        missing.push("date");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::bad_request(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_missing_fields_are_reported_at_once() {
        let err = validate(&KpiResultInput::default()).unwrap_err();
        let ServiceError::BadRequest(msg) = err else {
            panic!("expected bad request");
        };
        assert_eq!(
            msg,
            "Missing required fields: kpi_definition_id, living_lab_id, value, date"
        );
    }

    #[test]
    fn complete_payload_passes() {
        let input = KpiResultInput {
            kpi_definition_id: Some(1),
            living_lab_id: Some(1),
            value: Some(0.4),
            date: Some("2024-06-01".to_string()),
            ..Default::default()
        };
        assert!(validate(&input).is_ok());
    }
}
