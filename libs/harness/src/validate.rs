use bench_api::ServerMetrics;

use crate::error::BenchError;

/// Проверка batch перед кодированием.
///
/// Пустой batch, пустые `server_id`/`timestamp` и нефинитные gauges
/// отклоняются: JSON не представляет NaN/inf, а NaN ломает сравнение
/// при проверке эквивалентности форматов.
pub fn validate_batch(batch: &[ServerMetrics]) -> Result<(), BenchError> {
    if batch.is_empty() {
        return Err(BenchError::Validation("batch is empty".into()));
    }
    for (i, m) in batch.iter().enumerate() {
        if m.server_id.is_empty() {
            return Err(BenchError::Validation(format!("record {i}: empty server_id")));
        }
        if m.timestamp.is_empty() {
            return Err(BenchError::Validation(format!("record {i} ({}): empty timestamp", m.server_id)));
        }
        for (name, value) in [
            ("cpu_usage", m.cpu_usage),
            ("memory_usage", m.memory_usage),
            ("disk_usage", m.disk_usage),
        ] {
            if !value.is_finite() {
                return Err(BenchError::Validation(format!(
                    "record {i} ({}): {name} is {value}",
                    m.server_id
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn record() -> ServerMetrics {
        ServerMetrics::new("srv0", 1.0, 2.0, 3.0, "2024-01-01T00:00:00")
    }

    #[test]
    fn accepts_well_formed() {
        assert!(validate_batch(&[record()]).is_ok());
    }

    #[test]
    fn rejects_empty_batch() {
        let err = validate_batch(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn rejects_missing_identity() {
        let mut m = record();
        m.server_id.clear();
        assert!(validate_batch(&[m]).is_err());

        let mut m = record();
        m.timestamp.clear();
        assert!(validate_batch(&[m]).is_err());
    }

    #[test]
    fn rejects_non_finite_gauges() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut m = record();
            m.memory_usage = bad;
            let err = validate_batch(&[record(), m]).unwrap_err().to_string();
            assert!(err.contains("record 1"), "{err}");
            assert!(err.contains("memory_usage"), "{err}");
        }
    }

    #[test]
    fn out_of_range_values_are_allowed() {
        let mut m = record();
        m.cpu_usage = -5.0;
        m.disk_usage = 1e300;
        assert!(validate_batch(&[m]).is_ok());
    }
}
