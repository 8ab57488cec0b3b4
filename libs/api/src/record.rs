use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════
//  Record Model
// ════════════════════════════════════════════════════════════════

/// Снимок метрик одного сервера.
///
/// Порядок полей совпадает с порядком на wire во всех трёх форматах:
/// `server_id, cpu_usage, memory_usage, disk_usage, timestamp`.
/// Диапазон gauge-значений не ограничивается — генератор выдаёт [0, 100),
/// но кодеки не должны на это полагаться.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerMetrics {
    /// Идентификатор сервера (уникален в пределах batch по построению).
    pub server_id: String,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    /// ISO-8601 метка времени. Для кодеков — непрозрачная строка.
    pub timestamp: String,
}

impl ServerMetrics {
    pub fn new(
        server_id: impl Into<String>,
        cpu_usage: f64,
        memory_usage: f64,
        disk_usage: f64,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            server_id: server_id.into(),
            cpu_usage,
            memory_usage,
            disk_usage,
            timestamp: timestamp.into(),
        }
    }
}

/// Упорядоченная последовательность записей одного прогона.
///
/// Порядок важен для проверки round-trip, но не несёт доменного смысла.
pub type Batch = Vec<ServerMetrics>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        let a = ServerMetrics::new("srv0", 10.5, 20.0, 30.25, "2024-01-01T00:00:00");
        let mut b = a.clone();
        assert_eq!(a, b);

        b.disk_usage = 30.26;
        assert_ne!(a, b);
    }

    #[test]
    fn json_field_names_follow_wire_order() {
        let m = ServerMetrics::new("srv1", 1.0, 2.0, 3.0, "ts");
        let s = serde_json::to_string(&m).unwrap();
        assert_eq!(
            s,
            r#"{"server_id":"srv1","cpu_usage":1.0,"memory_usage":2.0,"disk_usage":3.0,"timestamp":"ts"}"#
        );
    }
}
