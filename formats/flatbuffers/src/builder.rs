use flatbuffers::{FlatBufferBuilder, TableFinishedWIPOffset, WIPOffset};

use bench_api::ServerMetrics;

use crate::slot;

/// Типизированный builder буфера `MetricsRequest`.
///
/// FlatBuffers строится с конца: буфер растёт в сторону младших адресов,
/// и каждый объект дописывается *перед* уже записанными. Отсюда порядок:
///
/// 1. строки записи (`server_id`, `timestamp`) — до открытия её таблицы,
///    пока таблица открыта, другие объекты добавлять нельзя;
/// 2. таблица записи; её offset запоминается в `records`;
/// 3. в `finish` — вектор offset'ов на таблицы, затем корневая таблица,
///    затем root offset в самом начале буфера.
///
/// Все offset'ы относительные: uoffset считается от позиции, где он
/// записан, до цели; soffset таблицы — от таблицы до её vtable.
/// Builder хранит их как `WIPOffset` (расстояние от конца буфера) и
/// пересчитывает при записи, поэтому рост буфера их не ломает.
pub struct MetricsRequestBuilder {
    fbb: FlatBufferBuilder<'static>,
    records: Vec<WIPOffset<TableFinishedWIPOffset>>,
}

impl MetricsRequestBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fbb: FlatBufferBuilder::with_capacity(capacity),
            records: Vec::new(),
        }
    }

    /// Дописать одну запись. Порядок вызовов `push` = порядок в векторе.
    pub fn push(&mut self, metrics: &ServerMetrics) {
        let server_id = self.fbb.create_string(&metrics.server_id);
        let timestamp = self.fbb.create_string(&metrics.timestamp);

        let table = self.fbb.start_table();
        // Scalars go in unconditionally: push_slot would drop 0.0 and -0.0 as "default".
        // Protobuf (proto3) has no such option, so only this format keeps the sign of -0.0.
        self.fbb.push_slot_always(slot::CPU_USAGE, metrics.cpu_usage);
        self.fbb.push_slot_always(slot::MEMORY_USAGE, metrics.memory_usage);
        self.fbb.push_slot_always(slot::DISK_USAGE, metrics.disk_usage);
        self.fbb.push_slot_always(slot::SERVER_ID, server_id);
        self.fbb.push_slot_always(slot::TIMESTAMP, timestamp);
        self.records.push(self.fbb.end_table(table));
    }

    /// Закрыть вектор и корневую таблицу, вернуть готовый буфер.
    pub fn finish(mut self) -> Vec<u8> {
        let metrics = self.fbb.create_vector(&self.records);

        let root = self.fbb.start_table();
        self.fbb.push_slot_always(slot::METRICS, metrics);
        let root = self.fbb.end_table(root);

        self.fbb.finish(root, None);
        self.fbb.finished_data().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_offset_points_inside_buffer() {
        let mut builder = MetricsRequestBuilder::with_capacity(16);
        builder.push(&ServerMetrics::new("srv0", 1.0, 2.0, 3.0, "t"));

        let bytes = builder.finish();
        let root = u32::from_le_bytes(bytes[..4].try_into().unwrap()) as usize;
        assert!(root >= 4 && root < bytes.len());
    }

    #[test]
    fn buffer_grows_past_initial_capacity() {
        let mut builder = MetricsRequestBuilder::with_capacity(8);
        for i in 0..100 {
            builder.push(&ServerMetrics::new(format!("srv{i}"), 1.0, 2.0, 3.0, "2024-01-01T00:00:00"));
        }
        let bytes = builder.finish();
        assert!(bytes.len() > 100 * 24);
    }
}
