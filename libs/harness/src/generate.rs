use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bench_api::{Batch, ServerMetrics};

/// Формат timestamp: локальное время с микросекундами.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Генератор синтетических метрик.
///
/// `seed = Some(_)` делает значения gauges воспроизводимыми;
/// `None` — seed из энтропии ОС. Timestamp всегда текущий.
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Batch из `count` записей `srv0..srv{count-1}`, gauges в `[0, 100)`.
    pub fn generate(&mut self, count: usize) -> Batch {
        (0..count)
            .map(|i| {
                ServerMetrics::new(
                    format!("srv{i}"),
                    self.rng.gen_range(0.0..100.0),
                    self.rng.gen_range(0.0..100.0),
                    self.rng.gen_range(0.0..100.0),
                    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
                )
            })
            .collect()
    }
}
