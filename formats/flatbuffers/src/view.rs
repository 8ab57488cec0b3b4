//! Безопасный reader FlatBuffers wire layout без сгенерированного кода.
//!
//! Каждое чтение проверяет границы буфера, поэтому повреждённый вход
//! даёт `CodecError`, а не panic или чтение за пределами slice.

use bench_api::{Batch, CodecError, DataFormat, IntoBatch, ServerMetrics};
use flatbuffers::VOffsetT;

use crate::slot;

// ════════════════════════════════════════════════════════════════
//  Primitive reads
// ════════════════════════════════════════════════════════════════

fn malformed(detail: impl std::fmt::Display) -> CodecError {
    CodecError::decode(DataFormat::FlatBuffers, detail)
}

fn read_bytes<const N: usize>(buf: &[u8], pos: usize) -> Result<[u8; N], CodecError> {
    pos.checked_add(N)
        .and_then(|end| buf.get(pos..end))
        .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
        .ok_or_else(|| malformed(format!("read of {N} bytes at {pos} exceeds buffer of {}", buf.len())))
}

fn read_u16(buf: &[u8], pos: usize) -> Result<u16, CodecError> {
    read_bytes(buf, pos).map(u16::from_le_bytes)
}

fn read_u32(buf: &[u8], pos: usize) -> Result<u32, CodecError> {
    read_bytes(buf, pos).map(u32::from_le_bytes)
}

fn read_i32(buf: &[u8], pos: usize) -> Result<i32, CodecError> {
    read_bytes(buf, pos).map(i32::from_le_bytes)
}

fn read_f64(buf: &[u8], pos: usize) -> Result<f64, CodecError> {
    read_bytes(buf, pos).map(f64::from_le_bytes)
}

/// Перейти по uoffset, записанному в `pos` (offset считается от `pos`).
fn follow(buf: &[u8], pos: usize) -> Result<usize, CodecError> {
    let offset = read_u32(buf, pos)? as usize;
    pos.checked_add(offset)
        .filter(|target| *target < buf.len())
        .ok_or_else(|| malformed(format!("offset at {pos} points outside buffer")))
}

fn read_str(buf: &[u8], pos: usize) -> Result<&str, CodecError> {
    let len = read_u32(buf, pos)? as usize;
    let bytes = pos
        .checked_add(4)
        .and_then(|start| Some(start..start.checked_add(len)?))
        .and_then(|range| buf.get(range))
        .ok_or_else(|| malformed(format!("string at {pos} of length {len} exceeds buffer")))?;
    std::str::from_utf8(bytes).map_err(|e| malformed(format!("string at {pos}: {e}")))
}

// ════════════════════════════════════════════════════════════════
//  Table
// ════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
struct Table<'a> {
    buf: &'a [u8],
    pos: usize,
    vtable: usize,
    vtable_len: usize,
    table_len: usize,
}

impl<'a> Table<'a> {
    fn at(buf: &'a [u8], pos: usize) -> Result<Self, CodecError> {
        // soffset: vtable = table - soffset, vtable may sit on either side
        let soffset = read_i32(buf, pos)?;
        let vtable = i64::try_from(pos)
            .ok()
            .map(|pos| pos - i64::from(soffset))
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| malformed(format!("table at {pos} has vtable outside buffer")))?;

        let vtable_len = read_u16(buf, vtable)? as usize;
        let table_len = read_u16(buf, vtable + 2)? as usize;
        if vtable_len < 4 || vtable_len % 2 != 0 || vtable + vtable_len > buf.len() {
            return Err(malformed(format!("vtable at {vtable} has bad length {vtable_len}")));
        }
        if table_len < 4 || pos + table_len > buf.len() {
            return Err(malformed(format!("table at {pos} has bad length {table_len}")));
        }

        Ok(Self { buf, pos, vtable, vtable_len, table_len })
    }

    /// Абсолютная позиция поля; `None` — поле не записано.
    fn field(&self, slot: VOffsetT, size: usize) -> Result<Option<usize>, CodecError> {
        let slot = slot as usize;
        if slot + 2 > self.vtable_len {
            return Ok(None);
        }
        let offset = read_u16(self.buf, self.vtable + slot)? as usize;
        if offset == 0 {
            return Ok(None);
        }
        if offset < 4 || offset + size > self.table_len {
            return Err(malformed(format!(
                "field slot {slot} of table at {} overruns table",
                self.pos
            )));
        }
        Ok(Some(self.pos + offset))
    }

    /// Отсутствующий double читается как default схемы (0.0).
    fn f64_field(&self, slot: VOffsetT) -> Result<f64, CodecError> {
        match self.field(slot, 8)? {
            Some(pos) => read_f64(self.buf, pos),
            None => Ok(0.0),
        }
    }

    fn str_field(&self, slot: VOffsetT, name: &str) -> Result<&'a str, CodecError> {
        let pos = self
            .field(slot, 4)?
            .ok_or_else(|| malformed(format!("missing required field '{name}'")))?;
        read_str(self.buf, follow(self.buf, pos)?)
    }
}

// ════════════════════════════════════════════════════════════════
//  Views
// ════════════════════════════════════════════════════════════════

/// Корневой `MetricsRequest`, прочитанный поверх исходного буфера.
#[derive(Debug, Clone, Copy)]
pub struct MetricsRequestView<'a> {
    table: Table<'a>,
}

impl<'a> MetricsRequestView<'a> {
    /// Проверить root offset и vtable корня. Записи не трогаются.
    pub fn root(buf: &'a [u8]) -> Result<Self, CodecError> {
        let root = read_u32(buf, 0)? as usize;
        Ok(Self { table: Table::at(buf, root)? })
    }

    pub fn metrics(&self) -> Result<MetricsVector<'a>, CodecError> {
        let buf = self.table.buf;
        let Some(field) = self.table.field(slot::METRICS, 4)? else {
            return Ok(MetricsVector { buf, start: 0, len: 0 });
        };

        let pos = follow(buf, field)?;
        let len = read_u32(buf, pos)? as usize;
        let start = pos + 4;
        let fits = len
            .checked_mul(4)
            .and_then(|bytes| start.checked_add(bytes))
            .is_some_and(|end| end <= buf.len());
        if !fits {
            return Err(malformed(format!("vector at {pos} of {len} elements exceeds buffer")));
        }
        Ok(MetricsVector { buf, start, len })
    }
}

impl IntoBatch for MetricsRequestView<'_> {
    fn into_batch(self) -> Result<Batch, CodecError> {
        self.metrics()?.iter().map(|view| view?.to_record()).collect()
    }
}

/// Вектор offset'ов на таблицы `ServerMetrics`.
#[derive(Debug, Clone, Copy)]
pub struct MetricsVector<'a> {
    buf: &'a [u8],
    start: usize,
    len: usize,
}

impl<'a> MetricsVector<'a> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Result<ServerMetricsView<'a>, CodecError> {
        if index >= self.len {
            return Err(malformed(format!("index {index} out of {} records", self.len)));
        }
        let pos = follow(self.buf, self.start + index * 4)?;
        Ok(ServerMetricsView { table: Table::at(self.buf, pos)? })
    }

    pub fn iter(self) -> impl Iterator<Item = Result<ServerMetricsView<'a>, CodecError>> {
        (0..self.len).map(move |index| self.get(index))
    }
}

/// Одна запись; каждый accessor читает поле из буфера на месте.
#[derive(Debug, Clone, Copy)]
pub struct ServerMetricsView<'a> {
    table: Table<'a>,
}

impl<'a> ServerMetricsView<'a> {
    pub fn server_id(&self) -> Result<&'a str, CodecError> {
        self.table.str_field(slot::SERVER_ID, "server_id")
    }

    pub fn cpu_usage(&self) -> Result<f64, CodecError> {
        self.table.f64_field(slot::CPU_USAGE)
    }

    pub fn memory_usage(&self) -> Result<f64, CodecError> {
        self.table.f64_field(slot::MEMORY_USAGE)
    }

    pub fn disk_usage(&self) -> Result<f64, CodecError> {
        self.table.f64_field(slot::DISK_USAGE)
    }

    pub fn timestamp(&self) -> Result<&'a str, CodecError> {
        self.table.str_field(slot::TIMESTAMP, "timestamp")
    }

    pub fn to_record(&self) -> Result<ServerMetrics, CodecError> {
        Ok(ServerMetrics::new(
            self.server_id()?,
            self.cpu_usage()?,
            self.memory_usage()?,
            self.disk_usage()?,
            self.timestamp()?,
        ))
    }
}
