// benches/walk_benchmark.rs
use byteorder::{LittleEndian, WriteBytesExt};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tdms_dump::*;

const CHANNELS: u32 = 8;
const VALUES_PER_CHUNK: u64 = 100;

fn put_string(buf: &mut Vec<u8>, s: &str) {
    buf.write_u32::<LittleEndian>(s.len() as u32).unwrap();
    buf.extend_from_slice(s.as_bytes());
}

/// One segment: a fresh object list on the first, inherited indices after
fn segment(first: bool) -> Vec<u8> {
    let mut metadata = Vec::new();
    metadata.write_u32::<LittleEndian>(CHANNELS).unwrap();
    for channel in 0..CHANNELS {
        put_string(&mut metadata, &format!("/'bench'/'ch{}'", channel));
        if first {
            metadata.write_u32::<LittleEndian>(0x14).unwrap();
            metadata.write_u32::<LittleEndian>(DataType::DoubleFloat.code()).unwrap();
            metadata.write_u32::<LittleEndian>(1).unwrap();
            metadata.write_u64::<LittleEndian>(VALUES_PER_CHUNK).unwrap();
            metadata.write_u32::<LittleEndian>(1).unwrap();
            put_string(&mut metadata, "unit_string");
            metadata.write_u32::<LittleEndian>(DataType::String.code()).unwrap();
            put_string(&mut metadata, "V");
        } else {
            metadata.write_u32::<LittleEndian>(0).unwrap();
            metadata.write_u32::<LittleEndian>(0).unwrap();
        }
    }

    let raw_len = CHANNELS as u64 * VALUES_PER_CHUNK * 8;
    let mut toc = TocFlags::METADATA | TocFlags::RAW_DATA;
    if first {
        toc |= TocFlags::NEW_OBJ_LIST;
    }

    let mut bytes = SegmentHeader::TDMS_TAG.to_vec();
    bytes.write_u32::<LittleEndian>(toc).unwrap();
    bytes.write_u32::<LittleEndian>(SegmentHeader::VERSION).unwrap();
    bytes.write_u64::<LittleEndian>(metadata.len() as u64 + raw_len).unwrap();
    bytes.write_u64::<LittleEndian>(metadata.len() as u64).unwrap();
    bytes.extend_from_slice(&metadata);
    bytes.resize(bytes.len() + raw_len as usize, 0);
    bytes
}

fn sample_file(segments: usize) -> Vec<u8> {
    (0..segments).flat_map(|i| segment(i == 0)).collect()
}

/// Discards everything; measures decoding alone
struct NullSink;

impl StructureSink for NullSink {
    fn enter(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn record(&mut self, _name: &str, _value: Value) -> Result<()> {
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        Ok(())
    }
}

fn benchmark_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_segments");

    for segments in [10, 100, 1000].iter() {
        let bytes = sample_file(*segments);
        group.throughput(Throughput::Elements(*segments as u64));
        group.bench_with_input(BenchmarkId::from_parameter(segments), &bytes, |b, bytes| {
            b.iter(|| {
                let mut walker = SegmentWalker::new(SliceSource::new(bytes.as_slice()));
                let summary = walker.walk(&mut NullSink).unwrap();
                black_box(summary.segments.len())
            });
        });
    }

    group.finish();
}

fn benchmark_xml(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump_xml");

    for segments in [10, 100].iter() {
        let bytes = sample_file(*segments);
        group.throughput(Throughput::Elements(*segments as u64));
        group.bench_with_input(BenchmarkId::from_parameter(segments), &bytes, |b, bytes| {
            b.iter(|| {
                let mut sink = XmlSink::new(Vec::with_capacity(1 << 16)).unwrap();
                dump_structure(SliceSource::new(bytes.as_slice()), "bench.tdms", &mut sink).unwrap();
                black_box(sink.finish().unwrap().len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_walk, benchmark_xml);
criterion_main!(benches);
