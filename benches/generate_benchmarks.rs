//! Performance benchmarks for template specialization.
//!
//! - Line substitution on its own
//! - Parsing and placeholder validation of a template
//! - The full pipeline (without import normalization) for growing set counts
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- "pipeline"
//! ```

use bumpalo::Bump;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use genny::{Options, parse_type_sets, required_placeholders, specialize, substitute_line};
use genny_parser::Parser;
use std::hint::black_box;
use std::io::Cursor;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Print the total time spent in each top-level scope.
#[cfg(feature = "profile-with-puffin")]
fn print_profiling_stats() {
    use puffin::Reader;
    use std::collections::HashMap;

    let Some(frame_view) = FRAME_VIEW.get() else {
        return;
    };
    let view = frame_view.lock();
    let scope_collection = view.scope_collection();

    let mut scope_timings: HashMap<String, i64> = HashMap::new();
    for frame in view.recent_frames() {
        let Ok(unpacked) = frame.unpacked() else {
            continue;
        };
        for (_thread_info, stream_info) in unpacked.thread_streams.iter() {
            let Ok(scopes) = Reader::from_start(&stream_info.stream).read_top_scopes() else {
                continue;
            };
            for scope in scopes {
                if let Some(details) = scope_collection.fetch_by_id(&scope.id) {
                    *scope_timings.entry(details.name().to_string()).or_insert(0) +=
                        scope.record.duration_ns;
                }
            }
        }
    }

    let mut entries: Vec<_> = scope_timings.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    println!("\n=== Profiling Summary ===");
    for (name, ns) in entries {
        println!(
            "  {:30} {:>10.2?}",
            name,
            std::time::Duration::from_nanos(ns as u64)
        );
    }
}

#[cfg(not(feature = "profile-with-puffin"))]
fn print_profiling_stats() {}

const QUEUE: &str = include_str!("../tests/fixtures/queue.go");
const MAPS: &str = include_str!("../tests/fixtures/maps.go");

fn substitution_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitute");

    let line = "func (m *KeyTypeValueTypeMap) Get(key KeyType) (ValueType, bool) { // KeyType lookup";
    group.throughput(Throughput::Bytes(line.len() as u64));
    group.bench_function("method_line", |b| {
        b.iter(|| black_box(substitute_line(black_box(line), "KeyType", "*pkg.Thing")))
    });

    group.finish();
}

fn parse_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, source) in [("queue", QUEUE), ("maps", MAPS)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let arena = Bump::new();
                let file = Parser::parse(black_box(source), &arena).unwrap();
                black_box(required_placeholders(&file).len())
            })
        });
    }

    group.finish();
}

fn pipeline_benchmarks(c: &mut Criterion) {
    setup_profiler();

    let mut group = c.benchmark_group("pipeline");
    let options = Options::new("maps.go");

    for type_args in [
        "KeyType=string ValueType=int",
        "KeyType=string,int ValueType=NUMBERS",
        "KeyType=BUILTINS ValueType=NUMBERS",
    ] {
        let type_sets = parse_type_sets(type_args).unwrap();
        group.throughput(Throughput::Elements(type_sets.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("maps", type_sets.len()),
            &type_sets,
            |b, type_sets| {
                b.iter(|| {
                    let output =
                        specialize(&options, &mut Cursor::new(black_box(MAPS)), type_sets).unwrap();
                    end_profiling_frame();
                    black_box(output.len())
                })
            },
        );
    }

    group.finish();
    print_profiling_stats();
}

criterion_group!(
    benches,
    substitution_benchmarks,
    parse_benchmarks,
    pipeline_benchmarks
);
criterion_main!(benches);
