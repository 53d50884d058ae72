use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use catalogx_products::{
    CsvExporter, ExportScope, Paginator, ProductRecord, category_facets, filter,
};

fn catalog(size: usize) -> Vec<ProductRecord> {
    (0..size)
        .map(|i| {
            ProductRecord::new(
                format!("p-{i}"),
                format!("Part {i}"),
                if i % 7 == 0 {
                    "Copper coil, heavy gauge".to_string()
                } else {
                    "Brass fitting".to_string()
                },
            )
            .with_sku(format!("SKU-{i:05}"))
            .with_categories([format!("group-{}", i % 25), "fittings".to_string()])
            .with_price(10.0 + i as f64)
            .with_stock((i % 50) as f64)
        })
        .collect()
}

fn bench_filter_and_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_and_page");

    for size in [100usize, 1_000, 10_000] {
        let records = catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            let pager = Paginator::default();
            b.iter(|| {
                let hits = filter(black_box(records), black_box("coil"));
                let page = pager.page(&hits, 1);
                black_box(page.items.len())
            });
        });
    }

    group.finish();
}

fn bench_facets(c: &mut Criterion) {
    let records = catalog(10_000);
    c.bench_function("category_facets_10k", |b| {
        b.iter(|| black_box(category_facets(black_box(&records))))
    });
}

fn bench_export(c: &mut Criterion) {
    let records = catalog(1_000);
    let exporter = CsvExporter::default();
    let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

    c.bench_function("csv_export_1k", |b| {
        b.iter(|| {
            exporter
                .export(black_box(&records), ExportScope::All, date)
                .map(|payload| payload.row_count)
        })
    });
}

criterion_group!(benches, bench_filter_and_page, bench_facets, bench_export);
criterion_main!(benches);
