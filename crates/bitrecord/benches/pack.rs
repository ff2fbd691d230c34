use std::sync::Arc;

use bitrecord::{record::Record, schema::Schema};
use criterion::{Criterion, criterion_group, criterion_main};

fn gen_schema(field_count: usize) -> Arc<Schema> {
    let width = (128 / field_count).min(64) as i64;
    let mut builder = Schema::builder("Bench");

    for i in 0..field_count {
        builder = builder.field(format!("f{}", i), width);
    }

    Arc::new(builder.build().unwrap())
}

fn gen_values(schema: &Schema) -> Vec<(String, u64)> {
    // Deterministic but non-trivial pattern
    schema
        .fields()
        .iter()
        .map(|field| (field.name.clone(), (field.index as u64 * 31) & field.max_value()))
        .collect()
}

fn bench_record(c: &mut Criterion) {
    for &field_count in &[1usize, 8, 32, 128] {
        let schema = gen_schema(field_count);
        let values = gen_values(&schema);

        c.bench_function(&format!("new_{}_fields", field_count), |b| {
            b.iter(|| {
                let _ = Record::new(&schema, values.iter().map(|(n, v)| (n, *v))).unwrap();
            })
        });

        let record = Record::new(&schema, values.iter().map(|(n, v)| (n, *v))).unwrap();

        c.bench_function(&format!("to_bytes_{}_fields", field_count), |b| {
            b.iter(|| {
                let _ = record.to_bytes();
            })
        });
    }
}

criterion_group!(benches, bench_record);
criterion_main!(benches);
