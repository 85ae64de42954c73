use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use dernek_composer_engine::{
    CommandTable, EntityRecord, FieldCatalog, FieldKey, parse, preview_html, serialize,
};
use dernek_composer_engine::mention::scan;

fn generate_document(size: usize) -> String {
    let base = "Sayın [[B]]üyemiz[[/B]],\n[[SIZE=16]]Genel kurul[[/SIZE]] [[I]]duyurusu[[/I]] [[U]]ektedir.\n\
                [[TABLO:COLS=Ad|Soyad|Telefon # ROWS=Ahmet|Yılmaz|0555;Ayşe|Kaya|-]]\n[[ bozuk ]] @uye\n\n";
    base.repeat(size)
}

fn bench_markup(c: &mut Criterion) {
    let mut group = c.benchmark_group("markup");
    group.sample_size(20);

    let doc = generate_document(200);

    group.bench_function("parse", |b| {
        b.iter(|| std::hint::black_box(parse(std::hint::black_box(&doc))));
    });

    group.bench_function("preview_html", |b| {
        b.iter(|| std::hint::black_box(preview_html(std::hint::black_box(&doc))));
    });

    let commands = CommandTable::builtin();
    group.bench_function("scan_at_end", |b| {
        b.iter(|| std::hint::black_box(scan(&doc, std::hint::black_box(doc.len()), &commands)));
    });

    let catalog = FieldCatalog::default_members();
    let people: Vec<Arc<EntityRecord>> = (0..100)
        .map(|i| {
            Arc::new(
                EntityRecord::new(i.to_string())
                    .with(FieldKey::MemberNo, i.to_string())
                    .with(FieldKey::FirstName, "Mehmet")
                    .with(FieldKey::LastName, "Işık|Öz"),
            )
        })
        .collect();
    let fields = [FieldKey::MemberNo, FieldKey::FirstName, FieldKey::LastName];
    group.bench_function("serialize_100_rows", |b| {
        b.iter(|| std::hint::black_box(serialize(&people, &fields, &catalog)));
    });

    group.finish();
}

criterion_group!(benches, bench_markup);
criterion_main!(benches);
