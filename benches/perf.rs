use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use lineup_terminal::catalog::{Catalog, LineupRecord, Map, Side, UtilityType};
use lineup_terminal::details::DetailParams;
use lineup_terminal::selection::SelectionEngine;

fn synthetic_catalog(per_triple: usize) -> Catalog {
    let mut records = Vec::new();
    for map in Map::ALL {
        for side in Side::ALL {
            for utility_type in UtilityType::ALL {
                for n in 0..per_triple {
                    let id = format!("{map}-{side}-{utility_type}-{n}");
                    records.push(LineupRecord {
                        id: id.clone(),
                        map,
                        side,
                        utility_type,
                        name: format!("{utility_type} {n}"),
                        image_url: format!("https://example.com/{id}.png"),
                        video_url: format!("https://example.com/{id}"),
                    });
                }
            }
        }
    }
    Catalog::new(records).expect("unique synthetic ids")
}

fn bench_visible_lineups(c: &mut Criterion) {
    let catalog = synthetic_catalog(8);
    c.bench_function("visible_lineups_indexed", |b| {
        let mut engine = SelectionEngine::new(&catalog);
        engine.choose_map(Map::Inferno);
        engine.choose_side(Side::TR);
        engine.choose_utility_type(UtilityType::Molotov);
        b.iter(|| black_box(engine.visible_lineups().len()))
    });

    c.bench_function("visible_lineups_linear_scan", |b| {
        b.iter(|| {
            let hits = catalog
                .all_lineups()
                .iter()
                .filter(|r| r.matches(Map::Inferno, Side::TR, UtilityType::Molotov))
                .count();
            black_box(hits)
        })
    });
}

fn bench_selection_walk(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    c.bench_function("selection_walk_all_triples", |b| {
        b.iter(|| {
            let mut engine = SelectionEngine::new(catalog);
            let mut total = 0;
            for map in Map::ALL {
                engine.choose_map(map);
                for side in Side::ALL {
                    engine.choose_side(side);
                    for utility_type in UtilityType::ALL {
                        engine.choose_utility_type(utility_type);
                        total += engine.visible_lineups().len();
                    }
                }
            }
            black_box(total)
        })
    });
}

fn bench_deep_link(c: &mut Criterion) {
    let lineup = Catalog::builtin()
        .find("mirage-tr-flash-a-exec")
        .expect("known id");
    let link = DetailParams::from_record(lineup).to_deep_link();
    c.bench_function("deep_link_parse", |b| {
        b.iter(|| {
            let params = DetailParams::from_deep_link(black_box(&link)).unwrap();
            black_box(params.video_url.is_some())
        })
    });
}

criterion_group!(
    benches,
    bench_visible_lineups,
    bench_selection_walk,
    bench_deep_link
);
criterion_main!(benches);
