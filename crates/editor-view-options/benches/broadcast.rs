use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use editor_view_options::{
    CommandDispatcher, EditorId, EditorInstance, OptionSynchronizer, RenderSink, TOGGLE_WORD_WRAP,
};

#[derive(Default)]
struct Flags {
    wrap: bool,
    active_line: bool,
    gutter: bool,
}

impl RenderSink for Flags {
    fn set_wrap(&mut self, enabled: bool) {
        self.wrap = enabled;
    }

    fn set_active_line_highlight(&mut self, enabled: bool) {
        self.active_line = enabled;
    }

    fn set_gutter_visible(&mut self, visible: bool) {
        self.gutter = visible;
    }
}

fn populated(full_count: u64, inline_per_full: u64) -> OptionSynchronizer<Flags> {
    let mut sync = OptionSynchronizer::new();
    let mut next = 0u64;
    for _ in 0..full_count {
        let host = EditorId::new(next);
        next += 1;
        sync.on_create(EditorInstance::full(host, Flags::default()))
            .unwrap();
        for _ in 0..inline_per_full {
            sync.on_create(EditorInstance::inline(
                EditorId::new(next),
                host,
                Flags::default(),
            ))
            .unwrap();
            next += 1;
        }
    }
    sync
}

fn bench_toggle_broadcast(c: &mut Criterion) {
    let mut sync = populated(200, 4);
    c.bench_function("toggle_broadcast/1000_editors", |b| {
        b.iter(|| {
            black_box(sync.execute(black_box(TOGGLE_WORD_WRAP)).unwrap());
            let last = sync.sink_mut(EditorId::new(999)).unwrap();
            black_box((last.wrap, last.active_line, last.gutter));
        })
    });
}

fn bench_open_and_close(c: &mut Criterion) {
    c.bench_function("open_close/100_documents", |b| {
        b.iter_batched(
            || populated(0, 0),
            |mut sync| {
                for n in 0..100 {
                    let host = EditorId::new(n * 2);
                    sync.on_create(EditorInstance::full(host, Flags::default()))
                        .unwrap();
                    sync.on_create(EditorInstance::inline(
                        EditorId::new(n * 2 + 1),
                        host,
                        Flags::default(),
                    ))
                    .unwrap();
                }
                for n in 0..100 {
                    black_box(sync.on_dispose(EditorId::new(n * 2)).unwrap());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_toggle_broadcast, bench_open_and_close);
criterion_main!(benches);
