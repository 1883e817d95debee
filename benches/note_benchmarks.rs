//! Performance benchmarks for the note store and tool dispatch

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quicknote::mcp::{JsonRpcHandler, NoteServer};
use quicknote::notes::{
    FileKeyValueStore, KeyValueNoteBackend, MemoryNoteBackend, NoteStore, SqliteNoteBackend,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// Create a file-backed store in a temporary directory
fn create_file_store() -> (NoteStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let backend = KeyValueNoteBackend::new(FileKeyValueStore::new(temp_dir.path()).unwrap());
    (NoteStore::new(Arc::new(backend)), temp_dir)
}

/// Create a memory store holding `count` notes
async fn create_populated_memory_store(count: usize) -> NoteStore {
    let store = NoteStore::new(Arc::new(MemoryNoteBackend::new()));
    for i in 0..count {
        let tags = if i % 3 == 0 {
            vec!["rust".to_string()]
        } else {
            vec!["javascript".to_string(), "todo".to_string()]
        };
        store
            .save_note(format!("Snippet {i}: fn example_{i}() {{}}"), tags)
            .await
            .unwrap();
    }
    store
}

/// Benchmark saving a note on each backend
fn bench_note_save(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("note_save_memory", |b| {
        let store = NoteStore::new(Arc::new(MemoryNoteBackend::new()));
        b.iter(|| {
            rt.block_on(async {
                let note = store
                    .save_note("const x = 1", vec!["javascript".to_string()])
                    .await
                    .unwrap();
                black_box(note);
            })
        })
    });

    c.bench_function("note_save_file", |b| {
        b.iter(|| {
            rt.block_on(async {
                let (store, _temp_dir) = create_file_store();
                let note = store
                    .save_note("const x = 1", vec!["javascript".to_string()])
                    .await
                    .unwrap();
                black_box(note);
            })
        })
    });

    c.bench_function("note_save_sqlite", |b| {
        let store = NoteStore::new(Arc::new(SqliteNoteBackend::open_in_memory().unwrap()));
        b.iter(|| {
            rt.block_on(async {
                let note = store
                    .save_note("const x = 1", vec!["javascript".to_string()])
                    .await
                    .unwrap();
                black_box(note);
            })
        })
    });
}

/// Benchmark searching a populated collection
fn bench_note_search(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = rt.block_on(create_populated_memory_store(500));

    c.bench_function("note_search_content", |b| {
        b.iter(|| {
            rt.block_on(async {
                let hits = store.search_notes("example_4").await;
                black_box(hits);
            })
        })
    });

    c.bench_function("note_search_tag", |b| {
        b.iter(|| {
            rt.block_on(async {
                let hits = store.get_notes_by_tag("RUST").await;
                black_box(hits);
            })
        })
    });
}

/// Benchmark a full JSON-RPC tool call
fn bench_jsonrpc_dispatch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = rt.block_on(create_populated_memory_store(100));
    let handler = JsonRpcHandler::new(NoteServer::new(Arc::new(store), "http://localhost:3000"));

    c.bench_function("jsonrpc_list_notes", |b| {
        b.iter(|| {
            rt.block_on(async {
                let reply = handler
                    .handle_value(json!({
                        "jsonrpc": "2.0",
                        "id": 1,
                        "method": "tools/call",
                        "params": {"name": "list_notes", "arguments": {"query": "todo"}}
                    }))
                    .await;
                black_box(reply);
            })
        })
    });
}

criterion_group!(
    benches,
    bench_note_save,
    bench_note_search,
    bench_jsonrpc_dispatch
);
criterion_main!(benches);
