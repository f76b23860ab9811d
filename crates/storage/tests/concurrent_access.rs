#![cfg(feature = "sqlite")]
#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;

use healthstat_core::{Observation, ObservationFilter};
use healthstat_storage::Storage;
use healthstat_storage::traits::{AggregateStore, ObservationStore};
use tempfile::tempdir;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reads_during_batched_writes() {
    let dir = tempdir().unwrap();
    let storage = Arc::new(Storage::new(&dir.path().join("test.db")).unwrap());

    let writer = {
        let storage = Arc::clone(&storage);
        tokio::spawn(async move {
            for batch in 0..20 {
                let rows: Vec<Observation> = (0..50)
                    .map(|i| {
                        Observation::new("cancer", "prevalence", 2000 + batch)
                            .with_value(Some(f64::from(i)))
                    })
                    .collect();
                ObservationStore::insert_batch(storage.as_ref(), &rows).await.unwrap();
            }
        })
    };

    let mut readers = vec![];
    for _ in 0..4 {
        let storage = Arc::clone(&storage);
        readers.push(tokio::spawn(async move {
            for _ in 0..10 {
                let filter = ObservationFilter::pair("cancer", "prevalence");
                let stats = AggregateStore::aggregate(storage.as_ref(), &filter).await.unwrap();
                // Batches commit atomically, so readers only ever see whole batches.
                assert_eq!(stats.count % 50, 0);
            }
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }

    let all = ObservationStore::select(storage.as_ref(), &ObservationFilter::new(), None)
        .await
        .unwrap();
    assert_eq!(all.len(), 1000);
}
