use anyhow::Result;
use healthstat_core::LoaderConfig;
use healthstat_service::LoadService;
use healthstat_storage::StorageBackend;
use std::path::Path;
use std::sync::Arc;

use crate::print_json;

pub(crate) async fn run_load(
    storage: Arc<StorageBackend>,
    path: &Path,
    replace: bool,
    batch_size: Option<usize>,
) -> Result<()> {
    let config = batch_size.map_or_else(LoaderConfig::from_env, LoaderConfig::new);
    let loader = LoadService::new(storage, config);
    let report = loader.load_path(path, replace).await?;
    print_json(&report)
}

pub(crate) async fn run_ensure_index(storage: Arc<StorageBackend>) -> Result<()> {
    let loader = LoadService::new(storage, LoaderConfig::default());
    let status = loader.ensure_index().await?;
    print_json(&serde_json::json!({ "index": status }))
}
