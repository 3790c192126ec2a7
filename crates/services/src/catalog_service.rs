use estude_core::model::{Catalog, CardRow};

/// Builds the session catalog from the external feed.
///
/// Malformed rows are dropped, not fatal; the count of rejects is logged so a
/// broken feed is visible without failing the sync.
#[must_use]
pub fn ingest_catalog(rows: impl IntoIterator<Item = CardRow>) -> Catalog {
    let ingest = Catalog::from_rows(rows);
    if ingest.skipped > 0 {
        log::warn!("catalog ingest skipped {} malformed rows", ingest.skipped);
    }
    log::debug!("catalog loaded with {} cards", ingest.catalog.len());
    ingest.catalog
}
