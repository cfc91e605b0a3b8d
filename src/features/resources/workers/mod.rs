mod enrichment_worker;

pub use enrichment_worker::{BackgroundEnrichment, EnrichmentSink};
