//! Component A's public operation: `acquire` (§4.A).

use std::sync::Arc;

use chrono::{Duration, Utc};

use procure_core::repo::{OfferRepo, ProductRepo, ScraperRepo, SupplierRepo};
use procure_core::{JobId, ProcureError, ProcureResult, RunStatus, ScraperJobRecord, Supplier, SupplierOffer};

use crate::profile::default_sources;
use crate::source::{fetch, OfferCandidate};

const SUPPLIERS_PER_SKU_SOURCE: usize = 4;

/// The narrow set of repositories Component A depends on, bundled the way
/// `gat_batch::BatchRunnerConfig` bundles a job's dependencies rather than
/// threading four arguments through every call.
#[derive(Clone)]
pub struct OfferAcquisitionDeps {
    pub products: Arc<dyn ProductRepo>,
    pub suppliers: Arc<dyn SupplierRepo>,
    pub offers: Arc<dyn OfferRepo>,
    pub jobs: Arc<dyn ScraperRepo>,
}

/// Run a previously-created [`ScraperJobRecord`] to completion.
///
/// Per §4.A: unknown SKUs are skipped, a source failure for one SKU does
/// not halt the others, and surviving offers are committed as a whole only
/// if the job completes without an infrastructure-level error (commit per
/// job, rollback-on-fail).
pub fn acquire(deps: &OfferAcquisitionDeps, job_id: JobId, ttl_hours: i64) -> ProcureResult<ScraperJobRecord> {
    let mut job = deps
        .jobs
        .get_job(job_id)
        .ok_or_else(|| ProcureError::NotFound(format!("scraper job {job_id}")))?;

    job.status = job.status.transition(RunStatus::Running)?;
    deps.jobs.update_job(job.clone())?;

    let sources = if job.sources.is_empty() {
        default_sources()
    } else {
        job.sources.clone()
    };
    let ttl = Duration::hours(ttl_hours);
    let now = Utc::now();

    match collect_offers(deps, &job.skus, &sources, now, ttl) {
        Ok(collected) => {
            for offer in &collected {
                deps.offers.insert(offer.clone());
            }
            job.offers_collected = collected.len() as u32;
            job.status = job.status.transition(RunStatus::Done)?;
            job.completed_at = Some(Utc::now());
            job.error = None;
        }
        Err(err) => {
            tracing::warn!(job_id = %job_id, error = %err, "offer acquisition job failed, discarding pending offers");
            job.status = job.status.transition(RunStatus::Failed)?;
            job.error = Some(err.to_string());
            job.completed_at = Some(Utc::now());
            deps.jobs.update_job(job.clone())?;
            return Err(err);
        }
    }

    deps.jobs.update_job(job.clone())?;
    Ok(job)
}

/// Builds up the full set of offers to persist without writing any of them,
/// so a later infrastructure failure leaves the store untouched.
fn collect_offers(
    deps: &OfferAcquisitionDeps,
    skus: &[String],
    sources: &[String],
    now: chrono::DateTime<Utc>,
    ttl: Duration,
) -> ProcureResult<Vec<SupplierOffer>> {
    let mut pending = Vec::new();

    for sku in skus {
        let Some(product) = deps.products.by_sku(sku) else {
            tracing::debug!(sku, "unknown sku, skipping");
            continue;
        };

        for source in sources {
            let candidates = fetch(sku, source, SUPPLIERS_PER_SKU_SOURCE);
            for candidate in candidates {
                let supplier = resolve_supplier(deps.suppliers.as_ref(), &candidate);
                if deps.offers.fresh_offer_exists(supplier.id, product.id, now, ttl) {
                    continue;
                }
                pending.push(SupplierOffer {
                    id: procure_core::OfferId::new(),
                    supplier_id: supplier.id,
                    product_id: product.id,
                    price: candidate.price,
                    currency: candidate.currency,
                    moq: candidate.moq,
                    lead_time_days: candidate.lead_time_days,
                    capacity_units: candidate.capacity_units,
                    captured_at: now,
                    source: source.clone(),
                    confidence: candidate.confidence,
                });
            }
        }
    }

    Ok(pending)
}

fn resolve_supplier(suppliers: &dyn SupplierRepo, candidate: &OfferCandidate) -> Supplier {
    if let Some(existing) = suppliers.by_name(&candidate.supplier_name) {
        return existing;
    }
    let supplier = Supplier::new(candidate.supplier_name.clone(), candidate.rating);
    suppliers.insert(supplier.clone());
    supplier
}
