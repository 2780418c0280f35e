//! Sync driver: fetches the upstream list and reconciles it record by record.

use std::sync::Arc;

use chrono::Utc;

use crate::application::services::reconciler::{ReconcileError, Reconciler};
use crate::domain::country_record::CountryRecord;
use crate::domain::country_source::CountrySource;
use crate::domain::repositories::{CountryRepository, RegionRepository, TopLevelDomainRepository};
use crate::domain::sync_report::{SyncEntry, SyncReport};
use crate::error::SyncError;

/// Runs a full sync against a [`CountrySource`].
///
/// Records are processed strictly in source order, one at a time, so later
/// records see regions and domains created by earlier ones. The first failing
/// record aborts the run; records before it stay committed.
pub struct SyncService<R, C, T>
where
    R: RegionRepository + ?Sized,
    C: CountryRepository + ?Sized,
    T: TopLevelDomainRepository + ?Sized,
{
    reconciler: Reconciler<R, C, T>,
}

impl<R, C, T> SyncService<R, C, T>
where
    R: RegionRepository + ?Sized,
    C: CountryRepository + ?Sized,
    T: TopLevelDomainRepository + ?Sized,
{
    /// Creates a new sync service.
    pub fn new(regions: Arc<R>, countries: Arc<C>, domains: Arc<T>) -> Self {
        Self {
            reconciler: Reconciler::new(regions, countries, domains),
        }
    }

    /// Fetches every record from `source` and reconciles them in order.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fetch`] if the source fails; nothing is written.
    /// Returns [`SyncError::MalformedRecord`] or [`SyncError::Store`] for the
    /// first record that cannot be reconciled.
    pub async fn sync<S>(&self, source: &S) -> Result<SyncReport, SyncError>
    where
        S: CountrySource + ?Sized,
    {
        tracing::info!(source = %source.describe(), "Fetching country data");
        let records = source.fetch().await?;
        tracing::info!(records = records.len(), "Fetched country data");

        self.apply(&records).await
    }

    /// Reconciles an already materialized list of records.
    ///
    /// # Errors
    ///
    /// See [`Self::sync`].
    pub async fn apply(&self, records: &[CountryRecord]) -> Result<SyncReport, SyncError> {
        let started_at = Utc::now();
        let mut entries = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let result = self
                .reconciler
                .reconcile(record)
                .await
                .map_err(|e| match e {
                    ReconcileError::MissingField(field) => {
                        SyncError::MalformedRecord { index, field }
                    }
                    ReconcileError::Store(source) => SyncError::Store { index, source },
                })
                .inspect_err(|e| {
                    tracing::error!(
                        error = %e,
                        processed = index,
                        "Sync aborted"
                    );
                })?;

            if result.region_created {
                metrics::counter!("countries_sync_regions_created_total").increment(1);
                entries.push(SyncEntry::region_created(result.region.name.clone()));
            }

            metrics::counter!(
                "countries_sync_records_total",
                "outcome" => result.outcome.as_str()
            )
            .increment(1);

            tracing::info!(country = %result.country.name, outcome = %result.outcome);
            entries.push(SyncEntry::country(result.country.name, result.outcome));
        }

        let report = SyncReport {
            entries,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            created = report.created(),
            updated = report.updated(),
            unchanged = report.unchanged(),
            regions_created = report.regions_created(),
            "Sync finished"
        );

        Ok(report)
    }
}
