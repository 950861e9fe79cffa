//! Dashboard statistics aggregation
//!
//! Counts come from two independent tables (resources and gallery images).
//! Per-tenant and per-month series are summed across both sources; months are
//! keyed by [`YearMonth`] and only rendered as labels in the final output.

use super::service::{store_error, Service};
use crate::contract::{
    ActivityPoint, Category, DatabaseStatus, MonthlyCount, NamedCount, PortalError,
    SessionContext, StatisticsCharts, StatisticsSnapshot, SystemHealth, TenantScope,
    UploadCounts, YearMonth,
};
use chrono::{DateTime, Months, Utc};
use std::collections::{BTreeMap, HashMap};

/// Earliest creation time included in the activity chart
pub fn activity_window_start(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Count instants per calendar month, oldest month first
pub fn bucket_by_month<I>(instants: I) -> Vec<MonthlyCount>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut buckets: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for instant in instants {
        *buckets.entry(YearMonth::of(instant)).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

/// Sum two monthly series and emit them chronologically with display labels
pub fn merge_activity(first: &[MonthlyCount], second: &[MonthlyCount]) -> Vec<ActivityPoint> {
    let mut merged: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for entry in first.iter().chain(second) {
        *merged.entry(entry.month).or_default() += entry.count;
    }
    merged
        .into_iter()
        .map(|(month, value)| ActivityPoint {
            name: month.label().to_string(),
            date: month.start(),
            value,
        })
        .collect()
}

/// Sum per-tenant counts from both sources, dropping tenants with no rows
pub fn merge_by_tenant(
    first: &[(TenantScope, u64)],
    second: &[(TenantScope, u64)],
) -> Vec<NamedCount> {
    let mut totals: HashMap<TenantScope, u64> =
        TenantScope::ALL.into_iter().map(|t| (t, 0)).collect();
    for (tenant, count) in first.iter().chain(second) {
        *totals.entry(*tenant).or_default() += count;
    }
    TenantScope::ALL
        .into_iter()
        .filter_map(|tenant| {
            let value = totals.get(&tenant).copied().unwrap_or(0);
            (value > 0).then(|| NamedCount {
                name: tenant.as_str().to_string(),
                value,
            })
        })
        .collect()
}

/// Category counts in declaration order; absent categories stay absent
pub fn category_counts(counts: &[(Category, u64)]) -> Vec<NamedCount> {
    let mut sorted = counts.to_vec();
    sorted.sort_by_key(|(category, _)| *category);
    sorted
        .into_iter()
        .map(|(category, value)| NamedCount {
            name: category.as_str().to_string(),
            value,
        })
        .collect()
}

impl Service {
    /// Build the dashboard snapshot; any valid session sees the global report
    pub async fn get_statistics(
        &self,
        ctx: &SessionContext,
    ) -> Result<StatisticsSnapshot, PortalError> {
        ctx.require()?;
        let repo = &self.stats_repo;

        let (resources, gallery) = tokio::try_join!(repo.count_resources(), repo.count_images())
            .map_err(store_error("count_uploads"))?;

        let by_category = repo
            .resources_by_category()
            .await
            .map_err(store_error("resources_by_category"))?;

        let (resources_by_tenant, images_by_tenant) =
            tokio::try_join!(repo.resources_by_tenant(), repo.images_by_tenant())
                .map_err(store_error("uploads_by_tenant"))?;

        let since = activity_window_start(Utc::now(), self.activity_window_months);
        let (resource_activity, image_activity) =
            tokio::try_join!(repo.resource_activity(since), repo.image_activity(since))
                .map_err(store_error("activity"))?;

        let health = self.check_health().await;

        Ok(StatisticsSnapshot {
            counts: UploadCounts {
                resources,
                gallery,
                total_uploads: resources + gallery,
            },
            charts: StatisticsCharts {
                by_category: category_counts(&by_category),
                by_country: merge_by_tenant(&resources_by_tenant, &images_by_tenant),
                activity: merge_activity(&resource_activity, &image_activity),
            },
            health,
        })
    }

    /// Probe the store; failures are logged and reported as `Error`, never propagated
    async fn check_health(&self) -> SystemHealth {
        let repo = &self.stats_repo;
        let probe = async {
            repo.ping().await?;
            let (last_resource, last_image) =
                tokio::try_join!(repo.latest_resource_at(), repo.latest_image_at())?;
            let epoch = DateTime::UNIX_EPOCH;
            anyhow::Ok(last_resource.unwrap_or(epoch).max(last_image.unwrap_or(epoch)))
        };

        let (database, last_activity) = match probe.await {
            Ok(last) => (DatabaseStatus::Connected, Some(last)),
            Err(e) => {
                tracing::error!(error = ?e, "database health check failed");
                (DatabaseStatus::Error, None)
            }
        };

        SystemHealth {
            database,
            last_activity,
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "Operational".to_string(),
        }
    }
}
