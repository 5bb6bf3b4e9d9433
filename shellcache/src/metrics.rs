//! Metrics declaration and initialization.

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    // Cache status metrics

    /// Track number of cache hit events.
    pub static ref CACHE_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "shellcache_cache_hit_total",
            "Total number of cache hit events."
        );
        "shellcache_cache_hit_total"
    };
    /// Track number of cache miss events.
    pub static ref CACHE_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "shellcache_cache_miss_total",
            "Total number of cache miss events."
        );
        "shellcache_cache_miss_total"
    };
    /// Track number of bypassed requests.
    pub static ref BYPASS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "shellcache_bypass_total",
            "Total number of requests passed straight to the network."
        );
        "shellcache_bypass_total"
    };

    // Refresh metrics

    /// Track number of background refreshes that stored a fresh response.
    pub static ref REFRESH_COMPLETED_COUNTER: &'static str = {
        metrics::describe_counter!(
            "shellcache_refresh_completed_total",
            "Total number of background refreshes that stored a fresh response."
        );
        "shellcache_refresh_completed_total"
    };
    /// Track number of background refreshes that failed.
    pub static ref REFRESH_FAILED_COUNTER: &'static str = {
        metrics::describe_counter!(
            "shellcache_refresh_failed_total",
            "Total number of background refreshes that failed to fetch or store."
        );
        "shellcache_refresh_failed_total"
    };

    // Offload metrics

    /// Track number of spawned background tasks.
    pub static ref OFFLOAD_TASKS_SPAWNED: &'static str = {
        metrics::describe_counter!(
            "shellcache_offload_tasks_spawned_total",
            "Total number of background tasks spawned."
        );
        "shellcache_offload_tasks_spawned_total"
    };
}
