use log::{debug, info};

use storage::StatsStore;

use crate::error::Error;
use crate::settings::Settings;

/// Load the statistics store, from the configured snapshot when it exists and
/// from the raw statistics files otherwise.
pub fn load_stats(settings: &Settings) -> Result<StatsStore, Error> {
    match &settings.snapshot {
        Some(snapshot) if snapshot.exists() => {
            debug!("Loading statistics from snapshot {:?}", snapshot);
            Ok(StatsStore::read_snapshot(snapshot)?)
        }
        _ => {
            debug!("Loading statistics from {:?}", settings.stats);
            let stats = StatsStore::load(&settings.stats)?;
            info!(
                "{} mentions, {} entities with inlinks, {} entity pairs",
                stats.commonness().len(),
                stats.inlinks().len(),
                stats.pair_inlinks().len()
            );
            Ok(stats)
        }
    }
}
