use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use common::Timer;

use crate::error::StatsLoadError;
use crate::StatsStore;

const SNAPSHOT_BUF_SIZE: usize = 64 * 1024 * 1024;

impl StatsStore {
    /// Serialise the whole store into a bincode snapshot file.
    pub fn write_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<(), StatsLoadError> {
        let path = path.as_ref();
        let mut timer = Timer::new();
        info!("Writing statistics snapshot to {:?}", path);
        let file = File::create(path).map_err(|err| StatsLoadError::io(path, err))?;
        let mut file = BufWriter::with_capacity(SNAPSHOT_BUF_SIZE, file);
        bincode::serialize_into(&mut file, self)?;
        file.flush().map_err(|err| StatsLoadError::io(path, err))?;
        timer.finish("Snapshot write");
        Ok(())
    }

    /// Deserialise a store previously written by `write_snapshot`.
    pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Self, StatsLoadError> {
        let path = path.as_ref();
        let mut timer = Timer::new();
        info!("Loading statistics snapshot from {:?}", path);
        let file = File::open(path).map_err(|err| StatsLoadError::io(path, err))?;
        let reader = BufReader::with_capacity(SNAPSHOT_BUF_SIZE, file);
        let store: StatsStore = bincode::deserialize_from(reader)?;
        timer.finish("Snapshot load");
        Ok(store)
    }
}
