use std::fs::File;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::errors::Result;
use crate::types::CheckIn;

/// Reads check-in records from CSV data with a header row. Columns are
/// matched by name; anything beyond `userId`, `venueId` and
/// `venueCategoryId` is ignored.
pub fn read_checkins<R: io::Read>(reader: R) -> Result<Vec<CheckIn>> {
    let mut reader = csv::Reader::from_reader(reader);

    let mut records: Vec<CheckIn> = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }

    debug!(records = records.len(), "read check-in records");
    Ok(records)
}

pub fn read_checkins_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CheckIn>> {
    let file = File::open(path)?;
    read_checkins(file)
}
