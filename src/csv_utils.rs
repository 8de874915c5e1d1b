//! CSV serialization and deserialization utilities.
//!
//! Fixtures are read from CSV and collection snapshots are exported back to
//! CSV with the same headers.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};

/// Reads every record from a CSV source into type T.
pub fn read_csv<T, R>(reader: R) -> csv::Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize()
        .collect()
}

/// Writes an iterator of records to a CSV writer.
/// Each record must implement Serialize.
pub fn write_csv<T, W>(writer: W, records: impl IntoIterator<Item = T>) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
