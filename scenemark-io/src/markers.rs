//! Marker collection output

use crate::error::Result;
use scenemark_core::MarkerCollection;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize a collection as pretty-printed JSON
pub fn markers_to_string(collection: &MarkerCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

/// Write a collection as JSON to any writer
pub fn write_markers_to<W: Write>(collection: &MarkerCollection, writer: W) -> Result<()> {
    let mut writer = writer;
    serde_json::to_writer_pretty(&mut writer, collection)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a collection as JSON to `path`, replacing any existing file
pub fn write_markers<P: AsRef<Path>>(collection: &MarkerCollection, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_markers_to(collection, BufWriter::new(file))?;
    tracing::debug!(path = %path.as_ref().display(), markers = collection.len(), "wrote markers");
    Ok(())
}

/// Read a collection previously written by [`write_markers`]
pub fn read_markers<P: AsRef<Path>>(path: P) -> Result<MarkerCollection> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}
