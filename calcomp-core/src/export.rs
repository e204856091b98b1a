//! Flat-file exports of a built [`AggregateMap`].

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::CalCompResult;
use crate::holiday::AggregateMap;

/// Write one `Date,Label,Colour` row per entry, dates ascending.
pub fn write_csv<W: Write>(map: &AggregateMap, writer: W) -> CalCompResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Date", "Label", "Colour"])?;

    for (date, record) in map {
        let date = date.to_string();
        for entry in &record.entries {
            csv.write_record([date.as_str(), entry.label.as_str(), entry.colour.as_str()])?;
        }
    }

    csv.flush()?;
    Ok(())
}

pub fn export_csv(map: &AggregateMap, path: &Path) -> CalCompResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(map, file)?;
    info!(path = %path.display(), rows = map.entry_count(), "Exported CSV");
    Ok(())
}

pub fn save_json(map: &AggregateMap, path: &Path, pretty: bool) -> CalCompResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if pretty {
        serde_json::to_string_pretty(map)?
    } else {
        serde_json::to_string(map)?
    };
    std::fs::write(path, content)?;
    Ok(())
}

/// Read a map saved by [`save_json`], or any file using the legacy
/// single-entry record shape.
pub fn load_json(path: &Path) -> CalCompResult<AggregateMap> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
