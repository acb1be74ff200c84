use crate::{ContactRow, HarvestError, Listing};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the full accumulated record set as a JSON array.
pub fn write_listings_json(path: &Path, listings: &[Listing]) -> Result<(), HarvestError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, listings)?;
    writer.flush()?;

    info!("Wrote {} listings to {}", listings.len(), path.display());
    Ok(())
}

/// Writes the contact-row projection as a `Name,Phone,Website` table.
///
/// The header comes from the row schema, so an empty run still produces a
/// well-formed header-only file.
pub fn write_contact_csv(path: &Path, rows: &[ContactRow]) -> Result<(), HarvestError> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(["Name", "Phone", "Website"])?;
    } else {
        for row in rows {
            writer.serialize(row)?;
        }
    }
    writer.flush()?;

    info!("Wrote {} contact rows to {}", rows.len(), path.display());
    Ok(())
}
