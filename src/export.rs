//! Writes control profiles as plain-text tables.

use crate::error::ExportError;
use crate::maneuver::ControlProfile;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The header line naming the column units. Written without a comment
/// prefix; downstream tooling keys on the column order.
const HEADER: &str = "time [s], v [m/s], w [rad/s]";

/// Writes the profile to `path` as space-separated
/// `time velocity steer_rate` rows, one per sample, under a one-line
/// unit header.
pub fn write_profile(profile: &ControlProfile, path: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_profile_to(profile, &mut writer).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    log::info!("wrote {} samples to {}", profile.len(), path.display());
    Ok(())
}

/// Writes the profile rows to an arbitrary writer.
pub fn write_profile_to(profile: &ControlProfile, writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    for sample in &profile.samples {
        writeln!(
            writer,
            "{:.6} {:.6} {:.6}",
            sample.time, sample.velocity, sample.steer_rate
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::maneuver::Maneuver;
    use crate::model::VehicleParams;

    #[test]
    fn header_then_one_row_per_sample() {
        let profile = Maneuver::FigureEight.profile(&VehicleParams::default());
        let mut buf = Vec::new();
        write_profile_to(&profile, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("time [s], v [m/s], w [rad/s]"));
        assert_eq!(lines.count(), profile.len());
    }

    #[test]
    fn rows_hold_time_velocity_and_rate() {
        let profile = Maneuver::FigureEight.profile(&VehicleParams::default());
        let mut buf = Vec::new();
        write_profile_to(&profile, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let first = text.lines().nth(1).unwrap();
        let columns: Vec<f64> = first
            .split_whitespace()
            .map(|c| c.parse().unwrap())
            .collect();
        assert_eq!(columns, vec![0.0, 4.0, 1.22]);
    }
}
