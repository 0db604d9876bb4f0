//! OSRM dataset preparation for integration tests.
//!
//! Downloads a Geofabrik extract and runs the MLD preprocessing pipeline
//! through the osrm-backend docker image, so a routable OSRM instance can be
//! started against real map data. Each step is skipped when its output
//! already exists, so repeated test runs reuse the prepared dataset.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OsrmDataError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("extract download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("docker {0} exited with status {1}")]
    Preprocess(String, std::process::ExitStatus),
}

/// A prepared OSRM dataset on disk, ready for `osrm-routed --algorithm mld`.
#[derive(Debug, Clone)]
pub struct OsrmTestData {
    /// Directory to bind-mount at `/data` in the osrm-backend container.
    pub data_dir: PathBuf,
    /// Base `.osrm` path of the preprocessed dataset inside `data_dir`.
    pub osrm_base: PathBuf,
}

impl OsrmTestData {
    /// Ensures the Geofabrik `region` (e.g. "europe/monaco") is downloaded
    /// and preprocessed under `data_root`.
    pub fn ensure(region: &str, data_root: impl AsRef<Path>) -> Result<Self, OsrmDataError> {
        let name = region.rsplit('/').next().unwrap_or(region);

        let data_root = data_root.as_ref();
        let data_root = if data_root.is_absolute() {
            data_root.to_path_buf()
        } else {
            std::env::current_dir()?.join(data_root)
        };
        let data_dir = data_root.join(name);
        fs::create_dir_all(&data_dir)?;

        let pbf_path = data_dir.join(format!("{name}-latest.osm.pbf"));
        if !pbf_path.exists() {
            let url = format!("https://download.geofabrik.de/{region}-latest.osm.pbf");
            download(&url, &pbf_path)?;
        }

        let osrm_base = data_dir.join(format!("{name}-latest.osrm"));
        let pbf_name = container_file_name(&pbf_path);
        let base_name = container_file_name(&osrm_base);

        if !osrm_base.exists() {
            osrm_backend(
                &data_dir,
                &["osrm-extract", "-p", "/opt/car.lua", &format!("/data/{pbf_name}")],
            )?;
        }

        let mld_outputs = ["osrm.partition", "osrm.cells", "osrm.mldgr"];
        let mld_ready = mld_outputs
            .iter()
            .all(|ext| osrm_base.with_extension(ext).exists());
        if !mld_ready {
            osrm_backend(&data_dir, &["osrm-partition", &format!("/data/{base_name}")])?;
            osrm_backend(&data_dir, &["osrm-customize", &format!("/data/{base_name}")])?;
        }

        Ok(Self { data_dir, osrm_base })
    }
}

fn download(url: &str, dest: &Path) -> Result<(), OsrmDataError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let bytes = response.bytes()?;

    // Write to a sibling temp file and rename, so a partial download never
    // masquerades as a complete extract on the next run.
    let tmp_path = dest.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    fs::rename(tmp_path, dest)?;
    Ok(())
}

/// Runs one osrm-backend tool inside docker with `data_dir` mounted at /data.
fn osrm_backend(data_dir: &Path, args: &[&str]) -> Result<(), OsrmDataError> {
    let status = Command::new("docker")
        .args(["run", "--rm", "-t", "-v"])
        .arg(format!("{}:/data", data_dir.display()))
        .arg("osrm/osrm-backend")
        .args(args)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(OsrmDataError::Preprocess(args[0].to_string(), status))
    }
}

fn container_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}
