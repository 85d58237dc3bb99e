use std::fs;
use std::sync::atomic::{AtomicU32, Ordering};

use camino::{Utf8Path, Utf8PathBuf};

static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

/// Fresh scratch directory under the system temp dir, unique per test.
pub fn scratch_dir(label: &str) -> Utf8PathBuf {
    let seq = DIR_SEQ.fetch_add(1, Ordering::Relaxed);
    let dir = Utf8PathBuf::from_path_buf(std::env::temp_dir())
        .expect("utf-8 temp dir")
        .join(format!("loncross-{label}-{}-{seq}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Write one generator-format track file: `(cyclone id, [(lon, lat), …])` per
/// track, one record per point, hourly cadence.
pub fn write_track_file(
    dir: &Utf8Path,
    name: &str,
    tracks: &[(u32, Vec<(f64, f64)>)],
) -> Utf8PathBuf {
    let mut contents = String::from(
        "% CycloneNumber,Datetime,TimeElapsed,Longitude,Latitude,Speed,Bearing,\
         CentralPressure,EnvPressure,rMax\n",
    );
    for (id, points) in tracks {
        for (i, (lon, lat)) in points.iter().enumerate() {
            contents.push_str(&format!(
                "{id},2010-01-01 00:00:00,{}.0,{lon},{lat},18.0,90.0,985.0,1005.0,30.0\n",
                i
            ));
        }
    }
    let path = dir.join(name);
    fs::write(&path, contents).expect("write track file");
    path
}

/// Flatten a histogram triple into one comparable vector.
pub fn histogram_key(h: &loncross::CrossingHistograms) -> Vec<f64> {
    h.total
        .iter()
        .chain(h.eastward.iter())
        .chain(h.westward.iter())
        .copied()
        .collect()
}
