//! Extended M3U playlist encoding

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::model::Track;

pub const M3U_HEADER: &str = "#EXTM3U";

/// Write `#EXTM3U` followed by one `#EXTINF`/path pair per present track.
///
/// Absent slots are skipped. Fields are written verbatim. The first sink
/// error aborts the remaining writes and is returned; bytes already handed to
/// the sink stay there. Returns the number of tracks written.
pub fn write_m3u<'a, W, I>(tracks: I, sink: &mut W) -> io::Result<usize>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = Option<&'a Track>>,
{
    writeln!(sink, "{}", M3U_HEADER)?;

    let mut written = 0;
    for track in tracks.into_iter().flatten() {
        writeln!(sink, "#EXTINF:-1,{} - {}", track.artist, track.title)?;
        writeln!(sink, "{}", track.path)?;
        written += 1;
    }

    sink.flush()?;
    Ok(written)
}

/// Encode to an in-memory string
pub fn encode_m3u<'a, I>(tracks: I) -> String
where
    I: IntoIterator<Item = Option<&'a Track>>,
{
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_m3u(tracks, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Write to `path` through a sibling temporary file renamed into place, so a
/// failed export never leaves a truncated playlist at `path`.
pub fn write_m3u_file<'a, I>(tracks: I, path: &Path) -> io::Result<usize>
where
    I: IntoIterator<Item = Option<&'a Track>>,
{
    let temp_path = temp_sibling(path);

    let result = fs::File::create(&temp_path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        let written = write_m3u(tracks, &mut writer)?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        Ok(written)
    });

    match result.and_then(|written| fs::rename(&temp_path, path).map(|()| written)) {
        Ok(written) => Ok(written),
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "playlist.m3u".into());
    name.push(".part");
    path.with_file_name(name)
}
