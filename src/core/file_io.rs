use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub fn extract_base_name(path: &str) -> io::Result<&str> {
    Path::new(path)
        .file_stem() // Get the base name component of the path
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unable to extract base name from `{}`", path),
            )
        })
}

/**
 * Builds (and creates) the output directory: `out/<project>/<params base name>`,
 * with an optional date-time sub-directory so that repeated runs do not
 * overwrite each other.
 */
pub fn build_output_path_with_date_time(
    params_path: &str,
    project: &str,
    datetime: &Option<String>,
) -> io::Result<PathBuf> {
    let mut dirs = vec!["out", project, extract_base_name(params_path)?];
    if let Some(inner_datetime_str) = datetime {
        dirs.push(inner_datetime_str);
    }

    let directory_path: PathBuf = dirs.iter().collect();
    std::fs::create_dir_all(&directory_path)?;
    Ok(directory_path)
}

pub fn date_time_string() -> String {
    use chrono::{Datelike, Local, Timelike};
    let local_time = Local::now();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        local_time.year(),
        local_time.month(),
        local_time.day(),
        local_time.hour(),
        local_time.minute(),
        local_time.second()
    )
}

pub fn maybe_date_time_string(enable: bool) -> Option<String> {
    if enable {
        Some(date_time_string())
    } else {
        None
    }
}

/**
 * Store a path and prefix together, making it easy to generate a collection
 * of files with the same prefix, but separate suffixes.
 */
#[derive(Debug, Clone)]
pub struct FilePrefix {
    pub directory_path: PathBuf,
    pub file_base: String,
}

impl FilePrefix {
    pub fn full_path_with_suffix(&self, suffix: &str) -> PathBuf {
        self.directory_path.join(self.file_base.clone() + suffix)
    }

    pub fn create_file_with_suffix(&self, suffix: &str) -> io::Result<io::BufWriter<std::fs::File>> {
        let file = std::fs::File::create(self.full_path_with_suffix(suffix))?;
        Ok(io::BufWriter::new(file))
    }

    pub fn create_and_step_into_sub_directory(&mut self, sub_directory: &str) -> io::Result<()> {
        self.directory_path = self.directory_path.join(sub_directory);
        std::fs::create_dir_all(&self.directory_path)
    }
}

pub fn serialize_to_json<T: Serialize>(value: &T, path: &Path) -> io::Result<()> {
    let file = io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}
