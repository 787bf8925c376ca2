use base64::{Engine as _, engine::general_purpose};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::core::error::ConfigError;

const PNG_DATA_PREFIX: &str = "data:image/png;base64,";

/// Resolves the configured favicon into the string placed in the status JSON.
///
/// Empty stays empty, a `data:` URI is used as-is, anything else is read as
/// a PNG file and base64 encoded.
pub fn load_favicon(favicon: &str) -> Result<String, ConfigError> {
    if favicon.is_empty() {
        debug!("No favicon configured");
        return Ok(String::new());
    }

    if favicon.starts_with("data:") {
        debug!("Favicon is already a data URI");
        return Ok(favicon.to_string());
    }

    let image_data = read_image(Path::new(favicon)).map_err(|source| ConfigError::Favicon {
        path: PathBuf::from(favicon),
        source,
    })?;

    debug!(
        "Loaded favicon from {} ({} bytes)",
        favicon,
        image_data.len()
    );
    Ok(encode_png(&image_data))
}

pub fn encode_png(data: &[u8]) -> String {
    format!("{}{}", PNG_DATA_PREFIX, general_purpose::STANDARD.encode(data))
}

fn read_image(path: &Path) -> io::Result<Vec<u8>> {
    if path.is_absolute() {
        return fs::read(path);
    }

    // relative to the working directory first, then to the executable
    fs::read(path).or_else(|err| {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        match exe_dir {
            Some(dir) => {
                let candidate = dir.join(path);
                debug!("Trying favicon path relative to executable: {:?}", candidate);
                fs::read(candidate).map_err(|_| err)
            }
            None => Err(err),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_favicon() {
        assert_eq!(load_favicon("").unwrap(), "");
    }

    #[test]
    fn test_data_uri_passthrough() {
        let uri = "data:image/png;base64,AAAA";
        assert_eq!(load_favicon(uri).unwrap(), uri);
    }

    #[test]
    fn test_file_is_encoded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let favicon = load_favicon(file.path().to_str().unwrap()).unwrap();
        assert_eq!(favicon, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_favicon("no-such-favicon.png"),
            Err(ConfigError::Favicon { .. })
        ));
    }
}
