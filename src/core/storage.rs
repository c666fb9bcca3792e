// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::{APP_ID, utils::PokeQuizError};

/// `<data dir>/<APP_ID>/<file_name>`
pub fn data_file(file_name: &str) -> Result<PathBuf, PokeQuizError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_ID).join(file_name))
        .ok_or(PokeQuizError::NoDataDir)
}

/// Reads a RON file, `Ok(None)` if it does not exist yet
pub async fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PokeQuizError> {
    if tokio::fs::metadata(path).await.is_err() {
        return Ok(None);
    }

    let data = tokio::fs::read_to_string(path).await?;
    let value = ron::from_str(&data).map_err(|e| PokeQuizError::Ron(e.to_string()))?;

    Ok(Some(value))
}

/// Writes a value as pretty RON, creating parent directories as needed
pub async fn write_ron<T: Serialize>(path: &Path, value: &T) -> Result<(), PokeQuizError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let data = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| PokeQuizError::Ron(e.to_string()))?;
    tokio::fs::write(path, data).await?;

    Ok(())
}
