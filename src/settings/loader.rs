// src/settings/loader.rs

use crate::errors::{BulkcheckError, Result};
use crate::settings::model::SettingsMap;

/// Split a `key=value` token.
///
/// A leading `--` is tolerated so that tokens can be written the way the
/// loader's own command line spells them (`--driver.port=9042`). The value
/// may be empty; the key may not.
pub fn parse_assignment(token: &str) -> Result<(String, String)> {
    let stripped = token.strip_prefix("--").unwrap_or(token);
    let Some((key, value)) = stripped.split_once('=') else {
        return Err(BulkcheckError::MalformedSetting(token.to_string()));
    };

    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return Err(BulkcheckError::MalformedSetting(token.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Apply `key=value` tokens to `settings`; later tokens win.
pub fn apply_assignments<I, S>(settings: &mut SettingsMap, tokens: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for token in tokens {
        let (key, value) = parse_assignment(token.as_ref())?;
        settings.set(key, value);
    }
    Ok(())
}

/// Catalog defaults overlaid with `tokens`.
///
/// This is the recommended way to build a settings map from a command line.
pub fn load_from_assignments<I, S>(tokens: I) -> Result<SettingsMap>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut settings = SettingsMap::with_defaults();
    apply_assignments(&mut settings, tokens)?;
    Ok(settings)
}
