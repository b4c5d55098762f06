use semver::Version;

use super::error::{Result, UpdateError};

const MAX_COMPONENTS: usize = 4;

/// Parses a release version leniently into a fully defined `major.minor.patch`.
///
/// The update server and old preference values use dotted versions with one
/// to four numeric components, optionally followed by a `-pre` or `+build`
/// suffix. Missing components are zero, the suffix is dropped and a fourth
/// (revision) component is ignored, so `"1.3.0-beta"` and `"1.3"` both
/// yield `1.3.0`.
pub fn parse_version(input: &str) -> Result<Version> {
    let trimmed = input.trim();
    let core = trimmed.split(['-', '+']).next().unwrap_or_default();

    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > MAX_COMPONENTS {
        return Err(UpdateError::VersionParseError(
            input.to_string(),
            format!("more than {} components", MAX_COMPONENTS),
        ));
    }

    let mut numbers = [0u64; MAX_COMPONENTS];
    for (slot, part) in numbers.iter_mut().zip(parts.iter()) {
        *slot = part
            .parse::<u64>()
            .map_err(|e| UpdateError::VersionParseError(input.to_string(), e.to_string()))?;
    }

    if parts.len() == MAX_COMPONENTS && numbers[3] != 0 {
        log::debug!("Ignoring revision component of version {}", trimmed);
    }

    Ok(Version::new(numbers[0], numbers[1], numbers[2]))
}
