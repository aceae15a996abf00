use crate::advisory::PathwayOption;

/// Failures from the promote interaction. A stale key is expected when the
/// comparison panel outlives a result-set replacement, so callers drop these
/// rather than surface them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    #[error("no pathway option named '{0}' in the current results")]
    KeyNotFound(String),
    #[error("bucketed results cannot be reordered")]
    NotRanked,
}

/// Moves the option identified by `key` to rank 0, keeping the relative
/// order of every other option. Promoting the current rank 0 is identity.
pub fn promote(options: &[PathwayOption], key: &str) -> Result<Vec<PathwayOption>, ReorderError> {
    let position = options
        .iter()
        .position(|option| option.key() == key)
        .ok_or_else(|| ReorderError::KeyNotFound(key.to_string()))?;

    if position == 0 {
        return Ok(options.to_vec());
    }

    let mut reordered = Vec::with_capacity(options.len());
    reordered.push(options[position].clone());
    reordered.extend(
        options
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != position)
            .map(|(_, option)| option.clone()),
    );
    Ok(reordered)
}
