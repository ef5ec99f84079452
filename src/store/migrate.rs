use crate::store::{Store, StoreError};

const VERSION_KEY: &str = "_meta:version";
const CREATED_AT_KEY: &str = "_meta:created_at";

type MigrationFn = fn(&Store) -> Result<(), StoreError>;

fn migrations() -> Vec<(&'static str, MigrationFn)> {
    vec![("001_initial", m001_initial)]
}

/// Applies every migration newer than the stored version.
///
/// Each migration must be idempotent: a crash between running it and
/// persisting the new version replays it on the next start. The version is
/// written after every step and never moves backwards.
pub fn run(store: &Store) -> Result<(), StoreError> {
    let current = get_current_version(store)?;
    let all = migrations();

    for (index, (name, func)) in all.iter().enumerate() {
        let version = (index + 1) as u32;
        if version > current {
            tracing::info!(version, name, "Running migration");
            func(store)?;
            set_version(store, version)?;
            tracing::info!(version, name, "Migration complete");
        } else {
            tracing::debug!(version, name, "Migration already applied, skipping");
        }
    }

    Ok(())
}

pub fn latest_version() -> u32 {
    migrations().len() as u32
}

pub fn get_current_version(store: &Store) -> Result<u32, StoreError> {
    match store.meta.get(VERSION_KEY.as_bytes())? {
        Some(raw) => {
            let bytes: [u8; 4] = raw.as_ref().try_into().map_err(|_| StoreError::Migration {
                version: 0,
                message: format!("version key has {} bytes, expected 4", raw.len()),
            })?;
            Ok(u32::from_be_bytes(bytes))
        }
        None => Ok(0),
    }
}

pub fn set_version(store: &Store, version: u32) -> Result<(), StoreError> {
    let current = get_current_version(store)?;
    if version < current {
        return Err(StoreError::Migration {
            version,
            message: format!("Refuse to downgrade from {} to {}", current, version),
        });
    }

    store
        .meta
        .insert(VERSION_KEY.as_bytes(), &version.to_be_bytes())?;
    Ok(())
}

/// Stamps when the database was first initialised. Later migrations
/// transform `posture_records` in place.
fn m001_initial(store: &Store) -> Result<(), StoreError> {
    if store.meta.get(CREATED_AT_KEY.as_bytes())?.is_none() {
        let now = chrono::Utc::now().to_rfc3339();
        store.meta.insert(CREATED_AT_KEY.as_bytes(), now.as_bytes())?;
    }
    Ok(())
}
