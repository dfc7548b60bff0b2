//! Useful functions for creating inmemory repositories.
//!
//! Every function holds the collection lock for its whole access, so
//! operations on the same collection are serialized.

use anyhow::anyhow;
use std::sync::{Mutex, MutexGuard};
use user_service_domain::{Entity, ID};

fn lock<T>(collection: &Mutex<Vec<T>>) -> anyhow::Result<MutexGuard<'_, Vec<T>>> {
    collection
        .lock()
        .map_err(|_| anyhow!("Inmemory collection lock is poisoned"))
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) -> anyhow::Result<()> {
    let mut collection = lock(collection)?;
    collection.push(val.clone());
    Ok(())
}

/// Applies `update` to the entity with the given id.
/// Returns the number of entities that were matched.
pub fn update<T: Entity, U: FnOnce(&mut T)>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    update: U,
) -> anyhow::Result<u64> {
    let mut collection = lock(collection)?;
    match collection.iter_mut().find(|e| e.id() == val_id) {
        Some(entity) => {
            update(entity);
            Ok(1)
        }
        None => Ok(0),
    }
}

pub fn find<T: Clone + Entity>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
) -> anyhow::Result<Option<T>> {
    let collection = lock(collection)?;
    Ok(collection.iter().find(|e| e.id() == val_id).cloned())
}

/// Finds the entities accepted by `compare`, in insertion order,
/// skipping the first `skip` matches and returning at most `limit`.
pub fn find_page_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    skip: usize,
    limit: usize,
) -> anyhow::Result<Vec<T>> {
    let collection = lock(collection)?;
    Ok(collection
        .iter()
        .filter(|e| compare(*e))
        .skip(skip)
        .take(limit)
        .cloned()
        .collect())
}

pub fn delete<T: Entity>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
) -> anyhow::Result<Option<T>> {
    let mut collection = lock(collection)?;
    Ok(collection
        .iter()
        .position(|e| e.id() == val_id)
        .map(|index| collection.remove(index)))
}
