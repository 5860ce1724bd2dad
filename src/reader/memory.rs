use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Object, ObjectMeta, ObjectRef, Reader, ReaderError, ReaderResult, ResourceType};

type TypeKey = (String, String);

fn key_of(rt: &ResourceType) -> TypeKey {
    (rt.group.to_string(), rt.kind.to_string())
}

fn key_of_api_version(api_version: &str, kind: &str) -> TypeKey {
    let group = api_version
        .rsplit_once('/')
        .map_or("", |(group, _version)| group);
    (group.to_string(), kind.to_string())
}

/// In-process [`Reader`] over a fixed set of objects.
///
/// Backs snapshot files and tests. Resource types must be registered (directly
/// or by inserting an object of that type) before they can be listed; any other
/// type reports [`ErrorKind::UnknownResourceType`].
#[derive(Debug, Default)]
pub struct MemoryReader {
    known: HashSet<TypeKey>,
    objects: HashMap<TypeKey, Vec<Object>>,
    failures: HashMap<TypeKey, ReaderError>,
    calls: AtomicUsize,
}

impl MemoryReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a resource type as served by this reader.
    pub fn register_type(&mut self, rt: &ResourceType) {
        self.known.insert(key_of(rt));
    }

    #[must_use]
    pub fn with_type(mut self, rt: &ResourceType) -> Self {
        self.register_type(rt);
        self
    }

    /// Insert an object; its type is derived from `apiVersion` and `kind`.
    pub fn insert(&mut self, object: Object) {
        let key = key_of_api_version(object.api_version(), object.kind());
        self.known.insert(key.clone());
        self.objects.entry(key).or_default().push(object);
    }

    #[must_use]
    pub fn with_object(mut self, object: impl Into<Object>) -> Self {
        self.insert(object.into());
        self
    }

    /// Make every call for `rt` fail with the given error.
    #[must_use]
    pub fn fail_with(mut self, rt: &ResourceType, error: ReaderError) -> Self {
        self.failures.insert(key_of(rt), error);
        self
    }

    /// Number of reader calls served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn objects_of(&self, rt: &ResourceType) -> ReaderResult<&[Object]> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let key = key_of(rt);
        if let Some(error) = self.failures.get(&key) {
            return Err(error.clone());
        }
        if !self.known.contains(&key) {
            return Err(ReaderError::unknown_type(rt));
        }
        Ok(self.objects.get(&key).map_or(&[], Vec::as_slice))
    }
}

impl Reader for MemoryReader {
    fn list(&self, rt: &ResourceType) -> ReaderResult<Vec<Object>> {
        Ok(self.objects_of(rt)?.to_vec())
    }

    fn list_metadata(&self, rt: &ResourceType) -> ReaderResult<Vec<ObjectMeta>> {
        Ok(self.objects_of(rt)?.iter().map(Object::to_meta).collect())
    }

    fn get(&self, rt: &ResourceType, name: &str, namespace: Option<&str>) -> ReaderResult<Object> {
        self.objects_of(rt)?
            .iter()
            .find(|o| o.name() == name && o.namespace() == namespace)
            .cloned()
            .ok_or_else(|| ReaderError::not_found(rt, name, namespace))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
