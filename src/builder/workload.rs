use crate::check::{CheckMeta, Target};
use crate::error::Result;
use crate::reader::{
    Object, ObjectMeta, ObjectRef, Reader, ReaderResult, ResourceType, list_metadata_or_empty,
    list_or_empty,
};
use crate::result::{Condition, DiagnosticResult, ImpactedObject, annotation};

use super::{Governing, resolve_components, seeded_result};

type Lister<T> = fn(&dyn Reader, &ResourceType) -> ReaderResult<Vec<T>>;
type Filter<'a, T> = Box<dyn Fn(&T) -> Result<bool> + 'a>;

/// Pipeline for checks that report on a filtered collection of one resource type.
///
/// Build it with [`WorkloadValidation::new`] to list full objects or
/// [`WorkloadValidation::new_metadata`] to list metadata only. A resource
/// type that is not installed reads as an empty collection.
pub struct WorkloadValidation<'a, T> {
    meta: &'a CheckMeta,
    target: &'a Target,
    resource_type: ResourceType,
    lister: Lister<T>,
    filter: Option<Filter<'a, T>>,
    required_components: Vec<String>,
}

impl<'a> WorkloadValidation<'a, Object> {
    #[must_use]
    pub fn new(meta: &'a CheckMeta, target: &'a Target, resource_type: ResourceType) -> Self {
        Self::with_lister(meta, target, resource_type, list_or_empty)
    }
}

impl<'a> WorkloadValidation<'a, ObjectMeta> {
    #[must_use]
    pub fn new_metadata(
        meta: &'a CheckMeta,
        target: &'a Target,
        resource_type: ResourceType,
    ) -> Self {
        Self::with_lister(meta, target, resource_type, list_metadata_or_empty)
    }
}

impl<'a, T: ObjectRef> WorkloadValidation<'a, T> {
    fn with_lister(
        meta: &'a CheckMeta,
        target: &'a Target,
        resource_type: ResourceType,
        lister: Lister<T>,
    ) -> Self {
        Self {
            meta,
            target,
            resource_type,
            lister,
            filter: None,
            required_components: Vec::new(),
        }
    }

    /// Keep only items for which `filter` returns `true`.
    ///
    /// The first filter error aborts the validation and is propagated.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Fn(&T) -> Result<bool> + 'a) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Short-circuit unless at least one of `components` is not `Removed`.
    #[must_use]
    pub fn with_required_components(mut self, components: &[&str]) -> Self {
        self.required_components = components.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Run `validate`, which sets the result's conditions itself.
    ///
    /// When `validate` leaves the impacted objects unset, they are filled from
    /// the filtered items in order.
    ///
    /// # Errors
    /// Propagates reader failures, filter errors and errors returned by `validate`.
    pub fn run<F>(self, validate: F) -> Result<DiagnosticResult>
    where
        F: FnOnce(&mut DiagnosticResult, &WorkloadRequest<'_, T>) -> Result<()>,
    {
        let data_science_cluster = if self.required_components.is_empty() {
            None
        } else {
            match resolve_components(self.meta, self.target, &self.required_components)? {
                Governing::Found(dsc) => Some(dsc),
                Governing::ShortCircuit(result) => return Ok(result),
            }
        };

        let items = self.collect()?;

        let mut result = seeded_result(self.meta, self.target);
        result.annotate(annotation::IMPACTED_COUNT, items.len().to_string());

        let request = WorkloadRequest {
            items,
            resource_type: self.resource_type,
            target: self.target,
            data_science_cluster,
        };
        validate(&mut result, &request)?;

        if result.impacted_objects.is_none() {
            result.set_impacted_objects(request.impacted_objects());
        }

        Ok(result)
    }

    /// Run `validate`, which only computes conditions; the builder sets them in order.
    ///
    /// # Errors
    /// Propagates reader failures, filter errors and errors returned by `validate`.
    pub fn complete<F>(self, validate: F) -> Result<DiagnosticResult>
    where
        F: FnOnce(&WorkloadRequest<'_, T>) -> Result<Vec<Condition>>,
    {
        self.run(|result, request| {
            for condition in validate(request)? {
                result.set_condition(condition);
            }
            Ok(())
        })
    }

    fn collect(&self) -> Result<Vec<T>> {
        let items = (self.lister)(self.target.reader(), &self.resource_type)?;
        let Some(filter) = &self.filter else {
            return Ok(items);
        };

        let mut kept = Vec::with_capacity(items.len());
        for item in items {
            if filter(&item)? {
                kept.push(item);
            }
        }
        Ok(kept)
    }
}

/// What a workload validation callback gets to work with.
pub struct WorkloadRequest<'a, T> {
    /// Filtered items in listing order.
    pub items: Vec<T>,
    pub resource_type: ResourceType,
    pub target: &'a Target,
    /// Present when required components were configured.
    pub data_science_cluster: Option<Object>,
}

impl<T: ObjectRef> WorkloadRequest<'_, T> {
    /// Impacted-object references for every filtered item.
    #[must_use]
    pub fn impacted_objects(&self) -> Vec<ImpactedObject> {
        self.items
            .iter()
            .map(|item| ImpactedObject {
                api_version: self.resource_type.api_version(),
                kind: self.resource_type.kind.to_string(),
                namespace: item.namespace().map(String::from),
                name: item.name().to_string(),
                annotations: std::collections::BTreeMap::new(),
            })
            .collect()
    }
}
