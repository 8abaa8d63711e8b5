//! Property schema management.
//!
//! Declaring a property allocates a named [`PropertyMap`](crate::store::PropertyMap)
//! on the store. Declarations are idempotent for identical types and
//! rejected for conflicting ones. Ingestion may also declare properties on
//! first use ([`lazy_declare_if_absent`]); that path logs a warning because it
//! means the input carries properties nobody declared up front.

use crate::error::{Error, Result};
use crate::store::{GraphStore, ObjectKind};
use crate::value::ValueType;
use std::collections::BTreeMap;

/// Outcome of a successful declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// A new slot was allocated.
    Created,
    /// A slot with the same name and type already existed; nothing changed.
    AlreadyDeclared,
}

/// Declares one property slot.
pub(crate) fn declare(
    store: &mut GraphStore,
    kind: ObjectKind,
    name: &str,
    value_type: ValueType,
) -> Result<Declaration> {
    if check(store, kind, name, value_type)? {
        return Ok(Declaration::AlreadyDeclared);
    }
    store.new_property_map(kind, name, value_type)?;
    tracing::debug!(%kind, name, %value_type, "Declared property");
    Ok(Declaration::Created)
}

/// Declares a batch of slots.
///
/// Every entry is validated before the first slot is allocated, so a
/// conflict anywhere leaves the store untouched.
pub(crate) fn declare_many<I, S>(store: &mut GraphStore, kind: ObjectKind, props: I) -> Result<()>
where
    I: IntoIterator<Item = (S, ValueType)>,
    S: Into<String>,
{
    let plan = plan_many(store, kind, props)?;
    apply(store, kind, plan)
}

/// Validates a batch without touching the store.
pub(crate) fn plan_many<I, S>(
    store: &GraphStore,
    kind: ObjectKind,
    props: I,
) -> Result<BTreeMap<String, ValueType>>
where
    I: IntoIterator<Item = (S, ValueType)>,
    S: Into<String>,
{
    let mut pending: BTreeMap<String, ValueType> = BTreeMap::new();
    for (name, value_type) in props {
        let name = name.into();
        if let Some(previous) = pending.get(&name) {
            if *previous != value_type {
                return Err(Error::Schema(format!(
                    "{kind} property '{name}' listed as both {previous} and {value_type}"
                )));
            }
        }
        check(store, kind, &name, value_type)?;
        pending.insert(name, value_type);
    }
    Ok(pending)
}

/// Declares every slot of a validated plan.
pub(crate) fn apply(
    store: &mut GraphStore,
    kind: ObjectKind,
    plan: BTreeMap<String, ValueType>,
) -> Result<()> {
    for (name, value_type) in plan {
        declare(store, kind, &name, value_type)?;
    }
    Ok(())
}

/// Fails with [`Error::Schema`] on an empty property name.
pub(crate) fn check_name(kind: ObjectKind, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Schema(format!(
            "{kind} property name must not be empty"
        )));
    }
    Ok(())
}

/// Declares `name` with `default_type` unless it already exists.
///
/// An existing slot is reported as [`Declaration::AlreadyDeclared`]
/// regardless of its type; callers check type compatibility themselves.
pub(crate) fn lazy_declare_if_absent(
    store: &mut GraphStore,
    kind: ObjectKind,
    name: &str,
    default_type: ValueType,
) -> Result<Declaration> {
    if store.property_map(kind, name).is_some() {
        return Ok(Declaration::AlreadyDeclared);
    }
    store.new_property_map(kind, name, default_type)?;
    tracing::warn!(%kind, name, value_type = %default_type, "Creating undeclared property");
    Ok(Declaration::Created)
}

/// Snapshot of the declared slots of one kind.
pub(crate) fn schema_of(store: &GraphStore, kind: ObjectKind) -> BTreeMap<String, ValueType> {
    store
        .property_maps(kind)
        .iter()
        .map(|(name, map)| (name.clone(), map.value_type()))
        .collect()
}

/// Returns `Ok(true)` if an identical slot exists, `Ok(false)` if the name
/// is free.
fn check(store: &GraphStore, kind: ObjectKind, name: &str, value_type: ValueType) -> Result<bool> {
    check_name(kind, name)?;
    match store.property_map(kind, name) {
        None => Ok(false),
        Some(existing) if existing.value_type() == value_type => Ok(true),
        Some(existing) => Err(Error::Schema(format!(
            "{kind} property '{name}' already declared as {}, cannot redeclare as {value_type}",
            existing.value_type()
        ))),
    }
}
