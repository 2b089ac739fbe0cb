//! In-process naming context
//!
//! Each context guards its store with its own mutex. A single-component
//! operation locks, touches the store and unlocks. A multi-component
//! operation resolves the first component the same way, releases the lock,
//! and only then delegates the rest of the name to the child context, so no
//! thread ever holds two context locks at once.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, trace, warn};

use super::handle::{BindingList, ContextRef, NamingContextHandle};
use crate::config::NamingConfig;
use crate::iterator::BindingIterator;
use crate::store::{BindingEntry, ContextStore};
use crate::types::{
    Binding, BindingKey, BindingType, Name, NameComponent, NamingError, ObjectKey, ObjectRef,
    Result,
};

struct ContextState {
    store: Box<dyn ContextStore>,
    destroyed: bool,
}

/// What a bind operation stores, tagged with its binding type
enum BindTarget {
    Object(ObjectRef),
    Context(ContextRef),
}

impl BindTarget {
    fn binding_type(&self) -> BindingType {
        match self {
            Self::Object(_) => BindingType::Object,
            Self::Context(_) => BindingType::Context,
        }
    }

    fn into_object_ref(self) -> ObjectRef {
        match self {
            Self::Object(obj) => obj,
            Self::Context(ctx) => ObjectRef::Context(ctx),
        }
    }
}

/// A node of the naming tree
pub struct NamingContext {
    key: ObjectKey,
    config: Arc<NamingConfig>,
    state: Mutex<ContextState>,
    this: Weak<NamingContext>,
}

impl NamingContext {
    /// Create a context backed by `store`
    pub fn new(store: Box<dyn ContextStore>, config: Arc<NamingConfig>) -> Arc<Self> {
        let ctx = Arc::new_cyclic(|this| Self {
            key: ObjectKey::generate(),
            config,
            state: Mutex::new(ContextState {
                store,
                destroyed: false,
            }),
            this: this.clone(),
        });
        debug!("created naming context {}", ctx.key);
        ctx
    }

    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Number of bindings held directly by this context
    pub fn binding_count(&self) -> Result<usize> {
        Ok(self.lock_active()?.store.len())
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.lock().destroyed
    }

    /// Handle to this context
    pub fn context_ref(&self) -> Result<ContextRef> {
        self.this
            .upgrade()
            .map(ContextRef::from)
            .ok_or(NamingError::ObjectNotExist)
    }

    fn lock_active(&self) -> Result<MutexGuard<'_, ContextState>> {
        let state = self.state.lock();
        if state.destroyed {
            return Err(NamingError::ObjectNotExist);
        }
        Ok(state)
    }

    /// Structural checks shared by every name-taking operation
    fn check_name(name: &Name) -> Result<()> {
        if name.is_empty() {
            return Err(NamingError::invalid_name("zero-length name"));
        }
        if name.len() > 1 && name.iter().any(NameComponent::is_empty) {
            return Err(NamingError::invalid_name(format!(
                "`{}` contains an empty component",
                name
            )));
        }
        Ok(())
    }

    /// Bind/unbind also reject the lone empty component
    fn check_bindable(name: &Name) -> Result<()> {
        Self::check_name(name)?;
        if name.is_self_reference() {
            return Err(NamingError::invalid_name(
                "the empty component cannot be bound or unbound",
            ));
        }
        Ok(())
    }

    /// A destroyed child surfaces to the caller as `CannotProceed`
    fn forward(err: NamingError, child: &ContextRef, rest_of_name: &Name) -> NamingError {
        match err {
            NamingError::ObjectNotExist => {
                NamingError::cannot_proceed(child.clone(), rest_of_name.clone())
            }
            other => other,
        }
    }

    fn lookup(&self, component: &NameComponent) -> Result<Option<BindingEntry>> {
        let state = self.lock_active()?;
        Ok(state.store.get(&BindingKey::new(component)))
    }

    /// Resolve `name[0]` here and narrow it to a context handle
    pub fn resolve_first_as_context(&self, name: &Name) -> Result<ContextRef> {
        let first = name
            .first()
            .ok_or_else(|| NamingError::invalid_name("zero-length name"))?;
        let entry = self
            .lookup(first)?
            .ok_or_else(|| NamingError::missing_node(name.clone()))?;
        if entry.binding_type() != BindingType::Context {
            return Err(NamingError::not_context(name.clone()));
        }
        entry
            .target
            .narrow_context()
            .ok_or_else(|| NamingError::not_context(name.clone()))
    }

    fn bind_entry(&self, name: &Name, target: BindTarget, rebind: bool) -> Result<()> {
        if matches!(target, BindTarget::Object(ObjectRef::Nil)) {
            return Err(NamingError::bad_param("cannot bind a nil object reference"));
        }
        Self::check_bindable(name)?;

        let (first, rest) = match name.split_first() {
            Some(split) => split,
            None => return Err(NamingError::invalid_name("zero-length name")),
        };
        if rest.is_empty() {
            return self.bind_here(first, target, rebind);
        }

        let child = self.resolve_first_as_context(name)?;
        let result = match target {
            BindTarget::Object(obj) if rebind => child.rebind(&rest, obj),
            BindTarget::Object(obj) => child.bind(&rest, obj),
            BindTarget::Context(ctx) if rebind => child.rebind_context(&rest, ctx),
            BindTarget::Context(ctx) => child.bind_context(&rest, ctx),
        };
        result.map_err(|err| Self::forward(err, &child, &rest))
    }

    fn bind_here(&self, component: &NameComponent, target: BindTarget, rebind: bool) -> Result<()> {
        let key = BindingKey::new(component);
        let binding_type = target.binding_type();
        let mut state = self.lock_active()?;

        if let Some(existing) = state.store.get(&key) {
            let bound = Name::single(component.clone());
            if !rebind {
                return Err(NamingError::already_bound(bound));
            }
            match (existing.binding_type(), binding_type) {
                (BindingType::Object, BindingType::Context) => {
                    return Err(NamingError::not_context(bound));
                }
                (BindingType::Context, BindingType::Object) => {
                    return Err(NamingError::not_object(bound));
                }
                _ => {}
            }
        }

        let entry = BindingEntry::new(
            Binding::new(component.clone(), binding_type),
            target.into_object_ref(),
        );
        state.store.put(key, entry);
        debug!(
            "{} `{}` ({:?}) in context {}",
            if rebind { "rebound" } else { "bound" },
            component,
            binding_type,
            self.key
        );
        Ok(())
    }
}

impl NamingContextHandle for NamingContext {
    fn key(&self) -> ObjectKey {
        self.key
    }

    fn bind(&self, name: &Name, obj: ObjectRef) -> Result<()> {
        self.bind_entry(name, BindTarget::Object(obj), false)
    }

    fn rebind(&self, name: &Name, obj: ObjectRef) -> Result<()> {
        self.bind_entry(name, BindTarget::Object(obj), true)
    }

    fn bind_context(&self, name: &Name, ctx: ContextRef) -> Result<()> {
        self.bind_entry(name, BindTarget::Context(ctx), false)
    }

    fn rebind_context(&self, name: &Name, ctx: ContextRef) -> Result<()> {
        self.bind_entry(name, BindTarget::Context(ctx), true)
    }

    fn resolve(&self, name: &Name) -> Result<ObjectRef> {
        Self::check_name(name)?;

        if name.is_self_reference() {
            if self.is_destroyed() {
                return Err(NamingError::ObjectNotExist);
            }
            return self.context_ref().map(ObjectRef::Context);
        }

        let (first, rest) = match name.split_first() {
            Some(split) => split,
            None => return Err(NamingError::invalid_name("zero-length name")),
        };
        if rest.is_empty() {
            trace!("resolving `{}` in context {}", first, self.key);
            return self
                .lookup(first)?
                .map(|entry| entry.target)
                .ok_or_else(|| NamingError::missing_node(name.clone()));
        }

        let child = self.resolve_first_as_context(name)?;
        child
            .resolve(&rest)
            .map_err(|err| Self::forward(err, &child, &rest))
    }

    fn unbind(&self, name: &Name) -> Result<()> {
        Self::check_bindable(name)?;

        let (first, rest) = match name.split_first() {
            Some(split) => split,
            None => return Err(NamingError::invalid_name("zero-length name")),
        };
        if rest.is_empty() {
            let mut state = self.lock_active()?;
            return match state.store.remove(&BindingKey::new(first)) {
                Some(_) => {
                    debug!("unbound `{}` from context {}", first, self.key);
                    Ok(())
                }
                None => Err(NamingError::missing_node(name.clone())),
            };
        }

        let child = self.resolve_first_as_context(name)?;
        child
            .unbind(&rest)
            .map_err(|err| Self::forward(err, &child, &rest))
    }

    fn list(&self, how_many: usize) -> Result<BindingList> {
        let snapshot: Vec<Binding> = {
            let state = self.lock_active()?;
            state
                .store
                .snapshot()
                .into_iter()
                .map(|entry| entry.binding)
                .collect()
        };
        debug!(
            "listing context {}: {} binding(s), {} requested",
            self.key,
            snapshot.len(),
            how_many
        );

        let iterator = BindingIterator::with_batch_limit(snapshot, self.config.max_batch_size);
        let bindings = iterator.take(self.config.clamp_batch(how_many))?;
        Ok(BindingList { bindings, iterator })
    }

    fn new_context(&self) -> Result<ContextRef> {
        let store = self.lock_active()?.store.new_child_store();
        let child = NamingContext::new(store, Arc::clone(&self.config));
        Ok(ContextRef::from(child))
    }

    fn bind_new_context(&self, name: &Name) -> Result<ContextRef> {
        let ctx = self.new_context()?;
        if let Err(err) = self.bind_context(name, ctx.clone()) {
            if let Err(destroy_err) = ctx.destroy() {
                warn!("failed to destroy orphaned context {}: {}", ctx.key(), destroy_err);
            }
            return Err(err);
        }
        Ok(ctx)
    }

    fn destroy(&self) -> Result<()> {
        let mut state = self.lock_active()?;
        let remaining = state.store.len();
        if remaining > 0 {
            return Err(NamingError::NotEmpty(remaining));
        }
        state.store.destroy();
        state.destroyed = true;
        debug!("destroyed naming context {}", self.key);
        Ok(())
    }

    fn as_local(&self) -> Option<&NamingContext> {
        Some(self)
    }
}
