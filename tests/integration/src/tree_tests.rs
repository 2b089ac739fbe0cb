//! Naming Tree Tests
//!
//! Exercises bind/resolve/unbind/destroy across several levels of
//! contexts, including contexts bound under more than one parent and
//! contexts destroyed while still reachable.

mod common;

use common::*;
use cosnaming::{
    BindingType, NamingContextExt, NamingContextHandle, NamingError, NotFoundReason, ObjectRef,
};

#[test]
fn test_bind_resolve_rebind() {
    init_logging();

    let service = service();
    let root = service.root();
    let first = ObjectRef::object("IDL:First:1.0");
    let second = ObjectRef::object("IDL:Second:1.0");

    root.bind(&ids(&["x"]), first.clone()).unwrap();
    assert_eq!(root.resolve(&ids(&["x"])).unwrap(), first);

    let err = root.bind(&ids(&["x"]), second.clone()).unwrap_err();
    assert!(matches!(err, NamingError::AlreadyBound(ref n) if *n == ids(&["x"])));

    root.rebind(&ids(&["x"]), second.clone()).unwrap();
    assert_eq!(root.resolve(&ids(&["x"])).unwrap(), second);

    let list = root.list(10).unwrap();
    assert_eq!(list.bindings.len(), 1);
    assert_eq!(list.bindings[0].binding_type, BindingType::Object);
}

#[test]
fn test_kind_distinguishes_bindings() {
    init_logging();

    let service = service();
    let root = service.root();
    let plain = ObjectRef::object("IDL:Plain:1.0");
    let kinded = ObjectRef::object("IDL:Kinded:1.0");

    root.bind(&name(&[("log", "")]), plain.clone()).unwrap();
    root.bind(&name(&[("log", "txt")]), kinded.clone()).unwrap();

    assert_eq!(root.resolve_str("log").unwrap(), plain);
    assert_eq!(root.resolve_str("log.txt").unwrap(), kinded);
    assert_eq!(root.list(10).unwrap().bindings.len(), 2);
}

#[test]
fn test_multi_level_delegation() {
    init_logging();

    let (service, obj, c) = sample_tree();
    let root = service.root();

    assert_eq!(root.resolve(&ids(&["a", "b"])).unwrap(), obj);
    assert_eq!(
        root.resolve(&ids(&["a", "c"])).unwrap(),
        ObjectRef::Context(c.clone())
    );

    let deep = ObjectRef::object("IDL:Deep:1.0");
    root.bind(&ids(&["a", "c", "d"]), deep.clone()).unwrap();
    assert_eq!(c.resolve(&ids(&["d"])).unwrap(), deep);
    assert_eq!(service.resolve_str("a/c/d").unwrap(), deep);

    root.unbind(&ids(&["a", "c", "d"])).unwrap();
    assert_eq!(c.list(10).unwrap().bindings.len(), 0);
}

#[test]
fn test_not_found_reasons() {
    init_logging();

    let (service, _, _) = sample_tree();
    let root = service.root();

    let err = root.resolve(&ids(&["a", "zzz"])).unwrap_err();
    assert_eq!(err.not_found_reason(), Some(NotFoundReason::MissingNode));
    assert_eq!(err.rest_of_name(), Some(&ids(&["zzz"])));

    // `a/b` is an object, so it cannot be traversed
    let err = root.resolve(&ids(&["a", "b", "x"])).unwrap_err();
    assert_eq!(err.not_found_reason(), Some(NotFoundReason::NotContext));
    assert_eq!(err.rest_of_name(), Some(&ids(&["b", "x"])));

    let err = root.unbind(&ids(&["q", "r"])).unwrap_err();
    assert_eq!(err.not_found_reason(), Some(NotFoundReason::MissingNode));
    assert_eq!(err.rest_of_name(), Some(&ids(&["q", "r"])));
}

#[test]
fn test_context_bound_under_two_parents() {
    init_logging();

    let service = service();
    let root = service.root();
    let shared = root.new_context().unwrap();
    let left = root.bind_new_context(&ids(&["left"])).unwrap();
    let right = root.bind_new_context(&ids(&["right"])).unwrap();

    left.bind_context(&ids(&["shared"]), shared.clone()).unwrap();
    right.bind_context(&ids(&["shared"]), shared.clone()).unwrap();

    let obj = ObjectRef::object("IDL:Shared:1.0");
    root.bind(&ids(&["left", "shared", "x"]), obj.clone()).unwrap();
    assert_eq!(root.resolve_str("right/shared/x").unwrap(), obj);
}

#[test]
fn test_cycle_is_resolvable() {
    init_logging();

    let service = service();
    let root = service.root();
    let loop_ctx = root.bind_new_context(&ids(&["loop"])).unwrap();
    loop_ctx.bind_context(&ids(&["up"]), root.clone()).unwrap();

    let resolved = root.resolve_str("loop/up/loop/up").unwrap();
    assert_eq!(resolved.narrow_context(), Some(root.clone()));

    // break the cycle so the tree can be dropped
    loop_ctx.unbind(&ids(&["up"])).unwrap();
}

#[test]
fn test_self_reference_at_any_level() {
    init_logging();

    let (service, _, c) = sample_tree();
    let root = service.root();
    let itself = name(&[("", "")]);

    assert_eq!(root.resolve(&itself).unwrap().narrow_context(), Some(root.clone()));
    assert_eq!(c.resolve(&itself).unwrap().narrow_context(), Some(c.clone()));
    assert_eq!(root.resolve_str(".").unwrap().key(), Some(root.key()));

    // only meaningful as the whole name
    assert!(matches!(
        root.resolve(&name(&[("a", ""), ("", "")])),
        Err(NamingError::InvalidName(_))
    ));
}

#[test]
fn test_invalid_names() {
    init_logging();

    let service = service();
    let root = service.root();

    assert!(matches!(
        root.resolve(&cosnaming::Name::default()),
        Err(NamingError::InvalidName(_))
    ));
    assert!(matches!(root.to_name("a."), Err(NamingError::InvalidName(_))));
    assert!(matches!(root.resolve_str("a."), Err(NamingError::InvalidName(_))));
    assert!(matches!(root.resolve_str("a//b"), Err(NamingError::InvalidName(_))));
    assert!(matches!(
        root.bind(&name(&[("", "")]), ObjectRef::object("A")),
        Err(NamingError::InvalidName(_))
    ));
}

#[test]
fn test_destroy_guard_and_lifecycle() {
    init_logging();

    let service = service();
    let root = service.root();
    let dir = root.bind_new_context(&ids(&["dir"])).unwrap();
    dir.bind(&ids(&["x"]), ObjectRef::object("A")).unwrap();

    assert!(matches!(dir.destroy(), Err(NamingError::NotEmpty(1))));
    dir.unbind(&ids(&["x"])).unwrap();
    dir.destroy().unwrap();

    // still bound in root, but unusable
    let err = root.resolve(&ids(&["dir", "x"])).unwrap_err();
    match err {
        NamingError::CannotProceed { context, rest_of_name } => {
            assert_eq!(context, dir);
            assert_eq!(rest_of_name, ids(&["x"]));
        }
        other => panic!("expected CannotProceed, got {:?}", other),
    }
    assert!(matches!(
        dir.bind(&ids(&["y"]), ObjectRef::object("B")),
        Err(NamingError::ObjectNotExist)
    ));
    assert!(matches!(dir.list(1), Err(NamingError::ObjectNotExist)));
    assert!(matches!(dir.new_context(), Err(NamingError::ObjectNotExist)));

    root.unbind(&ids(&["dir"])).unwrap();
    assert!(root.list(10).unwrap().bindings.is_empty());
}

#[test]
fn test_bind_new_context_reports_binding_failure() {
    init_logging();

    let (service, _, _) = sample_tree();
    let root = service.root();

    assert!(matches!(
        root.bind_new_context(&ids(&["a"])),
        Err(NamingError::AlreadyBound(_))
    ));
    let err = root.bind_new_context(&ids(&["missing", "x"])).unwrap_err();
    assert_eq!(err.not_found_reason(), Some(NotFoundReason::MissingNode));
}

#[test]
fn test_rebind_type_mismatch() {
    init_logging();

    let (service, _, _) = sample_tree();
    let root = service.root();
    let other = root.new_context().unwrap();

    let err = root.rebind_context(&ids(&["a", "b"]), other).unwrap_err();
    assert_eq!(err.not_found_reason(), Some(NotFoundReason::NotContext));

    let err = root
        .rebind(&ids(&["a", "c"]), ObjectRef::object("A"))
        .unwrap_err();
    assert_eq!(err.not_found_reason(), Some(NotFoundReason::NotObject));
}

#[test]
fn test_rebind_context_over_context() {
    init_logging();

    let (service, obj, old_c) = sample_tree();
    let root = service.root();
    let new_c = root.new_context().unwrap();
    new_c.bind(&ids(&["inside"]), obj.clone()).unwrap();

    root.rebind_context(&ids(&["a", "c"]), new_c.clone()).unwrap();

    assert_eq!(
        root.resolve(&ids(&["a", "c"])).unwrap(),
        ObjectRef::Context(new_c)
    );
    assert_eq!(root.resolve_str("a/c/inside").unwrap(), obj);

    let a = root.resolve_str("a").unwrap().narrow_context().unwrap();
    let c_bindings: Vec<_> = a
        .list(10)
        .unwrap()
        .bindings
        .into_iter()
        .filter(|b| b.component().map(|c| c.id == "c").unwrap_or(false))
        .collect();
    assert_eq!(c_bindings.len(), 1);
    assert_eq!(c_bindings[0].binding_type, BindingType::Context);

    // the replaced context is detached, not destroyed
    old_c.destroy().unwrap();
}
