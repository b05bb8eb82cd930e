use hhat_graph::prelude::*;
use hhat_ir::prelude::*;

fn int_add() -> FnDef {
    FnDef::builtin(FnHeaderDef::new(
        "add",
        "int",
        [
            (Symbol::from("a"), Name::from("int")),
            (Symbol::from("b"), Name::from("int")),
        ],
    ))
}

fn int_add_header() -> FnHeader {
    FnHeader::new("add", [Name::from("int"), Name::from("int")])
}

fn unit_a() -> Ir {
    let mut table = SymbolTable::new();
    table.fns_mut().add(int_add());
    Ir::standalone(IrModule::new("src/a", table).unwrap())
}

fn unit_b() -> Ir {
    let a = IrHash::new("src/a").unwrap();
    let refs = build_reftable([], [(int_add_header(), a)]).unwrap();
    Ir::new(IrModule::new("src/b", SymbolTable::new()).unwrap(), refs)
}

#[test]
fn reference_to_present_unit_resolves() {
    let mut graph = IrGraph::new();
    let a = graph.add_node(unit_a()).unwrap();
    let b = graph.add_node(unit_b()).unwrap();

    graph.build().unwrap();
    assert!(graph.is_built());

    let def = resolve_fn(&b, &int_add_header(), &graph).unwrap();
    assert_eq!(def, &int_add());

    let direct = get_fn(&a, &int_add_header(), &graph)
        .and_then(|lookup| lookup.single())
        .unwrap();
    assert_eq!(direct, def);

    assert_eq!(graph.dependencies_of(&b).unwrap(), vec![&a]);
    assert_eq!(graph.link_order().unwrap(), vec![&a, &b]);
}

#[test]
fn reference_to_missing_unit_fails() {
    let d = IrHash::new("src/d").unwrap();
    let refs = build_reftable([(Name::from("point"), d.clone())], []).unwrap();
    let c = Ir::new(IrModule::new("src/c", SymbolTable::new()).unwrap(), refs);

    let mut graph = IrGraph::new();
    let c = graph.add_node(c).unwrap();

    let Err(GraphError::MissingReferences { errors }) = graph.build() else {
        panic!("expected missing references");
    };

    assert_eq!(errors.len(), 1);
    let missing = &errors.as_slice()[0];
    assert_eq!(missing.from, c);
    assert_eq!(missing.expected, d);
    assert_eq!(missing.symbol, RefKind::Type(Name::from("point")));

    assert!(!graph.is_built());
    assert_eq!(graph.build(), Err(GraphError::Unusable));
    assert!(matches!(
        graph.get_fns("src/c", &Name::from("add")),
        Err(GraphError::Unusable)
    ));
    assert!(!graph.contains_path("src/c"));
}

#[test]
fn empty_graph_cannot_build() {
    let mut graph = IrGraph::new();
    assert_eq!(graph.build(), Err(GraphError::Empty));

    // still usable
    graph.add_node(unit_a()).unwrap();
    graph.build().unwrap();
}

#[test]
fn second_build_keeps_index() {
    let mut graph = IrGraph::new();
    let a = graph.add_node(unit_a()).unwrap();
    let b = graph.add_node(unit_b()).unwrap();
    graph.build().unwrap();

    let before = graph.nodes().unwrap().phf().copied();

    assert_eq!(graph.build(), Err(GraphError::AlreadyBuilt));
    assert!(graph.is_built());
    assert_eq!(graph.nodes().unwrap().phf().copied(), before);
    assert!(graph.get_node(&a).unwrap().is_some());
    assert!(graph.get_node(&b).unwrap().is_some());
}

#[test]
fn every_node_is_indexed() {
    let mut graph = IrGraph::new();
    let hashes = ["src/a", "src/b", "src/c", "src/math/x", "src/io", "lib/y"]
        .into_iter()
        .map(|path| {
            let module = IrModule::new(path, SymbolTable::new()).unwrap();
            graph.add_node(Ir::standalone(module)).unwrap()
        })
        .collect::<Vec<_>>();

    graph.build().unwrap();
    let nodes = graph.nodes().unwrap();

    for hash in &hashes {
        let node = nodes.get(hash).unwrap().unwrap();
        assert_eq!(node.hash(), hash);
    }
}

#[test]
fn rebuilding_is_deterministic() {
    let build = || {
        let mut graph = IrGraph::new();
        graph.add_node(unit_a()).unwrap();
        graph.add_node(unit_b()).unwrap();
        graph.add_main_node(Ir::standalone(
            IrModule::new("src/main", SymbolTable::new()).unwrap(),
        ))
        .unwrap();
        graph.build().unwrap();
        graph
    };

    let first = build();
    let second = build();

    assert_eq!(
        first.nodes().unwrap().phf(),
        second.nodes().unwrap().phf()
    );
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn get_fns_matches_before_and_after_build() {
    let float_add = FnDef::builtin(FnHeaderDef::new(
        "add",
        "float",
        [
            (Symbol::from("a"), Name::from("float")),
            (Symbol::from("b"), Name::from("float")),
        ],
    ));

    let mut table = SymbolTable::new();
    table.fns_mut().add(int_add());
    table.fns_mut().add(float_add.clone());

    let mut graph = IrGraph::new();
    graph
        .add_node(Ir::standalone(IrModule::new("src/a", table).unwrap()))
        .unwrap();
    graph.add_node(unit_b()).unwrap();

    let add = Name::from("add");
    let before = graph.get_fns("src/a", &add).unwrap().clone();
    graph.build().unwrap();
    let after = graph.get_fns("src/a", &add).unwrap();

    assert_eq!(&before, after);
    assert_eq!(
        after.values().collect::<Vec<_>>(),
        vec![&int_add(), &float_add]
    );

    assert!(matches!(
        graph.get_fns("src/a", &Name::from("mul")),
        Err(GraphError::Lookup(LookupError::UnknownSymbol { .. }))
    ));
    assert!(matches!(
        graph.get_fns("src/zzz", &add),
        Err(GraphError::Lookup(LookupError::UnknownUnit { .. }))
    ));
}

#[test]
fn discovery_checks() {
    let mut graph = IrGraph::new();
    graph.add_node(unit_a()).unwrap();

    assert!(graph.contains_path("src/a"));
    assert!(graph.contains_path("src/x/../a"));
    assert!(!graph.contains_path("src/b"));
    assert!(graph.contains_symbol("src/a", &Name::from("add")));
    assert!(graph.contains_symbol("src/a", &int_add_header()));
    assert!(!graph.contains_symbol("src/a", &Name::from("sub")));
}

#[test]
fn reference_cycle_is_reported_by_link_order() {
    let a = IrHash::new("src/a").unwrap();
    let b = IrHash::new("src/b").unwrap();

    let to_b = build_reftable([(Name::from("t"), b.clone())], []).unwrap();
    let to_a = build_reftable([(Name::from("s"), a.clone())], []).unwrap();

    let mut graph = IrGraph::new();
    graph
        .add_node(Ir::new(IrModule::new("src/a", SymbolTable::new()).unwrap(), to_b))
        .unwrap();
    graph
        .add_node(Ir::new(IrModule::new("src/b", SymbolTable::new()).unwrap(), to_a))
        .unwrap();

    graph.build().unwrap();

    let Err(GraphError::Cycle(cycle)) = graph.link_order() else {
        panic!("expected a cycle");
    };
    assert_eq!(cycle.path().len(), 3);
    assert_eq!(cycle.path().first(), cycle.path().last());
}
