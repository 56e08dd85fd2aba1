//! Behaviour-driven step definitions driving the resolve CLI scenarios.

use super::helpers::{StubEngineFactory, man_mo_article, parse_output};
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tokio::runtime::Runtime;
use waypost_engine::test_support::{StubGeoSearch, StubKnowledgeBase};

struct ResolveWorld {
    runtime: Runtime,
    factory: RefCell<Option<StubEngineFactory>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl ResolveWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("tokio runtime");
        Self {
            runtime,
            factory: RefCell::new(None),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn run(&self, argv: &[&str]) {
        let mut invocation = vec!["waypost", "resolve"];
        invocation.extend_from_slice(argv);
        let outcome = match Cli::try_parse_from(invocation) {
            Ok(cli) => {
                let factory = self.factory.borrow();
                let factory = factory.as_ref().expect("knowledge base configured");
                let mut buffer = self.stdout.borrow_mut();
                self.runtime
                    .block_on(run_with(cli.command, factory, &mut *buffer))
            }
            Err(err) => Err(CliError::from(err)),
        };
        self.result.replace(Some(outcome));
    }

    fn error(&self) -> String {
        let borrowed = self.result.borrow();
        match borrowed.as_ref().expect("result recorded") {
            Ok(()) => panic!("expected the command to fail"),
            Err(err) => format!("{err:?}"),
        }
    }
}

#[fixture]
fn world() -> ResolveWorld {
    ResolveWorld::new()
}

#[given("a knowledge base holding the Man Mo Temple article")]
fn knowledge_base_with_man_mo(#[from(world)] world: &ResolveWorld) {
    world.factory.replace(Some(StubEngineFactory::new(
        StubGeoSearch::new(),
        StubKnowledgeBase::new().with_article(man_mo_article()),
    )));
}

#[when("I run the resolve command for Man Mo Temple")]
fn run_resolve_for_man_mo(#[from(world)] world: &ResolveWorld) {
    world.run(&["Man Mo Temple"]);
}

#[when("I run the resolve command without a name")]
fn run_resolve_without_name(#[from(world)] world: &ResolveWorld) {
    world.run(&[]);
}

#[when("I run the resolve command with only a latitude")]
fn run_resolve_with_latitude(#[from(world)] world: &ResolveWorld) {
    world.run(&["Man Mo Temple", "--lat", "22.2839"]);
}

#[then("the command succeeds and prints the Man Mo Temple article")]
fn command_prints_article(#[from(world)] world: &ResolveWorld) {
    let borrowed = world.result.borrow();
    borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect("expected success");

    let output = parse_output(&world.stdout.borrow());
    assert_eq!(output["status"], "resolved");
    assert_eq!(output["title"], "Man Mo Temple");
}

#[then("the command fails because the name is missing")]
fn command_fails_missing_name(#[from(world)] world: &ResolveWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref().expect("result recorded") {
        Err(CliError::MissingArgument { field, .. }) => assert_eq!(*field, ARG_NAME),
        _ => panic!("expected MissingArgument, found {}", world.error()),
    }
}

#[then("the command fails because the location is incomplete")]
fn command_fails_incomplete_location(#[from(world)] world: &ResolveWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref().expect("result recorded") {
        Err(CliError::IncompleteLocation) => {}
        _ => panic!("expected IncompleteLocation, found {}", world.error()),
    }
}

macro_rules! register_resolve_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/resolve_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: ResolveWorld) {
            let _ = world;
        }
    };
}

register_resolve_scenario!(resolve_happy_path, "resolving a known temple");
register_resolve_scenario!(resolve_missing_name, "rejecting a missing name");
register_resolve_scenario!(resolve_incomplete_location, "rejecting half a location");
