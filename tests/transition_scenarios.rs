//! End-to-end scenarios for rulesets and machines.

use fsm_guard::{stater, Evaluation, GuardError, Machine, Ruleset, State, TransitionError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Minimal subject holding nothing but its state.
#[derive(Clone, Debug, Default)]
struct Thing {
    state: State,
}

stater!(Thing, state);

/// Subject that cannot be cloned.
struct Ledger {
    state: State,
    entries: Vec<i64>,
}

stater!(Ledger, state);

impl Thing {
    fn in_state(state: &str) -> Self {
        Thing {
            state: State::from(state),
        }
    }
}

fn pending_started_finished() -> Ruleset<Thing> {
    let mut rules = Ruleset::new();
    rules.add_transition(("pending", "started"));
    rules.add_transition(("started", "finished"));
    rules
}

fn policy_store_offline(_: &Thing, _: &State) -> Result<(), GuardError> {
    panic!("policy store offline")
}

fn invalid(from: &str, to: &str) -> Result<(), TransitionError> {
    Err(TransitionError::InvalidTransition {
        from: State::from(from),
        to: State::from(to),
    })
}

#[test]
fn ruleset_transitions() {
    let rules = Ruleset::from_transitions([("pending", "started"), ("started", "finished")]);

    let examples = [
        // a subject is responsible for choosing its initial state
        ("", "started", false),
        ("", "pending", false),
        ("", "finished", false),
        ("pending", "started", true),
        ("pending", "pending", false),
        ("pending", "finished", false),
        ("started", "started", false),
        ("started", "pending", false),
        ("started", "finished", true),
    ];

    for (from, goal, allowed) in examples {
        let outcome = rules.permitted(&Thing::in_state(from), &State::from(goal));
        if allowed {
            assert_eq!(outcome, Ok(()), "{from} -> {goal}");
        } else {
            assert_eq!(outcome, invalid(from, goal), "{from} -> {goal}");
        }
    }
}

#[test]
fn ruleset_parallel_guarding() {
    let mut rules = pending_started_finished();
    let slow_finished = Arc::new(AtomicUsize::new(0));

    let finished = Arc::clone(&slow_finished);
    rules.add_rule(("started", "finished"), move |_: &Thing, _: &State| {
        thread::sleep(Duration::from_secs(1));
        finished.fetch_add(1, Ordering::SeqCst);
        Err(GuardError::denied("slow error"))
    });
    rules.add_rule(("started", "finished"), |_: &Thing, _: &State| {
        Err(GuardError::denied("some error"))
    });

    let started = Instant::now();
    let outcome = rules.permitted(&Thing::in_state("started"), &State::from("finished"));
    let elapsed = started.elapsed();

    assert_eq!(
        outcome,
        Err(TransitionError::Denied {
            from: State::from("started"),
            to: State::from("finished"),
            source: GuardError::denied("some error"),
        })
    );
    assert!(elapsed < Duration::from_millis(800), "took {elapsed:?}");
    // the slow guard was not awaited
    assert_eq!(slow_finished.load(Ordering::SeqCst), 0);
}

#[test]
fn machine_transition() {
    let rules = pending_started_finished();
    let mut some_thing = Thing::in_state("pending");

    {
        let mut machine = Machine::builder()
            .rules(rules)
            .subject(&mut some_thing)
            .build()
            .unwrap();

        // cannot transition to the current state
        assert_eq!(machine.transition("pending"), invalid("pending", "pending"));
        assert_eq!(machine.current_state(), "pending");

        // cannot skip states
        assert_eq!(
            machine.transition("finished"),
            invalid("pending", "finished")
        );
        assert_eq!(machine.current_state(), "pending");

        // can move to the next valid state
        assert_eq!(machine.transition("started"), Ok(()));
    }

    assert_eq!(some_thing.state, "started");
}

#[test]
fn machine_on_unset_subject() {
    let rules = pending_started_finished();
    let mut thing = Thing::default();

    let mut machine = Machine::new(rules, &mut thing);
    assert_eq!(machine.transition("started"), invalid("", "started"));
    drop(machine);

    assert!(thing.state.is_unset());
}

#[test]
fn machine_rejects_unregistered_self_loop() {
    let rules = pending_started_finished();
    let mut thing = Thing::in_state("started");

    let mut machine = Machine::new(rules, &mut thing);
    assert_eq!(machine.transition("started"), invalid("started", "started"));
    assert_eq!(machine.current_state(), "started");
}

#[test]
fn permitted_is_shared_across_threads() {
    let mut rules = pending_started_finished();
    rules.add_rule(("started", "finished"), |_: &Thing, goal: &State| {
        thread::sleep(Duration::from_millis(2));
        if goal == "finished" {
            Ok(())
        } else {
            Err(GuardError::denied("wrong goal"))
        }
    });
    rules.add_rule(("started", "finished"), |_: &Thing, _: &State| Ok(()));
    let rules = Arc::new(rules);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                let (from, to, allowed) = if i % 2 == 0 {
                    ("started", "finished", true)
                } else {
                    ("pending", "finished", false)
                };
                let outcome = rules.permitted(&Thing::in_state(from), &State::from(to));
                assert_eq!(outcome.is_ok(), allowed);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn guard_panic_is_a_denial() {
    for evaluation in [Evaluation::Parallel, Evaluation::Sequential] {
        let mut rules = pending_started_finished().with_evaluation(evaluation);
        rules.add_rule(("pending", "started"), |_: &Thing, _: &State| Ok(()));
        rules.add_rule(("pending", "started"), policy_store_offline);

        let mut thing = Thing::in_state("pending");
        let mut machine = Machine::new(rules, &mut thing);
        let err = machine.transition("started").unwrap_err();

        assert_eq!(
            err.guard_error(),
            Some(&GuardError::faulted("policy store offline")),
            "{evaluation:?}"
        );
        assert_eq!(machine.current_state(), "pending");
    }
}

#[test]
fn shared_subject_races_guards_without_cloning() {
    let mut rules = Ruleset::from_transitions([("open", "closed")]);
    rules.add_rule(("open", "closed"), |_: &Ledger, _: &State| {
        thread::sleep(Duration::from_secs(1));
        Ok(())
    });
    rules.add_rule(("open", "closed"), |ledger: &Ledger, _: &State| {
        if ledger.entries.iter().sum::<i64>() == 0 {
            Ok(())
        } else {
            Err(GuardError::denied("ledger does not balance"))
        }
    });

    let ledger = Arc::new(Ledger {
        state: State::from("open"),
        entries: vec![10, -4],
    });
    let closed = State::from("closed");

    let started = Instant::now();
    let err = rules.permitted_shared(&ledger, &closed).unwrap_err();

    assert!(started.elapsed() < Duration::from_millis(800));
    assert_eq!(
        err.guard_error(),
        Some(&GuardError::denied("ledger does not balance"))
    );
}

#[test]
fn inline_machine_needs_no_clone() {
    let mut rules = Ruleset::from_transitions([("open", "closed")]);
    rules.add_rule(("open", "closed"), |ledger: &Ledger, _: &State| {
        if ledger.entries.is_empty() {
            Ok(())
        } else {
            Err(GuardError::denied("ledger has entries"))
        }
    });

    let mut ledger = Ledger {
        state: State::from("open"),
        entries: Vec::new(),
    };
    let mut machine = Machine::new(rules, &mut ledger);

    assert_eq!(machine.transition_inline("closed"), Ok(()));
    assert_eq!(machine.transition_inline("open"), invalid("closed", "open"));
    drop(machine);

    assert_eq!(ledger.state, "closed");
}
