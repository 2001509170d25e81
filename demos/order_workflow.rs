//! Order Workflow
//!
//! This example walks an order through its life-cycle with a machine.
//!
//! Key concepts:
//! - Transition table built with the `ruleset!` macro
//! - Guards that inspect the subject and veto transitions
//! - Invalid transitions vs. guard denials
//! - The subject's state only changes on approval
//!
//! Run with: RUST_LOG=fsm_guard=debug cargo run --example order_workflow

use fsm_guard::{ruleset, stater, Guard, GuardError, Machine, Ruleset, State, TransitionError};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Order {
    id: u64,
    state: State,
    paid: bool,
    items: usize,
}

stater!(Order, state);

fn order_rules() -> Ruleset<Order> {
    let mut rules: Ruleset<Order> = ruleset! {
        "cart" => "placed",
        "placed" => "paid",
        "paid" => "shipped",
        "shipped" => "delivered",
        "placed" => "cancelled",
    };

    rules.add_guard(
        ("cart", "placed"),
        Guard::require(|order: &Order, _: &State| order.items > 0, "cart is empty"),
    );
    rules.add_guard(
        ("paid", "shipped"),
        Guard::named("payment captured", |order: &Order, _: &State| {
            if order.paid {
                Ok(())
            } else {
                let reason = format!("order {} has no captured payment", order.id);
                Err(GuardError::denied(reason))
            }
        }),
    );

    rules
}

fn report(goal: &str, outcome: Result<(), TransitionError>) {
    match outcome {
        Ok(()) => println!("  -> {goal}: ok"),
        Err(err @ TransitionError::InvalidTransition { .. }) => {
            println!("  -> {goal}: no such transition ({err})")
        }
        Err(err) => println!("  -> {goal}: forbidden ({err})"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Order Workflow Example ===\n");

    let rules = order_rules();
    let mut order = Order {
        id: 42,
        state: State::from("cart"),
        paid: false,
        items: 0,
    };

    println!("Order {} starts in '{}'", order.id, order.state);
    let reachable = rules.targets_from(&order.state);
    println!("Reachable from cart: {reachable:?}\n");

    {
        let mut machine = Machine::new(rules.clone(), &mut order);
        report("placed", machine.transition("placed"));
        report("shipped", machine.transition("shipped"));
    }

    order.items = 3;
    {
        let mut machine = Machine::new(rules.clone(), &mut order);
        report("placed", machine.transition("placed"));
        report("paid", machine.transition("paid"));
        report("shipped", machine.transition("shipped"));
    }

    order.paid = true;
    {
        let mut machine = Machine::new(rules, &mut order);
        report("shipped", machine.transition("shipped"));
        report("delivered", machine.transition("delivered"));
    }

    println!("\nOrder {} finished in '{}'", order.id, order.state);
    println!("\n=== Example Complete ===");
}
