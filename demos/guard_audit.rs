//! Guard Audit
//!
//! This example contrasts the short-circuiting decision with the
//! collect-all audit.
//!
//! Key concepts:
//! - `permitted` stops at the first failing guard
//! - `audit` runs every guard and accumulates every denial
//! - Sequential evaluation as an alternative to parallel guards
//!
//! Run with: cargo run --example guard_audit

use fsm_guard::{stater, Evaluation, Guard, Ruleset, State};
use stillwater::Validation;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Article {
    state: State,
    title: String,
    author: Option<String>,
    word_count: usize,
}

stater!(Article, state);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Guard Audit Example ===\n");

    let mut rules = Ruleset::new().with_evaluation(Evaluation::Sequential);
    rules.add_transition(("draft", "review"));
    rules.add_guard(
        ("review", "published"),
        Guard::require(
            |a: &Article, _: &State| !a.title.is_empty(),
            "title is missing",
        ),
    );
    rules.add_guard(
        ("review", "published"),
        Guard::require(
            |a: &Article, _: &State| a.author.is_some(),
            "author is missing",
        ),
    );
    rules.add_guard(
        ("review", "published"),
        Guard::require(
            |a: &Article, _: &State| a.word_count >= 300,
            "article is shorter than 300 words",
        ),
    );

    let article = Article {
        state: State::from("review"),
        title: String::new(),
        author: None,
        word_count: 120,
    };
    let goal = State::from("published");

    println!("Example 1: First failure");
    match rules.permitted(&article, &goal) {
        Ok(()) => println!("  approved"),
        Err(err) => println!("  {err}"),
    }

    println!("\nExample 2: Every failure");
    match rules.audit(&article, &goal) {
        Validation::Success(()) => println!("  approved"),
        Validation::Failure(errors) => {
            for err in errors.iter() {
                println!("  - {err}");
            }
        }
    }

    println!("\nExample 3: Unknown transition");
    if let Validation::Failure(errors) = rules.audit(&article, &State::from("archived")) {
        println!("  {}", errors.head());
    }

    println!("\n=== Example Complete ===");
}
