//! Macros for ergonomic ruleset and subject definitions.

/// Build a guard-free [`Ruleset`](crate::Ruleset) from `origin => event` pairs.
///
/// # Example
///
/// ```
/// use fsm_guard::core::TransitionKey;
/// use fsm_guard::{ruleset, Ruleset};
///
/// let rules: Ruleset<()> = ruleset! {
///     "pending" => "started",
///     "started" => "finished",
/// };
///
/// assert_eq!(rules.len(), 2);
/// assert!(rules.contains(&TransitionKey::new("pending", "started")));
/// ```
#[macro_export]
macro_rules! ruleset {
    ($($origin:expr => $event:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut rules = $crate::ruleset::Ruleset::new();
        $(
            rules.add_transition($crate::core::TransitionKey::new($origin, $event));
        )*
        rules
    }};
}

/// Implement [`Stater`](crate::core::Stater) for a struct that keeps its
/// state in a [`State`](crate::core::State) field.
///
/// # Example
///
/// ```
/// use fsm_guard::core::{State, Stater};
/// use fsm_guard::stater;
///
/// struct Deployment {
///     phase: State,
///     replicas: u32,
/// }
///
/// stater!(Deployment, phase);
///
/// let mut deployment = Deployment { phase: State::from("queued"), replicas: 3 };
/// deployment.set_state(State::from("rolling"));
/// assert_eq!(deployment.current_state(), "rolling");
/// ```
#[macro_export]
macro_rules! stater {
    ($subject:ty, $field:ident) => {
        impl $crate::core::Stater for $subject {
            fn current_state(&self) -> &$crate::core::State {
                &self.$field
            }

            fn set_state(&mut self, state: $crate::core::State) {
                self.$field = state;
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{State, Stater, TransitionKey};
    use crate::ruleset::Ruleset;

    #[derive(Clone)]
    struct Light {
        color: State,
    }

    stater!(Light, color);

    #[test]
    fn ruleset_macro_registers_every_pair() {
        let rules: Ruleset<Light> = ruleset! {
            "green" => "yellow",
            "yellow" => "red",
            "red" => "green",
        };

        assert_eq!(rules.len(), 3);
        for (origin, event) in [("green", "yellow"), ("yellow", "red"), ("red", "green")] {
            let key = TransitionKey::new(origin, event);
            assert_eq!(rules.guards(&key).map(<[_]>::len), Some(0));
        }
    }

    #[test]
    fn empty_ruleset_macro() {
        let rules: Ruleset<Light> = ruleset! {};
        assert!(rules.is_empty());
    }

    #[test]
    fn stater_macro_reads_and_writes_field() {
        let mut light = Light {
            color: State::from("green"),
        };
        assert_eq!(light.current_state(), "green");

        light.set_state(State::from("yellow"));
        assert_eq!(light.color, "yellow");
    }

    #[test]
    fn macros_compose_with_permitted() {
        let rules: Ruleset<Light> = ruleset! { "green" => "yellow" };
        let light = Light {
            color: State::from("green"),
        };

        assert!(rules.permitted(&light, &State::from("yellow")).is_ok());
        assert!(rules.permitted(&light, &State::from("red")).is_err());
    }
}
