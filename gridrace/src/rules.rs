use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Handler;

/// When does a competitor win?
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WinRule {
    /// The first competitor whose move touches the end line wins.
    #[default]
    FirstCrossing,
}

/// What happens to a competitor whose move leaves the track?
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrashRule {
    /// The competitor is out of the race.
    #[default]
    LeaveRace,
    /// The competitor stays where they were and loses their turn.
    ContinueWithPenalty,
}

/// What happens to a competitor who moves onto an occupied cell?
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionRule {
    /// The move goes through and both competitors share the cell.
    Allowed,
    /// The move is rejected and the competitor has to choose again.
    #[default]
    NotAllowed,
}

/// One rule of each kind, which together decide the outcome of every move.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub win: WinRule,
    pub crash: CrashRule,
    pub collision: CollisionRule,
}

impl RuleSet {
    /// The handlers for these rules, in the order they must run.
    pub fn handlers(&self) -> Vec<Handler> {
        vec![
            Handler::Win(self.win),
            Handler::Crash(self.crash),
            Handler::Collision(self.collision),
        ]
    }
}

/// The error type for the [`FromStr`] instances of the rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownRule {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

impl std::error::Error for UnknownRule {}

impl std::fmt::Display for UnknownRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown {} rule '{}', expected one of: {}",
            self.kind,
            self.value,
            self.expected.join(", ")
        )
    }
}

macro_rules! rule_names {
    ($rule:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $rule {
            pub const NAMES: &'static [&'static str] = &[$($name),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($rule::$variant => $name),+
                }
            }
        }

        impl FromStr for $rule {
            type Err = UnknownRule;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($rule::$variant),)+
                    _ => Err(UnknownRule {
                        kind: $kind,
                        value: String::from(s),
                        expected: $rule::NAMES,
                    }),
                }
            }
        }

        impl std::fmt::Display for $rule {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

rule_names!(WinRule, "win", { FirstCrossing => "first-crossing" });
rule_names!(CrashRule, "crash", {
    LeaveRace => "leave-race",
    ContinueWithPenalty => "continue-with-penalty",
});
rule_names!(CollisionRule, "collision", {
    Allowed => "allowed",
    NotAllowed => "not-allowed",
});
