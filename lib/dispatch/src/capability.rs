//! Capabilities and the capability table.
//!
//! A capability is any named unit of domain logic the model may ask for. The
//! loop only knows its name, its argument convention and that it can be
//! invoked.

use crate::argument::{ArgumentConvention, Arguments};
use crate::error::CapabilityError;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::fmt;

/// The result of invoking a capability.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// Plain text.
    Text(String),
    /// A structured record; shown to the model as compact JSON.
    Record(Map<String, JsonValue>),
}

impl Observation {
    /// Creates a text observation.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Record(record) => {
                let rendered =
                    serde_json::to_string(record).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
        }
    }
}

impl From<String> for Observation {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Observation {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Map<String, JsonValue>> for Observation {
    fn from(record: Map<String, JsonValue>) -> Self {
        Self::Record(record)
    }
}

/// Trait for invocable capabilities.
///
/// Implemented for any `Fn(&Arguments) -> Result<Observation, CapabilityError>`,
/// so plain functions and closures can be registered directly.
pub trait Capability: Send + Sync {
    /// Runs the capability on already decoded arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are unusable or the work fails.
    fn invoke(&self, args: &Arguments) -> Result<Observation, CapabilityError>;
}

impl<F> Capability for F
where
    F: Fn(&Arguments) -> Result<Observation, CapabilityError> + Send + Sync,
{
    fn invoke(&self, args: &Arguments) -> Result<Observation, CapabilityError> {
        self(args)
    }
}

/// A capability together with its argument convention.
pub struct Registration {
    convention: ArgumentConvention,
    capability: Box<dyn Capability>,
}

impl Registration {
    /// The convention used to decode this capability's raw argument.
    #[must_use]
    pub fn convention(&self) -> &ArgumentConvention {
        &self.convention
    }

    /// Decodes `raw_argument` with the registered convention and invokes the
    /// capability.
    ///
    /// # Errors
    ///
    /// Returns decoding errors and capability errors unchanged.
    pub fn dispatch(&self, raw_argument: &str) -> Result<Observation, CapabilityError> {
        let args = self.convention.decode(raw_argument)?;
        self.capability.invoke(&args)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("convention", &self.convention)
            .finish_non_exhaustive()
    }
}

/// Name-keyed table of capabilities.
#[derive(Debug, Default)]
pub struct CapabilityTable {
    entries: HashMap<String, Registration>,
}

impl CapabilityTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers a capability under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::DuplicateName`] if `name` is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        convention: ArgumentConvention,
        capability: impl Capability + 'static,
    ) -> Result<&mut Self, CapabilityError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(CapabilityError::DuplicateName { name });
        }
        self.entries.insert(
            name,
            Registration {
                convention,
                capability: Box::new(capability),
            },
        );
        Ok(self)
    }

    /// Looks up a capability by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.entries.get(name)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo(args: &Arguments) -> Result<Observation, CapabilityError> {
        Ok(Observation::text(args.text(0)?))
    }

    #[test]
    fn register_and_dispatch() {
        let mut table = CapabilityTable::new();
        table
            .register("echo", ArgumentConvention::SingleText, echo)
            .expect("register");

        let observation = table
            .get("echo")
            .expect("registered")
            .dispatch("hello there")
            .expect("dispatch");
        assert_eq!(observation, Observation::text("hello there"));
    }

    #[test]
    fn register_chains_and_lists_sorted_names() {
        let mut table = CapabilityTable::new();
        table
            .register("zeta", ArgumentConvention::SingleText, echo)
            .and_then(|t| t.register("alpha", ArgumentConvention::SingleText, echo))
            .expect("register");

        assert_eq!(table.names(), vec!["alpha", "zeta"]);
        assert_eq!(table.len(), 2);
        assert!(table.contains("alpha"));
        assert!(!table.contains("Alpha"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut table = CapabilityTable::new();
        table
            .register("echo", ArgumentConvention::SingleText, echo)
            .expect("register");

        let err = table
            .register("echo", ArgumentConvention::numeric_pair(), echo)
            .unwrap_err();
        assert_eq!(
            err,
            CapabilityError::DuplicateName {
                name: "echo".to_string()
            }
        );
        assert_eq!(
            table.get("echo").expect("kept").convention(),
            &ArgumentConvention::SingleText
        );
    }

    #[test]
    fn closures_use_their_declared_convention() {
        let mut table = CapabilityTable::new();
        table
            .register(
                "sum",
                ArgumentConvention::numeric_pair(),
                |args: &Arguments| -> Result<Observation, CapabilityError> {
                    Ok(format!("{}", args.number(0)? + args.number(1)?).into())
                },
            )
            .expect("register");

        let registration = table.get("sum").expect("registered");
        assert_eq!(
            registration.dispatch("1.5, 2").expect("dispatch"),
            Observation::text("3.5")
        );
        assert!(matches!(
            registration.dispatch("one, two"),
            Err(CapabilityError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn record_display_is_compact_json() {
        let mut record = Map::new();
        record.insert("max_emi_allowed".to_string(), json!(15000.0));
        record.insert("max_loan_amount".to_string(), json!(1_502_434.11));

        let observation = Observation::from(record);
        assert_eq!(
            observation.to_string(),
            r#"{"max_emi_allowed":15000.0,"max_loan_amount":1502434.11}"#
        );
    }
}
