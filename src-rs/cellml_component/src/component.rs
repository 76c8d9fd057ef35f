//! Component and variable payloads.
//!
//! These types carry the data a component holds besides its position in the
//! hierarchy. Nothing here is interpreted: names, ids, units and maths are
//! stored and echoed back by the serialiser unchanged.

/// The payload of a single component.
///
/// The encapsulation relationships of a component live in the
/// [`ComponentTree`](crate::ComponentTree) that owns it, not here.
///
/// An empty name or id is treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    name: String,
    id: String,
    math: String,
    variables: Vec<Variable>,
}

impl Component {
    /// Creates an anonymous component with no variables and no maths.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: String::new(),
            id: String::new(),
            math: String::new(),
            variables: Vec::new(),
        }
    }

    /// Creates a component with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Returns the name of the component, or `None` if it is unset.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Returns `true` if the component's name is exactly `name`.
    ///
    /// An empty `name` matches nothing, anonymous components included.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        !name.is_empty() && self.name == name
    }

    /// Sets the name of the component. An empty string unsets it.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the id of the component, or `None` if it is unset.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    /// Sets the id of the component. An empty string unsets it.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Returns the maths attached to the component, or `None` if there is none.
    #[must_use]
    pub fn math(&self) -> Option<&str> {
        non_empty(&self.math)
    }

    /// Replaces the maths attached to the component.
    ///
    /// Whitespace around the maths is not kept, so blank maths counts as
    /// none.
    pub fn set_math(&mut self, math: impl Into<String>) {
        self.math = math.into();
        trim_in_place(&mut self.math);
    }

    /// Appends to the maths attached to the component, then trims the
    /// result like [`set_math`](Self::set_math).
    pub fn append_math(&mut self, math: &str) {
        self.math.push_str(math);
        trim_in_place(&mut self.math);
    }

    /// Removes the maths attached to the component.
    pub fn remove_math(&mut self) {
        self.math.clear();
    }

    /// Returns the variables of the component, in insertion order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Appends a variable to the component.
    pub fn add_variable(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    /// Returns the first variable called `name`.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|variable| variable.name == name)
    }

    /// Returns the first variable called `name`, mutably.
    #[must_use]
    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables
            .iter_mut()
            .find(|variable| variable.name == name)
    }

    /// Removes the first variable called `name` and returns it.
    pub fn remove_variable(&mut self, name: &str) -> Option<Variable> {
        let position = self
            .variables
            .iter()
            .position(|variable| variable.name == name)?;
        Some(self.variables.remove(position))
    }

    /// Returns `true` if the component has variables or maths, in which case
    /// it cannot be written as a self-closing tag.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.variables.is_empty() || self.math().is_some()
    }
}

/// An opaque variable record carried by a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variable {
    name: String,
    units: String,
    initial_value: String,
    id: String,
}

impl Variable {
    /// Creates a variable with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the units name, builder style.
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Sets the initial value, builder style.
    #[must_use]
    pub fn with_initial_value(mut self, initial_value: impl Into<String>) -> Self {
        self.initial_value = initial_value.into();
        self
    }

    /// Sets the id, builder style.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns the name of the variable, or `None` if it is unset.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Returns the name of the units, or `None` if it is unset.
    #[must_use]
    pub fn units(&self) -> Option<&str> {
        non_empty(&self.units)
    }

    /// Sets the name of the units.
    pub fn set_units(&mut self, units: impl Into<String>) {
        self.units = units.into();
    }

    /// Returns the initial value, or `None` if it is unset.
    #[must_use]
    pub fn initial_value(&self) -> Option<&str> {
        non_empty(&self.initial_value)
    }

    /// Sets the initial value.
    pub fn set_initial_value(&mut self, initial_value: impl Into<String>) {
        self.initial_value = initial_value.into();
    }

    /// Returns the id, or `None` if it is unset.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn trim_in_place(value: &mut String) {
    value.truncate(value.trim_end().len());
    let leading = value.len() - value.trim_start().len();
    value.drain(..leading);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_component() {
        let component = Component::new();
        assert_eq!(component.name(), None);
        assert_eq!(component.id(), None);
        assert!(!component.has_name(""));
        assert!(!component.has_content());
    }

    #[test]
    fn empty_name_matches_nothing() {
        let component = Component::named("membrane");
        assert!(component.has_name("membrane"));
        assert!(!component.has_name(""));
        assert!(!component.has_name("Membrane"));
    }

    #[test]
    fn math_is_trimmed() {
        let mut component = Component::new();
        component.set_math("\n  <math/> \t");
        assert_eq!(component.math(), Some("<math/>"));

        component.append_math(" <apply/>\n");
        assert_eq!(component.math(), Some("<math/> <apply/>"));

        component.set_math("  \n ");
        assert_eq!(component.math(), None);
        assert!(!component.has_content());
    }

    #[test]
    fn empty_name_is_unset() {
        let mut component = Component::named("membrane");
        assert_eq!(component.name(), Some("membrane"));

        component.set_name("");
        assert_eq!(component.name(), None);
    }

    #[test]
    fn math_is_appended() {
        let mut component = Component::new();
        component.append_math("<math>");
        component.append_math("</math>");
        assert_eq!(component.math(), Some("<math></math>"));
        assert!(component.has_content());

        component.remove_math();
        assert_eq!(component.math(), None);
    }

    #[test]
    fn variables_keep_order() {
        let mut component = Component::named("gate");
        component.add_variable(Variable::new("alpha").with_units("per_ms"));
        component.add_variable(Variable::new("beta").with_initial_value("0.5"));

        let names: Vec<_> = component
            .variables()
            .iter()
            .map(Variable::name)
            .collect();
        assert_eq!(names, [Some("alpha"), Some("beta")]);

        let alpha = component.variable("alpha").expect("alpha was added");
        assert_eq!(alpha.units(), Some("per_ms"));
        assert_eq!(alpha.initial_value(), None);
    }

    #[test]
    fn remove_variable() {
        let mut component = Component::new();
        component.add_variable(Variable::new("v"));

        let removed = component.remove_variable("v").expect("v was added");
        assert_eq!(removed.name(), Some("v"));
        assert!(component.remove_variable("v").is_none());
        assert!(component.variables().is_empty());
    }

    #[test]
    fn edit_variable_in_place() {
        let mut component = Component::new();
        component.add_variable(Variable::new("V"));

        let variable = component.variable_mut("V").expect("V was added");
        variable.set_units("mV");
        variable.set_initial_value("-85");

        let variable = component.variable("V").expect("V was added");
        assert_eq!(variable.units(), Some("mV"));
        assert_eq!(variable.initial_value(), Some("-85"));
    }
}
