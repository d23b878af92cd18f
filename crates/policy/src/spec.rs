//! Declarative policy specifications.

use std::fmt;

use crate::PolicyRef;

/// The authorization rule attached to an operation.
///
/// The OR-group only exists as a [`Clause`] of [`PolicySpec::All`], so a
/// spec is always a conjunction of disjunctions over independent leaves.
///
/// Raw shapes normalise through `From`:
///
/// | input                       | spec                         |
/// |-----------------------------|------------------------------|
/// | `None`                      | `Always`                     |
/// | `PolicyRef<C>`              | `Single`                     |
/// | `Vec<PolicyRef<C>>`         | `All` of plain policies      |
/// | `Vec<Vec<PolicyRef<C>>>`    | `All` of `AnyOf` groups      |
/// | `Vec<Clause<C>>`            | `All` of mixed clauses       |
pub enum PolicySpec<C> {
    /// No restriction.
    Always,
    /// A single policy.
    Single(PolicyRef<C>),
    /// Every clause must hold.
    All(Vec<Clause<C>>),
}

/// One element of a [`PolicySpec::All`] conjunction.
pub enum Clause<C> {
    /// A plain policy.
    Policy(PolicyRef<C>),
    /// Holds if any member holds.
    AnyOf(Vec<PolicyRef<C>>),
}

impl<C> PolicySpec<C> {
    pub fn always() -> Self {
        Self::Always
    }

    pub fn single(policy: PolicyRef<C>) -> Self {
        Self::Single(policy)
    }

    /// Conjunction of plain policies.
    pub fn all(policies: impl IntoIterator<Item = PolicyRef<C>>) -> Self {
        Self::All(policies.into_iter().map(Clause::Policy).collect())
    }

    /// Conjunction of clauses, each either a policy or an OR-group.
    pub fn all_of(clauses: impl IntoIterator<Item = Clause<C>>) -> Self {
        Self::All(clauses.into_iter().collect())
    }

    /// Number of policy tests one decision runs.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Always => 0,
            Self::Single(_) => 1,
            Self::All(clauses) => clauses.iter().map(Clause::leaf_count).sum(),
        }
    }
}

impl<C> Clause<C> {
    pub fn any_of(policies: impl IntoIterator<Item = PolicyRef<C>>) -> Self {
        Self::AnyOf(policies.into_iter().collect())
    }

    fn leaf_count(&self) -> usize {
        match self {
            Self::Policy(_) => 1,
            Self::AnyOf(group) => group.len(),
        }
    }
}

impl<C> Default for PolicySpec<C> {
    fn default() -> Self {
        Self::Always
    }
}

impl<C> Clone for PolicySpec<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Always => Self::Always,
            Self::Single(policy) => Self::Single(policy.clone()),
            Self::All(clauses) => Self::All(clauses.clone()),
        }
    }
}

impl<C> Clone for Clause<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Policy(policy) => Self::Policy(policy.clone()),
            Self::AnyOf(group) => Self::AnyOf(group.clone()),
        }
    }
}

impl<C> fmt::Debug for PolicySpec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Single(policy) => f.debug_tuple("Single").field(&policy.name()).finish(),
            Self::All(clauses) => f.debug_tuple("All").field(clauses).finish(),
        }
    }
}

impl<C> fmt::Debug for Clause<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Policy(policy) => f.write_str(policy.name()),
            Self::AnyOf(group) => f
                .debug_tuple("AnyOf")
                .field(&group.iter().map(|p| p.name()).collect::<Vec<_>>())
                .finish(),
        }
    }
}

impl<C> From<PolicyRef<C>> for Clause<C> {
    fn from(policy: PolicyRef<C>) -> Self {
        Self::Policy(policy)
    }
}

impl<C> From<PolicyRef<C>> for PolicySpec<C> {
    fn from(policy: PolicyRef<C>) -> Self {
        Self::Single(policy)
    }
}

impl<C> From<Vec<PolicyRef<C>>> for PolicySpec<C> {
    fn from(policies: Vec<PolicyRef<C>>) -> Self {
        Self::all(policies)
    }
}

impl<C> From<Vec<Vec<PolicyRef<C>>>> for PolicySpec<C> {
    fn from(groups: Vec<Vec<PolicyRef<C>>>) -> Self {
        Self::All(groups.into_iter().map(Clause::AnyOf).collect())
    }
}

impl<C> From<Vec<Clause<C>>> for PolicySpec<C> {
    fn from(clauses: Vec<Clause<C>>) -> Self {
        Self::All(clauses)
    }
}

impl<C, T> From<Option<T>> for PolicySpec<C>
where
    T: Into<PolicySpec<C>>,
{
    fn from(spec: Option<T>) -> Self {
        spec.map_or(Self::Always, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_fn;

    fn yes(name: &'static str) -> PolicyRef<()> {
        from_fn(name, |_: &()| true)
    }

    #[test]
    fn none_normalises_to_always() {
        let spec: PolicySpec<()> = None::<PolicyRef<()>>.into();
        assert!(matches!(spec, PolicySpec::Always));
        assert_eq!(spec.leaf_count(), 0);
    }

    #[test]
    fn single_policy_normalises_to_single() {
        let spec: PolicySpec<()> = yes("a").into();
        assert!(matches!(spec, PolicySpec::Single(_)));
    }

    #[test]
    fn flat_list_normalises_to_plain_clauses() {
        let spec: PolicySpec<()> = vec![yes("a"), yes("b")].into();
        let PolicySpec::All(clauses) = &spec else {
            panic!("expected All, got {spec:?}");
        };
        assert!(clauses.iter().all(|c| matches!(c, Clause::Policy(_))));
        assert_eq!(spec.leaf_count(), 2);
    }

    #[test]
    fn nested_list_normalises_to_or_groups() {
        let spec: PolicySpec<()> = vec![vec![yes("a"), yes("b")], vec![yes("c")]].into();
        let PolicySpec::All(clauses) = &spec else {
            panic!("expected All, got {spec:?}");
        };
        assert_eq!(clauses.len(), 2);
        assert!(clauses.iter().all(|c| matches!(c, Clause::AnyOf(_))));
        assert_eq!(spec.leaf_count(), 3);
    }

    #[test]
    fn debug_shows_policy_names() {
        let spec = PolicySpec::all_of([yes("owner").into(), Clause::any_of([yes("a"), yes("b")])]);
        assert_eq!(format!("{spec:?}"), r#"All([owner, AnyOf(["a", "b"])])"#);
    }
}
