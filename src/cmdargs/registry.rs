use std::collections::BTreeMap;

use super::argument::Argument;
use super::value::Value;

/// Values to render, keyed by argument name.
pub type ArgValues = BTreeMap<String, Value>;

/// An ordered set of argument descriptors. Order is render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgList {
    args: Vec<Argument>,
}

impl ArgList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry inside a scope.
    ///
    /// Everything added to the builder inside `f` lands in the returned list,
    /// in the order it was added. Nested calls build independent lists.
    pub fn build(f: impl FnOnce(&mut ArgList)) -> Self {
        let mut list = Self::new();
        f(&mut list);
        list
    }

    pub fn add(&mut self, arg: Argument) -> &mut Self {
        self.args.push(arg);
        self
    }

    /// Look up by name or, for options, by alias.
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.args
            .iter()
            .find(|arg| arg.name() == name || arg.alias_names().iter().any(|a| a == name))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.args.iter()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn render(&self, values: &ArgValues) -> String {
        render_args(self, values)
    }

    pub fn argv(&self, values: &ArgValues) -> Vec<String> {
        render_argv(self, values)
    }
}

impl<'a> IntoIterator for &'a ArgList {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}

/// Render arguments for command-line invocation.
///
/// Walks `args` in order, rendering each one that has an entry in `values`.
/// Every non-empty token is preceded by a single space, so the result can be
/// appended straight after a command name.
pub fn render_args(args: &ArgList, values: &ArgValues) -> String {
    let mut out = String::new();
    for arg in args {
        let Some(value) = values.get(arg.name()) else {
            continue;
        };
        let rendered = arg.render(value);
        if !rendered.is_empty() {
            out.push(' ');
            out.push_str(&rendered);
        }
    }
    out
}

/// Render arguments as an argv, one element per word.
///
/// Same walk as [`render_args`], but values are never shell-quoted, so the
/// result can be handed straight to a process without re-splitting.
pub fn render_argv(args: &ArgList, values: &ArgValues) -> Vec<String> {
    args.iter()
        .filter_map(|arg| values.get(arg.name()).map(|value| arg.argv(value)))
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: Vec<(&str, Value)>) -> ArgValues {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn build_preserves_registration_order() {
        let args = ArgList::build(|args| {
            args.add(Argument::positional("arg1"))
                .add(Argument::positional("arg2"))
                .add(Argument::positional("arg3"));
            args.add(Argument::switch("-b"));
        });
        let names: Vec<_> = args.iter().map(Argument::name).collect();
        assert_eq!(names, ["arg1", "arg2", "arg3", "-b"]);
    }

    #[test]
    fn nested_builds_register_to_innermost_list() {
        let mut inner = ArgList::new();
        let outer = ArgList::build(|outer| {
            outer.add(Argument::positional("a"));
            inner = ArgList::build(|inner| {
                inner.add(Argument::positional("b"));
            });
            outer.add(Argument::positional("c"));
        });
        let outer_names: Vec<_> = outer.iter().map(Argument::name).collect();
        assert_eq!(outer_names, ["a", "c"]);
        assert_eq!(inner.len(), 1);
        assert_eq!(inner.iter().next().map(Argument::name), Some("b"));
    }

    #[test]
    fn lookup_by_alias() {
        let args = ArgList::build(|args| {
            args.add(Argument::option("-e").aliases(["--env"]));
        });
        assert_eq!(args.get("--env").map(Argument::name), Some("-e"));
        assert!(args.get("--nope").is_none());
    }

    #[test]
    fn render_skips_false_switches_and_missing_names() {
        let args = ArgList::build(|args| {
            args.add(Argument::switch("-a"))
                .add(Argument::option("-b"))
                .add(Argument::switch("-d"))
                .add(Argument::positional("c"))
                .add(Argument::option("--unused"));
        });
        let vals = values(vec![
            ("-a", true.into()),
            ("-b", vec![1, 2].into()),
            ("c", "abc".into()),
            ("-d", false.into()),
        ]);
        assert_eq!(render_args(&args, &vals), " -a -b 1 -b 2 abc");
    }

    #[test]
    fn argv_matches_render_for_plain_values() {
        let args = ArgList::build(|args| {
            args.add(Argument::switch("-a"))
                .add(Argument::option("-b"))
                .add(Argument::switch("-d"))
                .add(Argument::positional("c"));
        });
        let vals = values(vec![
            ("-a", true.into()),
            ("-b", vec![1, 2].into()),
            ("c", "abc".into()),
            ("-d", false.into()),
        ]);
        assert_eq!(args.argv(&vals), ["-a", "-b", "1", "-b", "2", "abc"]);
        assert_eq!(
            shell_words::split(&args.render(&vals)).unwrap(),
            args.argv(&vals)
        );
    }

    #[test]
    fn argv_keeps_whitespace_inside_values() {
        let args = ArgList::build(|args| {
            args.add(Argument::option("-e")).add(Argument::positional("img"));
        });
        let vals = values(vec![("-e", "MSG=hello world".into()), ("img", "alpine".into())]);
        assert_eq!(render_argv(&args, &vals), ["-e", "MSG=hello world", "alpine"]);
        assert!(render_argv(&args, &ArgValues::new()).is_empty());
    }

    #[test]
    fn render_empty_values_is_empty() {
        let args = ArgList::build(|args| {
            args.add(Argument::switch("-a"));
        });
        assert_eq!(render_args(&args, &ArgValues::new()), "");
        assert_eq!(render_args(&ArgList::new(), &ArgValues::new()), "");
    }

    #[test]
    fn render_is_deterministic() {
        let args = ArgList::build(|args| {
            args.add(Argument::option("-e")).add(Argument::positional("img"));
        });
        let vals = values(vec![("-e", vec!["A=1", "B=2"].into()), ("img", "x".into())]);
        let first = args.render(&vals);
        assert_eq!(first, " -e A=1 -e B=2 x");
        assert_eq!(args.render(&vals), first);
    }
}
