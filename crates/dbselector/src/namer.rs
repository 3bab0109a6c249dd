//! Bind-name generation.
//!
//! A [`ParamNamer`] is created fresh for every render call, so numbering
//! always starts at 1 and repeated renders of the same selector agree.

use crate::config::Dialect;
use crate::value::{NamedBinds, Value};
use std::collections::HashSet;

/// How placeholders are spelled in the rendered SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `:name1`, bound by name.
    Named,
    /// `$1` or `?` depending on dialect, bound by position.
    Positional(Dialect),
}

/// One generated placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Key in the bind collection (`name1`, `q1_name1`, or `$1`).
    pub bind_name: String,
    /// Text written into the SQL (`:name1`, `$1`, or `?`).
    pub text: String,
}

/// Stateful counter producing unique bind names within one render.
#[derive(Debug)]
pub struct ParamNamer<'a> {
    prefix: &'a str,
    style: PlaceholderStyle,
    counter: usize,
    issued: HashSet<String>,
    binds: NamedBinds,
}

impl<'a> ParamNamer<'a> {
    pub fn new(prefix: &'a str, style: PlaceholderStyle) -> Self {
        Self {
            prefix,
            style,
            counter: 0,
            issued: HashSet::new(),
            binds: NamedBinds::new(),
        }
    }

    /// Number of placeholders generated so far.
    pub fn count(&self) -> usize {
        self.counter
    }

    pub fn style(&self) -> PlaceholderStyle {
        self.style
    }

    /// Generate the next placeholder. `hint` is the field name; it is ignored
    /// in positional mode.
    ///
    /// Named binds are `<prefix><hint><n>`. A hint ending in digits can spell
    /// a name already issued (`a1` + 1 and `a` + 11 are both `a11`); the later
    /// one then gets `_` separators between hint and counter until it is unique.
    pub fn next(&mut self, hint: &str) -> Placeholder {
        self.counter += 1;
        let n = self.counter;
        match self.style {
            PlaceholderStyle::Named => {
                let mut bind_name = format!("{}{}{}", self.prefix, hint, n);
                let mut sep = String::new();
                while self.issued.contains(&bind_name) {
                    sep.push('_');
                    bind_name = format!("{}{}{}{}", self.prefix, hint, sep, n);
                }
                self.issued.insert(bind_name.clone());
                let text = format!(":{bind_name}");
                Placeholder { bind_name, text }
            }
            PlaceholderStyle::Positional(dialect) => {
                let bind_name = format!("${n}");
                let text = if dialect.numbered_placeholders() {
                    bind_name.clone()
                } else {
                    "?".to_string()
                };
                Placeholder { bind_name, text }
            }
        }
    }

    /// Generate `count` placeholders for one set-membership list.
    pub fn next_many(&mut self, hint: &str, count: usize) -> Vec<Placeholder> {
        (0..count).map(|_| self.next(hint)).collect()
    }

    /// Generate a placeholder, bind `value` to it and return the SQL text.
    pub fn bind(&mut self, hint: &str, value: Value) -> String {
        let ph = self.next(hint);
        self.binds.insert(ph.bind_name, value);
        ph.text
    }

    /// Bind every value of a set-membership list and return `(p1,p2,...)`.
    pub fn bind_list(&mut self, hint: &str, values: &[Value]) -> String {
        let texts: Vec<String> = self
            .next_many(hint, values.len())
            .into_iter()
            .zip(values)
            .map(|(ph, value)| {
                self.binds.insert(ph.bind_name, value.clone());
                ph.text
            })
            .collect();
        format!("({})", texts.join(","))
    }

    /// Consume the namer, returning every bind it recorded.
    pub fn into_binds(self) -> NamedBinds {
        self.binds
    }
}
