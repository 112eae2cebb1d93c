use super::value::Value;

/// When a rendered value gets wrapped in the quote character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quote {
    Always,
    /// Only quote renders that joined several values.
    #[default]
    Multiple,
    Never,
}

/// The character a quoted render is wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteChar {
    #[default]
    Double,
    Single,
}

impl QuoteChar {
    pub fn as_char(self) -> char {
        match self {
            QuoteChar::Double => '"',
            QuoteChar::Single => '\'',
        }
    }
}

/// What kind of command-line token an [`Argument`] describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Positional {
        repeatable: bool,
    },
    Option {
        aliases: Vec<String>,
        use_eq: bool,
        interleave: bool,
    },
    /// Renders its name when the value is truthy, nothing otherwise.
    Switch,
}

/// Declarative description of how one named argument renders.
///
/// Quoting precedence is the same for every kind: `Always` wraps the whole
/// token, then `quote_elements` quotes each element of a list and suppresses
/// outer quoting, then `Multiple` wraps lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    sep: String,
    quote: Quote,
    quote_elements: bool,
    quote_char: QuoteChar,
    single_value: bool,
    kind: Kind,
}

impl Argument {
    fn with_kind(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            sep: " ".to_string(),
            quote: Quote::default(),
            quote_elements: false,
            quote_char: QuoteChar::default(),
            single_value: false,
            kind,
        }
    }

    pub fn positional(name: impl Into<String>) -> Self {
        Self::with_kind(name, Kind::Positional { repeatable: false })
    }

    /// A valued option. Repeats itself per element by default.
    pub fn option(name: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            Kind::Option {
                aliases: Vec::new(),
                use_eq: false,
                interleave: true,
            },
        )
    }

    pub fn switch(name: impl Into<String>) -> Self {
        Self::with_kind(name, Kind::Switch)
    }

    pub fn sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    pub fn quote(mut self, quote: Quote) -> Self {
        self.quote = quote;
        self
    }

    pub fn quote_elements(mut self, yes: bool) -> Self {
        self.quote_elements = yes;
        self
    }

    pub fn quote_char(mut self, quote_char: QuoteChar) -> Self {
        self.quote_char = quote_char;
        self
    }

    pub fn single_value(mut self, yes: bool) -> Self {
        self.single_value = yes;
        self
    }

    /// Has no effect on options and switches.
    pub fn repeatable(mut self, yes: bool) -> Self {
        if let Kind::Positional { repeatable } = &mut self.kind {
            *repeatable = yes;
        }
        self
    }

    pub fn aliases<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Kind::Option { aliases, .. } = &mut self.kind {
            *aliases = names.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Render as `name=value` instead of `name value`.
    pub fn use_eq(mut self, yes: bool) -> Self {
        if let Kind::Option { use_eq, .. } = &mut self.kind {
            *use_eq = yes;
        }
        self
    }

    pub fn interleave(mut self, yes: bool) -> Self {
        if let Kind::Option { interleave, .. } = &mut self.kind {
            *interleave = yes;
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn alias_names(&self) -> &[String] {
        match &self.kind {
            Kind::Option { aliases, .. } => aliases,
            _ => &[],
        }
    }

    /// The policy actually applied at render time.
    ///
    /// A non-repeatable positional occupies one shell word, so it always
    /// quotes multi-value renders no matter what was configured.
    pub fn effective_quote(&self) -> Quote {
        match self.kind {
            Kind::Positional { repeatable: false } => Quote::Multiple,
            _ => self.quote,
        }
    }

    pub fn render(&self, value: &Value) -> String {
        match &self.kind {
            Kind::Switch => {
                if value.is_truthy() {
                    self.name.clone()
                } else {
                    String::new()
                }
            }
            Kind::Positional { .. } => self.render_value(value),
            Kind::Option {
                use_eq, interleave, ..
            } => {
                let prefix = if *use_eq {
                    format!("{}=", self.name)
                } else {
                    format!("{} ", self.name)
                };
                match value {
                    Value::List(items) if *interleave && !self.single_value => items
                        .iter()
                        .map(|item| format!("{prefix}{}", self.render_single(item)))
                        .collect::<Vec<_>>()
                        .join(" "),
                    _ => format!("{prefix}{}", self.render_value(value)),
                }
            }
        }
    }

    /// The argv words this argument contributes, without any shell quoting.
    ///
    /// Words are laid out the way a shell would split [`render`](Self::render),
    /// except that a single value always stays one word, whitespace and quote
    /// characters included.
    pub fn argv(&self, value: &Value) -> Vec<String> {
        match &self.kind {
            Kind::Switch => {
                if value.is_truthy() {
                    vec![self.name.clone()]
                } else {
                    Vec::new()
                }
            }
            // An unquoted empty positional renders to nothing.
            Kind::Positional { .. } => self
                .value_words(value)
                .into_iter()
                .filter(|word| !word.is_empty() || self.effective_quote() == Quote::Always)
                .collect(),
            Kind::Option {
                use_eq, interleave, ..
            } => match value {
                Value::List(items) if *interleave && !self.single_value => items
                    .iter()
                    .flat_map(|item| self.prefixed(*use_eq, vec![item.clone()]))
                    .collect(),
                _ => self.prefixed(*use_eq, self.value_words(value)),
            },
        }
    }

    fn prefixed(&self, use_eq: bool, words: Vec<String>) -> Vec<String> {
        let mut words = words.into_iter();
        let mut out = match words.next() {
            Some(first) if use_eq => vec![format!("{}={first}", self.name)],
            Some(first) => vec![self.name.clone(), first],
            None if use_eq => vec![format!("{}=", self.name)],
            None => vec![self.name.clone()],
        };
        out.extend(words);
        out
    }

    fn value_words(&self, value: &Value) -> Vec<String> {
        let quote = self.effective_quote();
        match value {
            Value::List(items) if !self.single_value => {
                let blank_sep = !self.sep.is_empty() && self.sep.trim().is_empty();
                let unwrapped =
                    quote != Quote::Always && (self.quote_elements || quote == Quote::Never);
                if blank_sep && unwrapped {
                    items.clone()
                } else {
                    vec![items.join(&self.sep)]
                }
            }
            other => vec![other.to_string()],
        }
    }

    fn render_value(&self, value: &Value) -> String {
        match value {
            Value::List(items) if !self.single_value => {
                let joined = if self.quote_elements {
                    items
                        .iter()
                        .map(|item| self.wrap(item))
                        .collect::<Vec<_>>()
                        .join(&self.sep)
                } else {
                    items.join(&self.sep)
                };
                match self.effective_quote() {
                    Quote::Always => self.wrap(&joined),
                    Quote::Multiple if !self.quote_elements => self.wrap(&joined),
                    _ => joined,
                }
            }
            other => self.render_single(&other.to_string()),
        }
    }

    fn render_single(&self, s: &str) -> String {
        match self.effective_quote() {
            Quote::Always => self.wrap(s),
            _ => s.to_string(),
        }
    }

    fn wrap(&self, s: &str) -> String {
        format!("{q}{s}{q}", q = self.quote_char.as_char())
    }
}
