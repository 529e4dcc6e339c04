//! URI template compilation, expansion and matching.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::params::{Params, Value};

/// Expression operators supported by [`UriTemplate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `{var}`: comma-separated values, no prefix.
    Simple,
    /// `{?var}`: form-style query starting with `?`.
    Query,
    /// `{&var}`: form-style query continuation starting with `&`.
    Continuation,
}

impl Operator {
    fn from_char(c: char) -> Result<Option<Self>> {
        match c {
            '?' => Ok(Some(Self::Query)),
            '&' => Ok(Some(Self::Continuation)),
            '+' | '#' | '.' | '/' | ';' | '=' | ',' | '!' | '@' | '|' => {
                Err(Error::UnsupportedOperator { operator: c })
            }
            _ => Ok(None),
        }
    }

    /// Character emitted before the first defined variable.
    fn first(self) -> Option<char> {
        match self {
            Self::Simple => None,
            Self::Query => Some('?'),
            Self::Continuation => Some('&'),
        }
    }

    fn separator(self) -> char {
        match self {
            Self::Simple => ',',
            Self::Query | Self::Continuation => '&',
        }
    }

    fn is_named(self) -> bool {
        !matches!(self, Self::Simple)
    }
}

/// A single `{...}` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    operator: Operator,
    variables: Vec<String>,
}

impl Expression {
    /// Returns the expression operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the variable names in declaration order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    fn parse(body: &str, offset: usize) -> Result<Self> {
        let mut chars = body.chars();
        let (operator, names) = match chars.next().map(Operator::from_char).transpose()? {
            Some(Some(operator)) => (operator, chars.as_str()),
            _ => (Operator::Simple, body),
        };

        if names.is_empty() {
            return Err(Error::EmptyExpression { offset });
        }

        let variables = names
            .split(',')
            .map(|name| {
                if name.ends_with('*') || name.contains(':') {
                    return Err(Error::UnsupportedModifier {
                        name: name.to_owned(),
                    });
                }
                if !is_valid_name(name) {
                    return Err(Error::InvalidVariableName {
                        name: name.to_owned(),
                    });
                }
                Ok(name.to_owned())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            operator,
            variables,
        })
    }

    fn expand_into(&self, params: &Params, out: &mut String) {
        let mut first = true;
        for name in &self.variables {
            let Some(value) = params.defined(name) else {
                continue;
            };

            if first {
                out.extend(self.operator.first());
                first = false;
            } else {
                out.push(self.operator.separator());
            }

            if self.operator.is_named() {
                out.push_str(name);
                out.push('=');
            }

            match value {
                Value::String(value) => out.push_str(&urlencoding::encode(value)),
                Value::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if index > 0 {
                            out.push(',');
                        }
                        out.push_str(&urlencoding::encode(item));
                    }
                }
            }
        }
    }

    /// Binds the text matched by a simple expression.
    ///
    /// With several variables every one must have a value: when some were
    /// undefined at expansion time the remaining values cannot be assigned
    /// to names, so the match is rejected.
    fn bind_simple(&self, matched: &str, params: &mut Params) -> Option<()> {
        if matched.is_empty() {
            return Some(());
        }

        if let [name] = self.variables.as_slice() {
            params.insert(name.clone(), decode_value(matched)?);
            return Some(());
        }

        let values: Vec<&str> = matched.split(',').collect();
        if values.len() != self.variables.len() {
            return None;
        }
        for (name, raw) in self.variables.iter().zip(values) {
            params.insert(name.clone(), Value::String(decode(raw)?.into_owned()));
        }
        Some(())
    }

    /// Consumes a query or continuation expansion from the front of `input`.
    fn extract_query<'a>(&self, input: &'a str, params: &mut Params) -> Option<&'a str> {
        let mut lead = self.operator.first()?;
        let mut rest = input;

        loop {
            let Some(candidate) = rest.strip_prefix(lead) else {
                return Some(rest);
            };
            let Some((name, after_name)) = candidate.split_once('=') else {
                return Some(rest);
            };
            if !self.variables.iter().any(|v| v == name) || params.contains(name) {
                return Some(rest);
            }

            let end = after_name
                .find(|c| !is_value_char(c))
                .unwrap_or(after_name.len());
            let (raw, remaining) = after_name.split_at(end);
            params.insert(name.to_owned(), decode_value(raw)?);

            rest = remaining;
            lead = '&';
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Expression(Expression),
}

/// A compiled URI template.
///
/// Templates are immutable; compile once and expand as often as needed.
///
/// ```rust
/// use templating_uri::{Params, UriTemplate};
///
/// let find = UriTemplate::parse("templates/{?searchQuery,page,rpp}")?;
/// assert_eq!(find.expand(&Params::new().with("page", 2u32)), "templates/?page=2");
/// # Ok::<(), templating_uri::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    pattern: String,
    parts: Vec<Part>,
}

impl UriTemplate {
    /// Compiles a template pattern.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;
        let mut offset = 0;

        while let Some(index) = rest.find(['{', '}']) {
            if rest[index..].starts_with('}') {
                return Err(Error::UnexpectedClosingBrace {
                    offset: offset + index,
                });
            }

            literal.push_str(&rest[..index]);
            let start = offset + index;
            let body_and_rest = &rest[index + 1..];
            let close = body_and_rest
                .find('}')
                .ok_or(Error::UnclosedExpression { offset: start })?;
            let body = &body_and_rest[..close];
            if body.contains('{') {
                return Err(Error::UnclosedExpression { offset: start });
            }

            if !literal.is_empty() {
                parts.push(Part::Literal(std::mem::take(&mut literal)));
            }
            parts.push(Part::Expression(Expression::parse(body, start)?));

            let consumed = index + 1 + close + 1;
            rest = &rest[consumed..];
            offset += consumed;
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        Ok(Self {
            pattern: pattern.to_owned(),
            parts,
        })
    }

    /// Returns the source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns all expressions in order.
    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.parts.iter().filter_map(|part| match part {
            Part::Expression(expression) => Some(expression),
            Part::Literal(_) => None,
        })
    }

    /// Returns all variable names in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.expressions()
            .flat_map(|expression| expression.variables.iter().map(String::as_str))
    }

    /// Returns `true` if the template has no expressions.
    pub fn is_static(&self) -> bool {
        self.expressions().next().is_none()
    }

    /// Expands the template.
    ///
    /// Undefined variables are dropped; a query expression with no defined
    /// variables expands to nothing.
    pub fn expand(&self, params: &Params) -> String {
        let mut out = String::with_capacity(self.pattern.len());
        for part in &self.parts {
            match part {
                Part::Literal(literal) => out.push_str(literal),
                Part::Expression(expression) => expression.expand_into(params, &mut out),
            }
        }
        out
    }

    /// Matches an expanded URI against the template and recovers its variables.
    ///
    /// Returns `None` when `uri` could not have been produced by this template,
    /// or when a multi-variable simple expression like `{a,b}` was expanded
    /// with only some of its variables defined. Values containing a raw `,`
    /// are recovered as [`Value::List`].
    pub fn extract(&self, uri: &str) -> Option<Params> {
        match_parts(&self.parts, uri, Params::new())
    }
}

/// Matches `input` against `parts`, backtracking over the length of simple
/// expressions so a literal that follows one (`{id}.json`) can still match.
fn match_parts(parts: &[Part], input: &str, params: Params) -> Option<Params> {
    let Some((part, remaining)) = parts.split_first() else {
        return input.is_empty().then_some(params);
    };

    match part {
        Part::Literal(literal) => {
            match_parts(remaining, input.strip_prefix(literal.as_str())?, params)
        }
        Part::Expression(expression) if expression.operator == Operator::Simple => {
            // Value characters are ASCII, so every index up to `run` is a
            // char boundary.
            let run = input.find(|c| !is_value_char(c)).unwrap_or(input.len());
            (0..=run).rev().find_map(|end| {
                let mut candidate = params.clone();
                expression.bind_simple(&input[..end], &mut candidate)?;
                match_parts(remaining, &input[end..], candidate)
            })
        }
        Part::Expression(expression) => {
            let mut params = params;
            let rest = expression.extract_query(input, &mut params)?;
            match_parts(remaining, rest, params)
        }
    }
}

impl FromStr for UriTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.ends_with('.')
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Characters that can appear in an expanded value.
fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '%' | ',')
}

fn decode(raw: &str) -> Option<Cow<'_, str>> {
    urlencoding::decode(raw).ok()
}

fn decode_value(raw: &str) -> Option<Value> {
    if raw.contains(',') {
        raw.split(',')
            .map(|item| decode(item).map(Cow::into_owned))
            .collect::<Option<Vec<_>>>()
            .map(Value::List)
    } else {
        decode(raw).map(|value| Value::String(value.into_owned()))
    }
}
