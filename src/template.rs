use {
    crate::BuilderError,
    log::trace,
    regex::{Regex, RegexBuilder},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        hash::{Hash, Hasher},
        str::FromStr,
    },
};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A string containing `${Name}` placeholders, such as an ARN template or a templated condition key.
///
/// Templates are parsed once, left to right. Rendering substitutes every placeholder in a single pass; substituted
/// values are never rescanned for template placeholders. A value may carry an IAM policy variable like
/// `${aws:username}`, but any other `${...}` token in a value is rejected.
#[derive(Clone, Debug)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,

    /// Case-insensitive matcher with one capture group per placeholder. `None` for templates without placeholders.
    matcher: Option<Regex>,
}

impl Template {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The distinct placeholder names in this template, in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut result: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(name) = segment {
                if !result.contains(&name.as_str()) {
                    result.push(name);
                }
            }
        }
        result
    }

    #[inline]
    pub fn has_placeholders(&self) -> bool {
        self.matcher.is_some()
    }

    /// Render the template, asking `lookup` for the value of each placeholder.
    ///
    /// # Errors
    ///
    /// * [BuilderError::UnresolvedPlaceholder] if `lookup` returns `None` for any placeholder, or a value contains a
    ///   `${...}` token that is not an IAM policy variable. No partial result is produced.
    /// * [BuilderError::InvalidSubstitution] if a value contains an unterminated `${`.
    pub fn render<F>(&self, mut lookup: F) -> Result<String, BuilderError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut result = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => result.push_str(s),
                Segment::Placeholder(name) => match lookup(name) {
                    Some(value) => {
                        trace!("Template {}: ${{{}}} -> {:?}", self.source, name, value);
                        self.check_substituted(&value)?;
                        result.push_str(&value);
                    }
                    None => {
                        return Err(BuilderError::UnresolvedPlaceholder {
                            placeholder: name.clone(),
                            template: self.source.clone(),
                        })
                    }
                },
            }
        }

        Ok(result)
    }

    /// Substituted values may only carry `${...}` tokens that IAM resolves at evaluation time.
    fn check_substituted(&self, value: &str) -> Result<(), BuilderError> {
        let mut rest = value;
        while let Some(start) = rest.find("${") {
            let after = &rest[start + 2..];
            let end = after.find('}').ok_or_else(|| BuilderError::InvalidSubstitution(value.to_string()))?;
            let name = &after[..end];

            if !is_policy_variable(name) {
                trace!("Template {}: value {:?} carries unresolved ${{{}}}", self.source, value, name);
                return Err(BuilderError::UnresolvedPlaceholder {
                    placeholder: name.to_string(),
                    template: self.source.clone(),
                });
            }

            rest = &after[end + 1..];
        }

        Ok(())
    }

    /// Indicates whether `s` is an instance of this template, with each placeholder standing for one or more
    /// characters. Literal text is compared case-insensitively, as IAM compares condition keys.
    pub fn matches(&self, s: &str) -> bool {
        match &self.matcher {
            None => self.source.eq_ignore_ascii_case(s),
            Some(re) => re.is_match(s),
        }
    }

    /// Respell `s`, an instance of this template, with the template's literal text. Placeholder text is kept as
    /// given. Returns `None` if `s` does not match.
    pub fn canonicalize(&self, s: &str) -> Option<String> {
        let re = match &self.matcher {
            None => return self.source.eq_ignore_ascii_case(s).then(|| self.source.clone()),
            Some(re) => re,
        };

        let captures = re.captures(s)?;
        let mut result = String::with_capacity(s.len());
        let mut group = 1;
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => result.push_str(lit),
                Segment::Placeholder(_) => {
                    result.push_str(captures.get(group)?.as_str());
                    group += 1;
                }
            }
        }

        Some(result)
    }
}

/// IAM policy variables are namespaced (`aws:username`, `saml:sub`) or one of the escapes `${*}`, `${?}`, `${$}`.
fn is_policy_variable(name: &str) -> bool {
    match name {
        "*" | "?" | "$" => true,
        _ => match name.split_once(':') {
            Some((ns, key)) => !ns.is_empty() && !key.is_empty() && ns.chars().all(|c| c.is_ascii_alphanumeric()),
            None => false,
        },
    }
}

fn build_matcher(source: &str, segments: &[Segment]) -> Result<Option<Regex>, BuilderError> {
    if !segments.iter().any(|s| matches!(s, Segment::Placeholder(_))) {
        return Ok(None);
    }

    let mut pattern = String::with_capacity(source.len() + 2);
    pattern.push('^');
    for segment in segments {
        match segment {
            Segment::Literal(lit) => pattern.push_str(&regex::escape(lit)),
            Segment::Placeholder(_) => pattern.push_str("(.+)"),
        }
    }
    pattern.push('$');

    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => Ok(Some(re)),
        Err(e) => {
            log::error!("Failed to compile matcher for template {}: {}", source, e);
            Err(BuilderError::InvalidSubstitution(source.to_string()))
        }
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Template {}

impl Hash for Template {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state)
    }
}

impl FromStr for Template {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = s.chars();
        let mut segments = Vec::new();
        let mut literal = String::new();

        while let Some(c) = i.next() {
            match c {
                '$' => {
                    let c = i.next().ok_or_else(|| BuilderError::InvalidSubstitution(s.to_string()))?;
                    if c != '{' {
                        return Err(BuilderError::InvalidSubstitution(s.to_string()));
                    }

                    let mut var = String::new();
                    loop {
                        let c = i.next().ok_or_else(|| BuilderError::InvalidSubstitution(s.to_string()))?;
                        if c == '}' {
                            break;
                        }

                        var.push(c);
                    }

                    if var.is_empty() {
                        return Err(BuilderError::InvalidSubstitution(s.to_string()));
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(var));
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let matcher = build_matcher(s, &segments)?;

        Ok(Self {
            source: s.to_string(),
            segments,
            matcher,
        })
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.source)
    }
}
