use std::collections::BTreeSet;
use std::fmt;

/// CSS specificity for determining rule precedence.
///
/// Field order matters: the derived `Ord` compares ids first, then
/// classes (including attributes and pseudo-classes), then types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl Specificity {
    pub fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self {
            ids,
            classes,
            types,
        }
    }
}

impl std::ops::Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Specificity) -> Specificity {
        Specificity {
            ids: self.ids + rhs.ids,
            classes: self.classes + rhs.classes,
            types: self.types + rhs.types,
        }
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.ids, self.classes, self.types)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    Type(String),
    Class(String),
    Id(String),
    Universal,
    PseudoClass(String),
    PseudoElement(String),
    /// `:host` or `:host(<compound>)`, matching the shadow host element.
    Host(Option<CompoundSelector>),
    Parent,
    /// `[name]` when the value is `None`, `[name="value"]` otherwise.
    Attribute(String, Option<String>),
}

impl Selector {
    pub fn specificity(&self) -> Specificity {
        match self {
            Selector::Id(_) => Specificity::new(1, 0, 0),
            // Attributes have the same specificity as classes and pseudo-classes
            Selector::Class(_) | Selector::PseudoClass(_) | Selector::Attribute(_, _) => {
                Specificity::new(0, 1, 0)
            }
            Selector::Type(_) | Selector::PseudoElement(_) => Specificity::new(0, 0, 1),
            Selector::Host(arg) => {
                let inner = arg.as_ref().map(|c| c.specificity()).unwrap_or_default();
                Specificity::new(0, 1, 0) + inner
            }
            Selector::Universal | Selector::Parent => Specificity::default(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Type(name) => write!(f, "{name}"),
            Selector::Class(name) => write!(f, ".{name}"),
            Selector::Id(name) => write!(f, "#{name}"),
            Selector::Universal => write!(f, "*"),
            Selector::PseudoClass(name) => write!(f, ":{name}"),
            Selector::PseudoElement(name) => write!(f, "::{name}"),
            Selector::Host(None) => write!(f, ":host"),
            Selector::Host(Some(compound)) => write!(f, ":host({compound})"),
            Selector::Parent => write!(f, "&"),
            Selector::Attribute(name, None) => write!(f, "[{name}]"),
            Selector::Attribute(name, Some(value)) => write!(f, "[{name}=\"{value}\"]"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompoundSelector {
    pub selectors: Vec<Selector>,
}

impl CompoundSelector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .fold(Specificity::default(), |acc, s| acc + s.specificity())
    }

    pub fn subject_key(&self) -> SubjectKey {
        let mut key = SubjectKey::default();
        for selector in &self.selectors {
            match selector {
                Selector::Host(_) => key.host = true,
                Selector::Type(name) => key.tag = Some(name.to_ascii_lowercase()),
                Selector::Id(name) => key.id = Some(name.clone()),
                Selector::Class(name) => {
                    key.classes.insert(name.clone());
                }
                _ => {}
            }
        }
        key
    }
}

/// What a subject compound requires of the element it styles: its type,
/// id and classes, and whether it targets the shadow host.
///
/// Pseudo-classes and attributes are left out, so two keys describe a
/// superset of the elements their compounds match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubjectKey {
    pub host: bool,
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
}

impl SubjectKey {
    /// True when both keys name a common type, id or class and neither
    /// excludes an element the other requires. Selector order inside the
    /// compound is irrelevant: `.thumb.big` and `.big.thumb` overlap.
    pub fn may_overlap(&self, other: &SubjectKey) -> bool {
        if self.host != other.host {
            return false;
        }
        let tags_conflict = matches!(
            (&self.tag, &other.tag),
            (Some(a), Some(b)) if !a.eq_ignore_ascii_case(b)
        );
        let ids_conflict = matches!((&self.id, &other.id), (Some(a), Some(b)) if a != b);
        if tags_conflict || ids_conflict {
            return false;
        }

        self.host
            || (self.tag.is_some() && self.tag == other.tag)
            || (self.id.is_some() && self.id == other.id)
            || !self.classes.is_disjoint(&other.classes)
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.selectors {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    None,
    Descendant,
    Child,
    AdjacentSibling, // +
    GeneralSibling,  // ~
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Combinator::None => "",
            Combinator::Descendant => " ",
            Combinator::Child => " > ",
            Combinator::AdjacentSibling => " + ",
            Combinator::GeneralSibling => " ~ ",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    pub combinator: Combinator,
}

impl SelectorPart {
    pub fn new(compound: CompoundSelector, combinator: Combinator) -> Self {
        Self {
            compound,
            combinator,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

impl ComplexSelector {
    pub fn new(parts: Vec<SelectorPart>) -> Self {
        Self { parts }
    }

    pub fn specificity(&self) -> Specificity {
        self.parts
            .iter()
            .fold(Specificity::default(), |acc, p| acc + p.compound.specificity())
    }

    /// The rightmost compound, i.e. the element the selector styles.
    pub fn subject(&self) -> Option<&CompoundSelector> {
        self.parts.last().map(|p| &p.compound)
    }

    /// Requirements on the styled element. A bare `:host(...)` selector
    /// styles the host itself.
    pub fn subject_key(&self) -> Option<SubjectKey> {
        self.subject().map(CompoundSelector::subject_key)
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "{}{}", part.compound, part.combinator)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn new(selectors: Vec<ComplexSelector>) -> Self {
        Self { selectors }
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, complex) in self.selectors.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{complex}")?;
        }
        Ok(())
    }
}

/// A property-value pair. Values are kept verbatim; token references
/// (`var(--name)`) are resolved at paint time, never here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleItem {
    Declaration(Declaration),
    NestedRule(Rule),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub selectors: SelectorList,
    pub items: Vec<RuleItem>,
}

impl Rule {
    pub fn new(selectors: SelectorList, items: Vec<RuleItem>) -> Self {
        Self { selectors, items }
    }

    /// The rule's own declarations, skipping nested rules.
    pub fn declarations(&self) -> Vec<&Declaration> {
        self.items
            .iter()
            .filter_map(|item| match item {
                RuleItem::Declaration(d) => Some(d),
                RuleItem::NestedRule(_) => None,
            })
            .collect()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selectors)?;
        for item in &self.items {
            match item {
                RuleItem::Declaration(d) => writeln!(f, "  {d};")?,
                RuleItem::NestedRule(nested) => {
                    for line in nested.to_string().lines() {
                        writeln!(f, "  {line}")?;
                    }
                }
            }
        }
        f.write_str("}")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSheet {
    pub rules: Vec<Rule>,
}

impl StyleSheet {
    /// Deterministic CSS text for the sheet. Parsing the output yields an
    /// equal sheet.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            out.push_str(&rule.to_string());
            out.push('\n');
        }
        out
    }
}
