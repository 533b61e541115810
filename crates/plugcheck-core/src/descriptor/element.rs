/// A node in a descriptor tree.
///
/// Include directives are their own variant so that a fully resolved tree can
/// be recognised by type: it holds nothing but [`Node::Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Include(IncludeDirective),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Include(_) => None,
        }
    }

    /// Text following this node inside its parent
    pub fn tail(&self) -> Option<&str> {
        match self {
            Node::Element(element) => element.tail.as_deref(),
            Node::Include(directive) => directive.tail.as_deref(),
        }
    }

    pub fn tail_mut(&mut self) -> &mut Option<String> {
        match self {
            Node::Element(element) => &mut element.tail,
            Node::Include(directive) => &mut directive.tail,
        }
    }

    /// Append `text` after any tail this node already has
    pub fn append_tail(&mut self, text: &str) {
        append_text(self.tail_mut(), text);
    }
}

/// A plain descriptor element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local tag name
    pub tag: String,

    /// Namespace URI of the tag, if any
    pub namespace: Option<String>,

    /// Attributes in document order. Namespaced attributes are keyed as
    /// `{uri}name`.
    pub attributes: Vec<(String, String)>,

    pub children: Vec<Node>,

    /// Text before the first child
    pub text: Option<String>,

    /// Text after this element's end tag
    pub tail: Option<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn with_include(mut self, directive: IncludeDirective) -> Self {
        self.children.push(Node::Include(directive));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Whether this is the un-namespaced element `tag`
    pub fn is(&self, tag: &str) -> bool {
        self.namespace.is_none() && self.tag == tag
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Direct un-namespaced children named `tag`
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.child_elements().filter(move |e| e.is(tag))
    }

    /// Text content with surrounding whitespace removed
    pub fn trimmed_text(&self) -> &str {
        self.text.as_deref().map(str::trim).unwrap_or("")
    }

    /// Whether any include directive remains in this subtree
    pub fn has_includes(&self) -> bool {
        self.children.iter().any(|child| match child {
            Node::Include(_) => true,
            Node::Element(element) => element.has_includes(),
        })
    }
}

/// An XInclude directive awaiting resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Target path, absolute (leading `/`) or relative
    pub href: Option<String>,

    /// Requested parse mode; `xml` when the attribute is absent
    pub parse: String,

    /// Explicit selector expression
    pub xpointer: Option<String>,

    /// Carries a fallback child, so a missing target is not fatal
    pub fallback: bool,

    pub tail: Option<String>,
}

impl IncludeDirective {
    pub fn new(href: &str) -> Self {
        Self {
            href: Some(href.to_string()),
            parse: crate::kernel::constants::XML_PARSE_MODE.to_string(),
            xpointer: None,
            fallback: false,
            tail: None,
        }
    }

    pub fn with_xpointer(mut self, xpointer: &str) -> Self {
        self.xpointer = Some(xpointer.to_string());
        self
    }

    pub fn with_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }
}

pub(crate) fn append_text(slot: &mut Option<String>, text: &str) {
    if text.is_empty() {
        return;
    }
    match slot {
        Some(existing) => existing.push_str(text),
        None => *slot = Some(text.to_string()),
    }
}
