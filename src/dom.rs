//! Minimal element tree for the form fieldsets and rendered rows the host hands over.

const VOID_TAGS: &[&str] = &["input", "br", "hr", "img"];

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Markup produced by a host primitive, emitted verbatim
    Raw(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        for c in class.split_whitespace() {
            if !self.has_class(c) {
                self.classes.push(c.to_string());
            }
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    pub fn with_raw(mut self, markup: &str) -> Self {
        self.children.push(Node::Raw(markup.to_string()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Depth-first search including `self`.
    pub fn find<P: Fn(&Element) -> bool>(&self, predicate: &P) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(predicate))
    }

    pub fn find_mut<P: Fn(&Element) -> bool>(&mut self, predicate: &P) -> Option<&mut Element> {
        if predicate(&*self) {
            return Some(self);
        }
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                if let Some(found) = e.find_mut(predicate) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|e: &Element| e.id.as_deref() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.find_mut(&|e: &Element| e.id.as_deref() == Some(id))
    }

    /// Whether this element or a descendant carries `class`.
    pub fn contains_class(&self, class: &str) -> bool {
        self.find(&|e: &Element| e.has_class(class)).is_some()
    }

    /// Removes every descendant with this id, returns how many were removed.
    pub fn remove_by_id(&mut self, id: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|n| !matches!(n, Node::Element(e) if e.id.as_deref() == Some(id)));
        let mut removed = before - self.children.len();
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                removed += e.remove_by_id(id);
            }
        }
        removed
    }

    /// Inserts `node` right after the first descendant matching `predicate`.
    ///
    /// Returns `false` when nothing matched, `node` is then dropped.
    pub fn insert_after<P: Fn(&Element) -> bool>(&mut self, predicate: &P, node: Node) -> bool {
        self.insert_after_inner(predicate, node).is_none()
    }

    fn insert_after_inner<P: Fn(&Element) -> bool>(&mut self, predicate: &P, node: Node) -> Option<Node> {
        let position = self
            .children
            .iter()
            .position(|n| matches!(n, Node::Element(e) if predicate(e)));
        if let Some(idx) = position {
            self.children.insert(idx + 1, node);
            return None;
        }
        let mut pending = node;
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                match e.insert_after_inner(predicate, pending) {
                    None => return None,
                    Some(back) => pending = back,
                }
            }
        }
        Some(pending)
    }

    pub fn append(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if let Some(id) = &self.id {
            push_attr(out, "id", id);
        }
        if !self.classes.is_empty() {
            push_attr(out, "class", &self.classes.join(" "));
        }
        for (name, value) in &self.attrs {
            push_attr(out, name, value);
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_html(out),
                Node::Text(t) => out.push_str(&escape_html(t)),
                Node::Raw(r) => out.push_str(r),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
