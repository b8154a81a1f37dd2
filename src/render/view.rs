use std::fmt::Write;

/// A node of the rendered view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub styles: Vec<(String, String)>,
    pub children: Vec<Node>,
}

const VOID_TAGS: &[&str] = &["img", "br", "hr", "input"];

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add one or more space-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.styles.push((property.to_string(), value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Depth-first search for descendants (and self) carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            if let Node::Element(el) = child {
                el.collect_by_class(class, found);
            }
        }
    }

    /// First descendant element with the given tag.
    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| match child {
            Node::Element(el) if el.tag == tag => Some(el),
            Node::Element(el) => el.find_tag(tag),
            Node::Text(_) => None,
        })
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if !self.styles.is_empty() {
            let style: Vec<String> = self
                .styles
                .iter()
                .map(|(p, v)| format!("{}: {};", p, v))
                .collect();
            let _ = write!(out, " style=\"{}\"", escape(&style.join(" ")));
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Element(el) => el.write_html(out),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// Serialize a list of sibling nodes to HTML.
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_classes_attrs_and_styles() {
        let node: Node = Element::new("a")
            .class("project-link primary")
            .attr("href", "/play?x=1&y=2")
            .style("color", "white")
            .text("Play")
            .into();

        assert_eq!(
            to_html(&[node]),
            r#"<a class="project-link primary" href="/play?x=1&amp;y=2" style="color: white;">Play</a>"#
        );
    }

    #[test]
    fn text_is_escaped() {
        let html = to_html(&[Element::new("p").text("<script>alert('x')</script>").into()]);
        assert_eq!(html, "<p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</p>");
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let html = to_html(&[Element::new("img").attr("src", "a.png").into()]);
        assert_eq!(html, r#"<img src="a.png">"#);
    }

    #[test]
    fn queries_walk_the_tree() {
        let card = Element::new("div")
            .class("card")
            .child(Element::new("h3").text("Title"))
            .child(
                Element::new("div")
                    .class("tags")
                    .child(Element::new("span").class("tag").text("One"))
                    .child(Element::new("span").class("tag").text("Two")),
            );

        assert_eq!(card.find_tag("h3").map(|h| h.text_content()), Some("Title".to_string()));
        let tags: Vec<String> = card.find_by_class("tag").iter().map(|t| t.text_content()).collect();
        assert_eq!(tags, vec!["One", "Two"]);
        assert_eq!(card.text_content(), "TitleOneTwo");
    }

    #[test]
    fn class_patching_is_idempotent() {
        let mut el = Element::new("div").class("card");
        el.add_class("visible");
        el.add_class("visible");
        assert_eq!(el.classes, vec!["card", "visible"]);
        el.remove_class("card");
        assert_eq!(el.classes, vec!["visible"]);
    }
}
