//! Headless document tree.
//!
//! A small arena of element and text nodes with the subset of DOM behaviour
//! the menu page relies on: attributes, class lists, inline style, cloning,
//! detaching, and serialization back to HTML.
//!
//! A node detached with [`Document::remove`] stays valid and can be
//! re-attached. [`Document::discard`] and [`Document::clear_children`] drop
//! subtrees for good and their slots are reused, so a long-lived page that
//! keeps rebuilding badges and labels stays at a steady size.

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone, Default)]
struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    free: Vec<NodeId>,
    last_scrolled: Option<NodeId>,
    scroll_count: usize,
}

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            free: Vec::new(),
            last_scrolled: None,
            scroll_count: 0,
        };
        doc.root = doc.create_element("body");
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData {
            tag: tag.to_string(),
            ..Default::default()
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let node = Node {
            data,
            parent: None,
            children: Vec::new(),
        };
        if let Some(id) = self.free.pop() {
            self.nodes[id.0] = node;
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Slots in the arena, live or free.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `child` before `reference`; appends when `reference` is not a
    /// child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.remove(child);
        let pos = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference);
        self.nodes[child.0].parent = Some(parent);
        match pos {
            Some(pos) => self.nodes[parent.0].children.insert(pos, child),
            None => self.nodes[parent.0].children.push(child),
        }
    }

    /// Detach a node (and its subtree) from its parent.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// Detach `node` and recycle its whole subtree. Ids into it must not be
    /// used afterwards.
    pub fn discard(&mut self, node: NodeId) {
        if node == self.root {
            return;
        }
        self.remove(node);
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            let slot = &mut self.nodes[n.0];
            stack.append(&mut slot.children);
            slot.parent = None;
            slot.data = NodeData::Text(String::new());
            self.free.push(n);
        }
    }

    /// Discard every child of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
            self.discard(child);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].data, NodeData::Text(_))
    }

    /// Text of a text node; `None` for elements.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Text(t) => Some(t),
            NodeData::Element(_) => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.nodes[node.0].data {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[node.0].data {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    // ── Attributes ────────────────────────────────────────────────────

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(el) = self.element_mut(node) else {
            return;
        };
        match el.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.element_mut(node) {
            el.attrs.retain(|(k, _)| k != name);
        }
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id")
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if disabled {
            self.set_attr(node, "disabled", "");
        } else {
            self.remove_attr(node, "disabled");
        }
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.attr(node, "disabled").is_some()
    }

    // ── Classes ───────────────────────────────────────────────────────

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        if let Some(el) = self.element_mut(node) {
            el.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    /// `classList.toggle(class, on)`.
    pub fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    // ── Inline style ──────────────────────────────────────────────────

    pub fn style(&self, node: NodeId, prop: &str) -> Option<&str> {
        self.element(node)?
            .style
            .iter()
            .find(|(k, _)| k == prop)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_style(&mut self, node: NodeId, prop: &str, value: &str) {
        let Some(el) = self.element_mut(node) else {
            return;
        };
        match el.style.iter_mut().find(|(k, _)| k == prop) {
            Some((_, v)) => *v = value.to_string(),
            None => el.style.push((prop.to_string(), value.to_string())),
        }
    }

    pub fn remove_style(&mut self, node: NodeId, prop: &str) {
        if let Some(el) = self.element_mut(node) {
            el.style.retain(|(k, _)| k != prop);
        }
    }

    /// False only when the inline style says `display: none`.
    pub fn is_displayed(&self, node: NodeId) -> bool {
        self.style(node, "display") != Some("none")
    }

    // ── Text ──────────────────────────────────────────────────────────

    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].data {
            NodeData::Text(t) => out.push_str(t),
            NodeData::Element(_) => {
                for &child in &self.nodes[node.0].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// `element.textContent = text`: drops every child, icons included.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        self.append_text(node, text);
    }

    // ── Queries ───────────────────────────────────────────────────────

    /// Pre-order descendants of `scope`, excluding `scope` itself.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&n| self.id(n) == Some(id))
    }

    pub fn find_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    pub fn first_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| self.has_class(n, class))
    }

    pub fn find_with_attr(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.attr(n, name).is_some())
            .collect()
    }

    /// Nearest ancestor-or-self carrying `class`.
    pub fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if self.has_class(n, class) {
                return Some(n);
            }
            cur = self.parent(n);
        }
        None
    }

    /// Copy a subtree; the copy is detached.
    pub fn deep_clone(&mut self, node: NodeId) -> NodeId {
        let data = self.nodes[node.0].data.clone();
        let copy = self.push(data);
        let children = self.nodes[node.0].children.clone();
        for child in children {
            let child_copy = self.deep_clone(child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    // ── Viewport ──────────────────────────────────────────────────────

    pub fn scroll_into_view(&mut self, node: NodeId) {
        self.last_scrolled = Some(node);
        self.scroll_count += 1;
    }

    pub fn last_scrolled(&self) -> Option<NodeId> {
        self.last_scrolled
    }

    pub fn scroll_count(&self) -> usize {
        self.scroll_count
    }

    // ── Serialization ─────────────────────────────────────────────────

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, 0, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, depth: usize, out: &mut String) {
        let el = match &self.nodes[node.0].data {
            NodeData::Text(t) => {
                out.push_str(&escape_text(t));
                return;
            }
            NodeData::Element(el) => el,
        };

        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", el.tag);
        if let Some(id) = self.id(node) {
            let _ = write!(out, " id=\"{}\"", escape_attr(id));
        }
        if !el.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&el.classes.join(" ")));
        }
        for (k, v) in el.attrs.iter().filter(|(k, _)| k != "id") {
            if v.is_empty() && k == "disabled" {
                let _ = write!(out, " {k}");
            } else {
                let _ = write!(out, " {k}=\"{}\"", escape_attr(v));
            }
        }
        if !el.style.is_empty() {
            let style = el
                .style
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape_attr(&style));
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&el.tag.as_str()) {
            out.push('\n');
            return;
        }

        let children = &self.nodes[node.0].children;
        let inline = children.iter().all(|&c| self.is_text(c));
        if inline {
            for &c in children {
                self.write_html(c, 0, out);
            }
        } else {
            out.push('\n');
            for &c in children {
                if self.is_text(c) {
                    let _ = write!(out, "{indent}  ");
                    self.write_html(c, 0, out);
                    out.push('\n');
                } else {
                    self.write_html(c, depth + 1, out);
                }
            }
            out.push_str(&indent);
        }
        let _ = writeln!(out, "</{}>", el.tag);
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_moves_node_between_parents() {
        let mut doc = Document::new();
        let a = doc.append_element(doc.root(), "div");
        let b = doc.append_element(doc.root(), "div");
        let span = doc.append_element(a, "span");
        doc.append_child(b, span);
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[span]);
        assert_eq!(doc.parent(span), Some(b));
    }

    #[test]
    fn queries_follow_document_order() {
        let mut doc = Document::new();
        let grid = doc.append_element(doc.root(), "nav");
        doc.set_attr(grid, "id", "grid");
        let first = doc.append_element(grid, "button");
        doc.add_class(first, "menu-button");
        let nested = doc.append_element(first, "span");
        doc.add_class(nested, "menu-button");
        let second = doc.append_element(grid, "button");
        doc.add_class(second, "menu-button");

        assert_eq!(doc.get_element_by_id("grid"), Some(grid));
        assert_eq!(doc.find_by_class(grid, "menu-button"), vec![first, nested, second]);
        assert_eq!(doc.closest_with_class(nested, "menu-button"), Some(nested));
    }

    #[test]
    fn removed_nodes_are_not_found() {
        let mut doc = Document::new();
        let el = doc.append_element(doc.root(), "div");
        doc.set_attr(el, "id", "gone");
        doc.remove(el);
        assert_eq!(doc.get_element_by_id("gone"), None);
    }

    #[test]
    fn deep_clone_copies_attributes_and_text() {
        let mut doc = Document::new();
        let btn = doc.append_element(doc.root(), "button");
        doc.set_attr(btn, "data-target", "dolci");
        doc.append_text(btn, "Dolci");
        let copy = doc.deep_clone(btn);
        assert_eq!(doc.parent(copy), None);
        assert_eq!(doc.attr(copy, "data-target"), Some("dolci"));
        assert_eq!(doc.text_content(copy), "Dolci");
        doc.set_text_content(copy, "Desserts");
        assert_eq!(doc.text_content(btn), "Dolci");
    }

    #[test]
    fn serializes_with_escaping() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.root(), "p");
        doc.add_class(p, "item-description");
        doc.set_attr(p, "data-it", "Pane & \"olio\"");
        doc.set_style(p, "display", "none");
        doc.append_text(p, "a < b");
        let html = doc.outer_html(p);
        assert_eq!(
            html,
            "<p class=\"item-description\" data-it=\"Pane &amp; &quot;olio&quot;\" style=\"display: none\">a &lt; b</p>\n"
        );
    }

    #[test]
    fn discarded_slots_are_reused() {
        let mut doc = Document::new();
        let list = doc.append_element(doc.root(), "ul");
        for _ in 0..3 {
            let li = doc.append_element(list, "li");
            doc.append_text(li, "x");
        }
        let size = doc.arena_len();

        doc.clear_children(list);
        assert!(doc.children(list).is_empty());
        for _ in 0..3 {
            let li = doc.append_element(list, "li");
            doc.append_text(li, "y");
        }
        assert_eq!(doc.arena_len(), size);
        assert_eq!(doc.text_content(list), "yyy");

        let kept = doc.children(list)[0];
        doc.remove(kept);
        doc.append_child(list, kept);
        assert_eq!(doc.text_content(list), "yyy");

        doc.discard(kept);
        assert_eq!(doc.children(list).len(), 2);
        let fresh = doc.append_element(list, "li");
        assert_eq!(doc.arena_len(), size);
        assert_eq!(doc.text_content(fresh), "");
    }
}
