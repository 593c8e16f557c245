use std::fmt::Write;

use eventra_shared::models::{EventStatus, Role};
use eventra_shared::Id;

/// Handler reference attached to a node at render time.
///
/// The page controller receives these back through `dispatch`; nothing is
/// looked up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Public event card. Goes to the event page, or to login without a session.
    BookTickets { event_id: Id },
    ToggleSeat { seat_id: Id },
    OpenCheckout,
    /// Payment form submit.
    Pay,
    ManageEvent { event_id: Id, title: String, status: EventStatus },
    /// Organizer activating or cancelling one of their events.
    SetEventStatus { event_id: Id, status: EventStatus },
    /// Admin moderation of any event.
    AdminSetEventStatus { event_id: Id, status: EventStatus },
    ChangeRole { user_id: Id, role: Role },
    ShowAdminTab(AdminTab),
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Users,
    Events,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// Minimal DOM fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    pub action: Option<Action>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            action: None,
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn on(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map_or(false, |c| c.split_whitespace().any(|c| c == class))
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Depth-first search, including `self`.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.elements() {
            child.find_all(pred, out);
        }
    }

    pub fn by_class(&self, class: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.find_all(&|e: &Element| e.has_class(class), &mut out);
        out
    }

    pub fn by_id(&self, id: &str) -> Option<&Element> {
        let mut out = Vec::new();
        self.find_all(&|e: &Element| e.get_attr("id") == Some(id), &mut out);
        out.into_iter().next()
    }

    /// Every handler reference in the fragment, in document order.
    pub fn actions(&self) -> Vec<&Action> {
        let mut out = Vec::new();
        self.find_all(&|e: &Element| e.action.is_some(), &mut out);
        out.into_iter().filter_map(|e| e.action.as_ref()).collect()
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if self.action.is_some() {
            out.push_str(" data-action");
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape(t)),
                Node::Element(e) => e.write_html(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }

    /// Indented plain-text rendering for the terminal.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        let own: String = self
            .children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect::<Vec<_>>()
            .join(" ");
        let own = own.trim();
        let mut depth = depth;
        if !own.is_empty() {
            let line = if self.action.is_some() {
                format!("[{}]", own)
            } else {
                own.to_string()
            };
            let _ = writeln!(out, "{}{}", "  ".repeat(depth), line);
            depth += 1;
        }
        for child in self.elements() {
            child.write_outline(depth, out);
        }
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_is_escaped() {
        let el = Element::new("h3")
            .class("title")
            .attr("title", "\"quoted\"")
            .text("Rock & <Roll>");
        assert_eq!(
            el.to_html(),
            "<h3 class=\"title\" title=\"&quot;quoted&quot;\">Rock &amp; &lt;Roll&gt;</h3>"
        );
    }

    #[test]
    fn test_actions_in_document_order() {
        let el = Element::new("div")
            .child(Element::new("button").text("a").on(Action::OpenCheckout))
            .child(Element::new("div").child(Element::new("button").text("b").on(Action::Pay)));
        assert_eq!(el.actions(), vec![&Action::OpenCheckout, &Action::Pay]);
        assert!(el.to_html().contains("data-action"));
    }

    #[test]
    fn test_outline_marks_actions() {
        let el = Element::new("div")
            .child(Element::new("h3").text("Jazz Night"))
            .child(Element::new("button").text("Book Tickets").on(Action::Logout));
        assert_eq!(el.outline(), "Jazz Night\n[Book Tickets]\n");
    }
}
