use eventra_core::{routes, Session};
use eventra_shared::models::Role;

use super::{Action, Element};

fn link(href: &str, label: &str) -> Element {
    Element::new("li").child(Element::new("a").attr("href", href).text(label))
}

/// Navigation bar, rebuilt from the stored session on every page.
pub fn nav(session: &Session) -> Element {
    let ul = Element::new("ul").child(link(routes::PAGE_HOME, "Home"));
    if !session.is_authenticated() {
        return Element::new("nav").child(
            ul.child(link(routes::PAGE_LOGIN, "Login"))
                .child(link(routes::PAGE_REGISTER, "Register")),
        );
    }

    let home = match session.role {
        Some(Role::Organizer) => link(routes::PAGE_ORGANIZER, "Dashboard"),
        Some(Role::Admin) => link(routes::PAGE_ADMIN, "Admin"),
        _ => link(routes::PAGE_MY_BOOKINGS, "My Bookings"),
    };
    let logout = Element::new("li").child(
        Element::new("a")
            .id("logoutBtn")
            .attr("href", "#")
            .text("Logout")
            .on(Action::Logout),
    );
    Element::new("nav").child(ul.child(home).child(logout))
}
