use eventra_shared::models::{AdminEvent, AdminStats, AdminUser, EventStatus, Role};

use super::events::{stat, status_badge};
use super::{dollars, AdminTab, Action, Element};

const ROLES: [Role; 3] = [Role::Customer, Role::Organizer, Role::Admin];

pub fn admin_stats(stats: &AdminStats) -> Element {
    Element::new("div")
        .id("adminStats")
        .child(stat("totalUsers", "Users", stats.users.to_string()))
        .child(stat("totalEvents", "Events", stats.events.to_string()))
        .child(stat("totalRevenue", "Revenue", dollars(stats.revenue)))
}

pub fn tabs(active: AdminTab) -> Element {
    let tab = |tab: AdminTab, label: &str| {
        let class = if tab == active { "tab-btn active" } else { "tab-btn" };
        Element::new("button")
            .class(class)
            .text(label)
            .on(Action::ShowAdminTab(tab))
    };
    Element::new("div")
        .class("admin-tabs")
        .child(tab(AdminTab::Users, "Users"))
        .child(tab(AdminTab::Events, "Events"))
}

fn cell(text: impl Into<String>) -> Element {
    Element::new("td").text(text)
}

fn capitalized(role: Role) -> &'static str {
    match role {
        Role::Customer => "Customer",
        Role::Organizer => "Organizer",
        Role::Admin => "Admin",
    }
}

/// One option per role; choosing an option dispatches the role change.
fn role_select(user: &AdminUser) -> Element {
    Element::new("select").class("form-select").children(ROLES.iter().map(|&role| {
        let option = Element::new("option")
            .attr("value", role.as_str())
            .text(capitalized(role));
        if role == user.role {
            option.attr("selected", "selected")
        } else {
            option.on(Action::ChangeRole {
                user_id: user.id.clone(),
                role,
            })
        }
    }))
}

pub fn users_table(users: &[AdminUser]) -> Element {
    Element::new("tbody").id("allUsersTable").children(users.iter().map(|u| {
        Element::new("tr")
            .child(cell(u.id.to_string()))
            .child(cell(&u.username))
            .child(cell(&u.email))
            .child(Element::new("td").child(role_select(u)))
    }))
}

pub fn events_table(events: &[AdminEvent]) -> Element {
    Element::new("tbody").id("allEventsTable").children(events.iter().map(|e| {
        let control = if e.status == EventStatus::Active {
            Element::new("button")
                .class("btn-warning btn-sm")
                .text("Suspend")
                .on(Action::AdminSetEventStatus {
                    event_id: e.id.clone(),
                    status: EventStatus::Suspended,
                })
        } else {
            Element::new("button")
                .class("btn-secondary btn-sm")
                .attr("disabled", "disabled")
                .text(e.status.as_str())
        };
        Element::new("tr")
            .child(cell(e.id.to_string()))
            .child(cell(&e.title))
            .child(cell(&e.organizer))
            .child(Element::new("td").child(status_badge(e.status)))
            .child(cell(dollars(e.revenue)))
            .child(Element::new("td").child(control))
    }))
}
