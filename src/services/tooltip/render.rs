//! Tooltip markup.
//!
//! `render` is a pure function of view state, event data and permissions.
//! Every call produces the complete popup content.

use super::view_state::{EditForm, ViewMode};
use crate::models::reference::ReferenceEntity;
use crate::models::settings::Permissions;
use crate::models::view_model::{EventInstance, TooltipExtra};
use crate::utils::date::display_timestamp;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

pub const TOOLTIP_CLASS: &str = "fc-tooltip";
pub const VISIBLE_CLASS: &str = "fc-tooltip--show";

/// Header button shown when the permission allows it.
struct HeaderAction {
    action: &'static str,
    label: &'static str,
    icon: &'static str,
}

const EDIT_ACTION: HeaderAction = HeaderAction {
    action: "edit",
    label: "Edit",
    icon: "pen",
};

const DELETE_ACTION: HeaderAction = HeaderAction {
    action: "delete",
    label: "Delete",
    icon: "trash",
};

pub fn render(
    view: &ViewMode,
    data: &EventInstance,
    extra: &TooltipExtra,
    permissions: Permissions,
) -> String {
    let mut out = String::new();
    render_header(&mut out, view, data, permissions);
    out.push_str("<div class=\"fc-tooltip__body\">");
    match view {
        ViewMode::Info => render_info(&mut out, data, extra),
        ViewMode::Edit(form) => render_edit(&mut out, form),
    }
    out.push_str("</div>");
    out
}

fn render_header(out: &mut String, view: &ViewMode, data: &EventInstance, permissions: Permissions) {
    let color = data.background_color.as_deref().unwrap_or_default();
    let title = data.title.as_deref().unwrap_or_default();

    out.push_str(&format!(
        "<div class=\"fc-tooltip__title-box\">\
         <i class=\"fc-daygrid-event-dot\" style=\"border-color: {}\"></i>\
         <span class=\"fc-tooltip__title\">{}</span>",
        attr(color),
        text(title)
    ));

    // Actions only make sense against the read-only view
    if !view.is_edit() {
        if permissions.can_edit {
            render_action(out, &EDIT_ACTION);
        }
        if permissions.can_delete {
            render_action(out, &DELETE_ACTION);
        }
    }

    out.push_str(
        "<button type=\"button\" title=\"Close\" class=\"fc-tooltip__action-button\" \
         data-action=\"close\"><i class=\"btn-close\"></i></button></div>",
    );
}

fn render_action(out: &mut String, action: &HeaderAction) {
    out.push_str(&format!(
        "<button type=\"button\" title=\"{}\" class=\"fc-tooltip__action-button\" \
         data-action=\"{}\"><i class=\"fas fa-{}\"></i></button>",
        action.label, action.action, action.icon
    ));
}

fn render_info(out: &mut String, data: &EventInstance, extra: &TooltipExtra) {
    let event_type = extra.event_type.as_deref().unwrap_or("-");
    out.push_str(&format!("<b>Type:</b> {}<br>", text(event_type)));

    if let Some(proposal) = &extra.proposal {
        render_reference(out, "Proposal", proposal);
    }
    if let Some(instrument) = &extra.instrument {
        render_reference(out, "Instrument", instrument);
    }

    out.push_str(&format!(
        "<b>From:</b> {}<br><b>To:</b> {}",
        text(&display_timestamp(&data.start)),
        text(&display_timestamp(&data.end))
    ));
}

fn render_reference(out: &mut String, label: &str, entity: &ReferenceEntity) {
    let line = match &entity.url {
        Some(url) => format!(
            "<b>{}:</b> <a href=\"{}\">{}</a><br>",
            label,
            attr(url),
            text(&entity.title)
        ),
        None => format!("<b>{}:</b> {}<br>", label, text(&entity.title)),
    };
    out.push_str(&line);
}

fn render_edit(out: &mut String, form: &EditForm) {
    out.push_str(&format!(
        "<form class=\"fc-tooltip__edit-form\">\
         <label>From <input type=\"datetime-local\" name=\"start\" value=\"{}\" required></label>\
         <label>To <input type=\"datetime-local\" name=\"end\" value=\"{}\" required></label>",
        attr(&form.start),
        attr(&form.end)
    ));

    if let Some(error) = &form.error {
        out.push_str(&format!(
            "<p class=\"fc-tooltip__error\" role=\"alert\">{}</p>",
            text(error)
        ));
    }

    out.push_str(
        "<button type=\"button\" data-action=\"save\">Save</button>\
         <button type=\"button\" data-action=\"cancel\">Cancel</button></form>",
    );
}
