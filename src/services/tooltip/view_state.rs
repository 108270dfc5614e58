//! Tooltip view state machine.
//!
//! `Info` is the read-only view, `Edit` the inline start/end form. Actions
//! return an [`Effect`] the owner applies; the state itself never touches
//! the canonical value.

use crate::models::settings::Permissions;
use crate::models::view_model::EventInstance;
use crate::utils::date::{parse_timestamp, to_input_value};
use chrono::NaiveDateTime;

pub const MISSING_FIELDS_MESSAGE: &str = "Both start and end dates are required.";
pub const INVALID_DATE_MESSAGE: &str = "Please enter valid start and end dates.";
pub const END_BEFORE_START_MESSAGE: &str = "End date must be after start date.";
pub const SAVE_FAILED_MESSAGE: &str = "The event could not be saved. Please try again.";

/// Values shown in the edit form, plus the last validation failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditForm {
    pub start: String,
    pub end: String,
    pub error: Option<String>,
}

impl EditForm {
    /// Pre-populate the form from the event's current range.
    pub fn for_event(data: &EventInstance) -> Self {
        Self {
            start: input_value(&data.start),
            end: input_value(&data.end),
            error: None,
        }
    }
}

fn input_value(raw: &str) -> String {
    parse_timestamp(raw)
        .map(to_input_value)
        .unwrap_or_else(|_| raw.to_string())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewMode {
    #[default]
    Info,
    Edit(EditForm),
}

impl ViewMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, ViewMode::Edit(_))
    }
}

/// User actions available from the tooltip.
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipAction {
    Edit,
    Save { start: String, end: String },
    Cancel,
    Delete,
    Close,
}

/// What the owner of the state has to do after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Action not available in this state or not permitted.
    Ignored,
    Rerender,
    /// Form stays open with a message; nothing was changed.
    ValidationFailed(String),
    /// Edit accepted; update the event to the new range.
    DateChange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Ask the user before deleting the event.
    ConfirmDelete,
    Hide,
}

/// Check the submitted form values.
pub fn validate_edit(start: &str, end: &str) -> Result<(NaiveDateTime, NaiveDateTime), String> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err(MISSING_FIELDS_MESSAGE.to_string());
    }

    let (Ok(start), Ok(end)) = (parse_timestamp(start), parse_timestamp(end)) else {
        return Err(INVALID_DATE_MESSAGE.to_string());
    };

    if end <= start {
        return Err(END_BEFORE_START_MESSAGE.to_string());
    }

    Ok((start, end))
}

impl ViewMode {
    pub fn handle(
        &mut self,
        action: TooltipAction,
        permissions: Permissions,
        data: &EventInstance,
    ) -> Effect {
        match action {
            TooltipAction::Close => {
                // Edits are discarded; re-showing starts in Info
                *self = ViewMode::Info;
                Effect::Hide
            }
            TooltipAction::Edit if permissions.can_edit && !self.is_edit() => {
                *self = ViewMode::Edit(EditForm::for_event(data));
                Effect::Rerender
            }
            TooltipAction::Delete if permissions.can_delete && !self.is_edit() => {
                Effect::ConfirmDelete
            }
            TooltipAction::Save { start, end } => {
                let ViewMode::Edit(form) = &mut *self else {
                    return ignored("save", data);
                };
                match validate_edit(&start, &end) {
                    Ok((start, end)) => {
                        *self = ViewMode::Info;
                        Effect::DateChange { start, end }
                    }
                    Err(message) => {
                        form.start = start;
                        form.end = end;
                        form.error = Some(message.clone());
                        Effect::ValidationFailed(message)
                    }
                }
            }
            TooltipAction::Cancel if self.is_edit() => {
                *self = ViewMode::Info;
                Effect::Rerender
            }
            TooltipAction::Edit => ignored("edit", data),
            TooltipAction::Delete => ignored("delete", data),
            TooltipAction::Cancel => ignored("cancel", data),
        }
    }
}

fn ignored(action: &str, data: &EventInstance) -> Effect {
    log::debug!("Tooltip action {} ignored for {}", action, data.instance_id);
    Effect::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::view_model::ExtendedData;
    use test_case::test_case;

    fn data() -> EventInstance {
        EventInstance {
            instance_id: "inst-1".into(),
            event_id: "1".into(),
            start: "2024-01-01T10:00:00.000Z".into(),
            end: "2024-01-01T11:00:00.000Z".into(),
            title: Some("Beamline A".into()),
            background_color: None,
            extended_data: ExtendedData::default(),
        }
    }

    fn editing() -> ViewMode {
        let mut mode = ViewMode::Info;
        mode.handle(TooltipAction::Edit, Permissions::new(true, true), &data());
        mode
    }

    #[test]
    fn test_edit_prefills_form() {
        assert_eq!(
            editing(),
            ViewMode::Edit(EditForm {
                start: "2024-01-01T10:00".into(),
                end: "2024-01-01T11:00".into(),
                error: None,
            })
        );
    }

    #[test]
    fn test_edit_requires_permission() {
        let mut mode = ViewMode::Info;
        let effect = mode.handle(TooltipAction::Edit, Permissions::new(false, true), &data());
        assert_eq!(effect, Effect::Ignored);
        assert_eq!(mode, ViewMode::Info);
    }

    #[test]
    fn test_save_valid_returns_to_info() {
        let mut mode = editing();
        let effect = mode.handle(
            TooltipAction::Save {
                start: "2024-01-02T09:00".into(),
                end: "2024-01-02T10:30".into(),
            },
            Permissions::new(true, false),
            &data(),
        );

        assert_eq!(mode, ViewMode::Info);
        let Effect::DateChange { start, end } = effect else {
            panic!("expected a date change, got {:?}", effect);
        };
        assert_eq!(to_input_value(start), "2024-01-02T09:00");
        assert_eq!(to_input_value(end), "2024-01-02T10:30");
    }

    #[test_case("", "2024-01-02T10:00", MISSING_FIELDS_MESSAGE ; "missing start")]
    #[test_case("2024-01-02T10:00", " ", MISSING_FIELDS_MESSAGE ; "missing end")]
    #[test_case("2024-01-02T10:00", "2024-01-02T09:00", END_BEFORE_START_MESSAGE ; "end before start")]
    #[test_case("2024-01-02T10:00", "2024-01-02T10:00", END_BEFORE_START_MESSAGE ; "end equals start")]
    #[test_case("yesterday", "2024-01-02T10:00", INVALID_DATE_MESSAGE ; "unparseable")]
    fn test_save_invalid_stays_in_edit(start: &str, end: &str, message: &str) {
        let mut mode = editing();
        let effect = mode.handle(
            TooltipAction::Save {
                start: start.into(),
                end: end.into(),
            },
            Permissions::new(true, false),
            &data(),
        );

        assert_eq!(effect, Effect::ValidationFailed(message.to_string()));
        let ViewMode::Edit(form) = mode else {
            panic!("expected edit mode");
        };
        assert_eq!(form.error.as_deref(), Some(message));
        assert_eq!(form.start, start);
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut mode = editing();
        let effect = mode.handle(TooltipAction::Cancel, Permissions::default(), &data());
        assert_eq!(effect, Effect::Rerender);
        assert_eq!(mode, ViewMode::Info);
    }

    #[test]
    fn test_delete_needs_permission_and_info_state() {
        let mut mode = ViewMode::Info;
        assert_eq!(
            mode.handle(TooltipAction::Delete, Permissions::new(false, true), &data()),
            Effect::ConfirmDelete
        );
        assert_eq!(
            mode.handle(TooltipAction::Delete, Permissions::new(true, false), &data()),
            Effect::Ignored
        );

        let mut mode = editing();
        assert_eq!(
            mode.handle(TooltipAction::Delete, Permissions::new(true, true), &data()),
            Effect::Ignored
        );
    }

    #[test]
    fn test_close_from_any_state() {
        for mut mode in [ViewMode::Info, editing()] {
            assert_eq!(
                mode.handle(TooltipAction::Close, Permissions::default(), &data()),
                Effect::Hide
            );
            assert_eq!(mode, ViewMode::Info);
        }
    }

    #[test]
    fn test_save_outside_edit_is_ignored() {
        let mut mode = ViewMode::Info;
        let effect = mode.handle(
            TooltipAction::Save {
                start: "2024-01-02T09:00".into(),
                end: "2024-01-02T10:00".into(),
            },
            Permissions::new(true, true),
            &data(),
        );
        assert_eq!(effect, Effect::Ignored);
    }
}
