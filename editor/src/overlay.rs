use crate::app::Message;
use detcfg::model::{CameraConfig, PinState, TriggerType};
use detcfg::session::{Action, DetectorForm, EditorSession, FormEdit, FormField};
use iced::widget::{button, column, pick_list, row, text, text_input, Container};
use iced::{Alignment, Color, Element, Length};

const ERROR_COLOR: Color = Color::from_rgb(0.95, 0.45, 0.4);

/// Modal form bound to the detector at `index`.
pub fn overlay_view<'a>(
    index: usize,
    form: &'a DetectorForm,
    session: &'a EditorSession,
    form_error: Option<&'a str>,
) -> Element<'a, Message> {
    let overlay = session.overlay();
    let creating = overlay.is_creating();
    let heading = if overlay.was_add() {
        "New detector"
    } else {
        "Edit detector"
    };

    let bound_entry = session
        .catalog()
        .iter()
        .find(|entry| !form.id.is_empty() && entry.id == form.id)
        .cloned();
    let catalog = pick_list(session.catalog(), bound_entry, |entry| {
        Message::Form(FormEdit::CatalogEntry(entry))
    })
    .placeholder("Use an existing detector...");

    let mut cameras: Vec<CameraConfig> = session
        .cameras()
        .iter()
        .map(|camera| camera.config.clone())
        .collect();
    if !cameras.contains(&form.camera) {
        cameras.insert(0, form.camera.clone());
    }
    let camera_row = row![
        pick_list(cameras, Some(form.camera.clone()), |camera| {
            Message::Form(FormEdit::Camera(camera))
        }),
        button("Refresh")
            .on_press(Message::Session(Action::RefreshCamera(form.camera.clone())))
            .padding(6),
    ]
    .spacing(8);

    let mut triggers = vec![TriggerType::Time, TriggerType::Pin];
    if !triggers.contains(&form.trigger_type) {
        triggers.push(form.trigger_type.clone());
    }
    let trigger_pick = pick_list(triggers, Some(form.trigger_type.clone()), |trigger| {
        Message::Form(FormEdit::Trigger(trigger))
    });

    let trigger_settings: Element<'a, Message> = match form.trigger_type {
        TriggerType::Time => labeled(
            "Cycle time (s)",
            text_input("30", &form.cycle_time)
                .on_input(|value| Message::Form(FormEdit::Text(FormField::CycleTime, value)))
                .padding(6)
                .into(),
        ),
        TriggerType::Pin => labeled(
            "Pin",
            row![
                text_input("GPIO pin", &form.pin)
                    .on_input(|value| Message::Form(FormEdit::Text(FormField::Pin, value)))
                    .padding(6),
                pick_list(PinState::ALL, form.pin_active_state, |state| {
                    Message::Form(FormEdit::PinState(state))
                })
                .placeholder("Active state"),
            ]
            .spacing(8)
            .into(),
        ),
        TriggerType::Other(_) => text("No extra settings for this trigger").size(12).into(),
    };

    let snapshot = if form.image().is_empty() {
        "No snapshot stored".to_string()
    } else {
        format!("Snapshot from {}", form.camera)
    };

    let error_line = text(form_error.or(session.overlay_error()).unwrap_or_default())
        .size(13)
        .color(ERROR_COLOR);

    let actions = row![
        button(if creating { "Creating..." } else { "Save" })
            .on_press_maybe((!creating).then_some(Message::SubmitForm))
            .padding(10),
        button("Delete")
            .on_press_maybe((!creating).then_some(Message::Session(Action::Delete)))
            .padding(10),
        button("Back")
            .on_press_maybe((!creating).then_some(Message::Session(Action::Back)))
            .padding(10),
    ]
    .spacing(10);

    let content = column![
        text(heading).size(28),
        text(format!("Position {}", index + 1)).size(12),
        catalog,
        labeled(
            "Name",
            text_input("Name", &form.name)
                .on_input(|value| Message::Form(FormEdit::Text(FormField::Name, value)))
                .padding(6)
                .into(),
        ),
        labeled(
            "Query",
            text_input("Query", &form.query)
                .on_input(|value| Message::Form(FormEdit::Text(FormField::Query, value)))
                .padding(6)
                .into(),
        ),
        row![
            button(if form.enabled { "Enabled" } else { "Disabled" })
                .on_press(Message::Form(FormEdit::ToggleEnabled))
                .padding(6),
            button(if form.create_new {
                "Create new detector: yes"
            } else {
                "Create new detector: no"
            })
            .on_press(Message::Form(FormEdit::ToggleCreateNew))
            .padding(6),
        ]
        .spacing(8),
        labeled("Camera", camera_row.into()),
        text(snapshot).size(12),
        labeled("Trigger", trigger_pick.into()),
        trigger_settings,
        error_line,
        actions,
    ]
    .spacing(10)
    .padding(16)
    .width(Length::Fixed(520.0));

    Container::new(content).center_x(Length::Fill).into()
}

fn labeled<'a>(label: &'a str, field: Element<'a, Message>) -> Element<'a, Message> {
    row![text(label).size(14).width(Length::Fixed(120.0)), field]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
}
