use crate::app::Message;
use detcfg::model::Detector;
use detcfg::session::Action;
use iced::widget::{button, column, row, text};
use iced::{Element, Length};

/// Read-only summary of one detector; clicking it opens the editor on that entry.
pub fn detector_card(index: usize, detector: &Detector) -> Element<'_, Message> {
    let status = if detector.config.enabled {
        "enabled"
    } else {
        "disabled"
    };
    let id = if detector.is_new() {
        "not created yet"
    } else {
        detector.id.as_str()
    };

    let body = column![
        text(detector.name.as_str()).size(20),
        text(detector.query.as_str()).size(14),
        row![
            text(format!("camera: {}", detector.config.vid_config)).size(12),
            text(detector.trigger_summary()).size(12),
            text(status).size(12),
        ]
        .spacing(12),
        text(id).size(11),
    ]
    .spacing(4);

    button(body)
        .on_press(Message::Session(Action::SelectDetector(index)))
        .padding(12)
        .width(Length::Fixed(440.0))
        .into()
}
