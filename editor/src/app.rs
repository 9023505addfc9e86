use crate::card::detector_card;
use crate::download::write_export;
use crate::overlay::overlay_view;
use crate::settings::EditorSettings;
use detcfg::client::ConfigClient;
use detcfg::export::ExportFormat;
use detcfg::session::driver::execute;
use detcfg::session::{Action, DetectorForm, Effect, EditorSession, FormEdit};
use detcfg::telemetry::Severity;
use iced::{
    alignment::Horizontal,
    widget::{button, column, row, scrollable, text, text_input, Column, Container},
    Alignment, Color, Element, Length, Task,
};
use std::{path::PathBuf, sync::Arc};

pub struct Editor {
    session: EditorSession,
    client: Arc<ConfigClient>,
    settings: EditorSettings,
    form: Option<(usize, DetectorForm)>,
    form_error: Option<String>,
    download_status: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Session(Action),
    Form(FormEdit),
    SubmitForm,
    Download(ExportFormat),
    Downloaded(Result<PathBuf, String>),
}

impl Editor {
    pub fn boot(settings: EditorSettings) -> (Self, Task<Message>) {
        let client = Arc::new(ConfigClient::new(settings.backend_url.clone()));
        let (session, effects) = EditorSession::boot();
        let editor = Editor {
            session,
            client,
            settings,
            form: None,
            form_error: None,
            download_status: None,
        };
        let task = editor.run(effects);
        (editor, task)
    }

    pub fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Session(action) => {
                let cameras_changed = matches!(
                    action,
                    Action::CameraRefreshed(Some(_)) | Action::CamerasLoaded(_)
                );
                let task = state.dispatch(action);
                if cameras_changed {
                    state.refresh_snapshot();
                }
                task
            }
            Message::Form(edit) => {
                let camera_changed = matches!(edit, FormEdit::Camera(_));
                if let Some((_, form)) = state.form.as_mut() {
                    form.apply(edit);
                }
                if camera_changed {
                    state.refresh_snapshot();
                }
                state.form_error = None;
                Task::none()
            }
            Message::SubmitForm => {
                let submitted = state.form.as_ref().map(|(_, form)| form.submit());
                match submitted {
                    Some(Ok(submission)) => state.dispatch(Action::Save(submission)),
                    Some(Err(err)) => {
                        state.form_error = Some(err.to_string());
                        Task::none()
                    }
                    None => Task::none(),
                }
            }
            Message::Download(format) => match state.session.exports().get(format) {
                Some(link) => Task::perform(
                    write_export(state.settings.download_dir.clone(), link.clone()),
                    Message::Downloaded,
                ),
                None => Task::none(),
            },
            Message::Downloaded(Ok(path)) => {
                state.download_status = Some(format!("Saved {}", path.display()));
                Task::none()
            }
            Message::Downloaded(Err(err)) => {
                state.download_status = Some(format!("Download failed: {err}"));
                Task::none()
            }
        }
    }

    pub fn view(state: &Self) -> Element<'_, Message> {
        let content = match &state.form {
            Some((index, form)) => overlay_view(
                *index,
                form,
                &state.session,
                state.form_error.as_deref(),
            ),
            None => state.list_view(),
        };

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(24)
            .into()
    }

    fn dispatch(&mut self, action: Action) -> Task<Message> {
        let effects = self.session.apply(action);
        self.sync_form();
        self.run(effects)
    }

    fn run(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(effects.into_iter().map(|effect| {
            Task::perform(execute(self.client.clone(), effect), Message::Session)
        }))
    }

    /// Binds a fresh form whenever the overlay opens on an entry; drops it on close.
    fn sync_form(&mut self) {
        match self.session.overlay_detector() {
            Some((index, detector)) => {
                if self.form.as_ref().map(|(bound, _)| *bound) != Some(index) {
                    self.form = Some((index, DetectorForm::from_detector(detector)));
                    self.form_error = None;
                }
            }
            None => {
                self.form = None;
                self.form_error = None;
            }
        }
    }

    fn refresh_snapshot(&mut self) {
        let Some((_, form)) = self.form.as_mut() else {
            return;
        };
        if let Some(camera) = self
            .session
            .cameras()
            .iter()
            .find(|camera| camera.config == form.camera)
        {
            form.take_snapshot(camera);
        }
    }

    fn list_view(&self) -> Element<'_, Message> {
        let exports = self.session.exports();
        let loaded = self.session.is_loaded();
        let downloads = ExportFormat::ALL
            .into_iter()
            .fold(row![].spacing(12), |row, format| {
                row.push(
                    button(text(format.to_string()))
                        .on_press_maybe(exports.get(format).map(|_| Message::Download(format)))
                        .padding(8),
                )
            });

        let api_key_row = row![
            text_input("API Key", self.session.api_key_draft())
                .on_input(|value| Message::Session(Action::ApiKeyDraftChanged(value)))
                .padding(8)
                .width(Length::Fixed(340.0)),
            button("Save")
                .on_press_maybe(loaded.then_some(Message::Session(Action::SaveApiKey)))
                .padding(8),
        ]
        .spacing(8);

        let cards = if self.session.detectors().is_empty() {
            Column::new().push(text("No detectors configured yet").size(14))
        } else {
            self.session.detectors().iter().enumerate().fold(
                Column::new().spacing(8).align_x(Alignment::Center),
                |col, (index, detector)| col.push(detector_card(index, detector)),
            )
        };

        let cameras_row = row![
            text(format!("{} camera(s) available", self.session.cameras().len())).size(12),
            button("Refresh cameras")
                .on_press(Message::Session(Action::RefreshCameras))
                .padding(6),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let data_uris = ExportFormat::ALL
            .into_iter()
            .filter_map(|format| exports.get(format))
            .fold(Column::new().spacing(4), |col, link| {
                col.push(
                    row![
                        text(link.format.file_name())
                            .size(12)
                            .width(Length::Fixed(170.0)),
                        text_input("", &link.data_uri).size(12),
                    ]
                    .spacing(8),
                )
            });

        let metrics = self.client.metrics();
        let (succeeded, failed) = metrics.totals();
        let failing: Vec<String> = metrics
            .failing()
            .into_iter()
            .map(|(endpoint, _)| endpoint.to_string())
            .collect();
        let mut backend_status = format!(
            "Backend {}: {succeeded} ok / {failed} failed",
            self.client.base_url()
        );
        if !failing.is_empty() {
            backend_status.push_str(&format!(" (failing: {})", failing.join(", ")));
        }
        let activity = self.session.activity().entries().rev().fold(
            Column::new().spacing(4),
            |col, entry| {
                let line = text(entry.message.as_str()).size(12);
                col.push(match entry.severity {
                    Severity::Error => line.color(Color::from_rgb(0.95, 0.45, 0.4)),
                    Severity::Info => line,
                })
            },
        );

        column![
            Container::new(downloads)
                .width(Length::Fill)
                .align_x(Horizontal::Right),
            text("Detector Configs").size(36),
            api_key_row,
            Container::new(scrollable(cards).height(Length::Fill))
                .height(Length::FillPortion(3))
                .padding(6),
            button("Add Detector")
                .on_press_maybe(loaded.then_some(Message::Session(Action::AddDetector)))
                .padding(10),
            cameras_row,
            data_uris,
            text(self.download_status.as_deref().unwrap_or_default()).size(12),
            text(backend_status).size(12),
            Container::new(scrollable(activity).height(Length::Fixed(120.0))).padding(6),
        ]
        .spacing(10)
        .align_x(Alignment::Center)
        .into()
    }
}
