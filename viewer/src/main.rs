use iced::{
    widget::{button, column, row, scrollable, text, Column, Container},
    Alignment, Element, Length, Task, Theme,
};
use neocore::catalog::{NeoSummary, ObjectEnvelope};
use neocore::prelude::CatalogError;
use neocore::view::{FetchTicket, ObjectView};
use serde::Deserialize;

fn main() -> iced::Result {
    iced::application(Viewer::boot, Viewer::update, Viewer::view)
        .title(application_title)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Viewer) -> String {
    "NEO Catalog Viewer".into()
}

fn application_theme(_: &Viewer) -> Theme {
    Theme::Dark
}

/// Gateway base URL, injected through the environment rather than baked
/// into the fetch paths.
fn gateway_url() -> String {
    std::env::var("NEO_GATEWAY_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".into())
}

#[derive(Debug)]
struct Viewer {
    endpoint: String,
    feed: Vec<NeoSummary>,
    selected: Option<usize>,
    object: ObjectView,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    ReloadFeed,
    FeedFetched(Result<Vec<NeoSummary>, String>),
    ObjectChosen(usize),
    DetailFetched(FetchTicket, Result<ObjectEnvelope, String>),
}

impl Viewer {
    fn boot() -> (Self, Task<Message>) {
        let endpoint = gateway_url();
        (
            Viewer {
                endpoint: endpoint.clone(),
                feed: Vec::new(),
                selected: None,
                object: ObjectView::new(),
                status: "Loading catalog...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_feed(endpoint), Message::FeedFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::ReloadFeed => {
                state.status = "Reloading catalog...".into();
                Task::perform(fetch_feed(state.endpoint.clone()), Message::FeedFetched)
            }
            Message::FeedFetched(Ok(rows)) => {
                state.status = format!("{} objects in today's window", rows.len());
                state.push_history(format!("Feed: {} objects", rows.len()));
                state.feed = rows;
                state.selected = None;
                Task::none()
            }
            Message::FeedFetched(Err(err)) => {
                state.status = format!("Feed error: {err}");
                Task::none()
            }
            Message::ObjectChosen(index) => {
                let Some(summary) = state.feed.get(index) else {
                    return Task::none();
                };
                state.selected = Some(index);
                let identifier = summary.id.clone();
                match state.object.begin_fetch(Some(&identifier)) {
                    Some(ticket) => {
                        state.push_history(format!("Fetching {}", summary.name));
                        let endpoint = state.endpoint.clone();
                        Task::perform(fetch_object(endpoint, identifier), move |outcome| {
                            Message::DetailFetched(ticket, outcome)
                        })
                    }
                    None => Task::none(),
                }
            }
            Message::DetailFetched(ticket, outcome) => {
                let applied = state
                    .object
                    .complete(ticket, outcome.map_err(CatalogError::Upstream));
                if applied {
                    if state.object.has_data() {
                        let summary = format!(
                            "Object {}: {} approaches / {} orbital solutions",
                            state.object.identifier().unwrap_or("?"),
                            state.object.approaches().len(),
                            state.object.orbits().len()
                        );
                        state.status = summary.clone();
                        state.push_history(summary);
                    } else {
                        state.status = state.object.message().to_string();
                        state.push_history(state.object.message().to_string());
                    }
                }
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let feed_list = if state.feed.is_empty() {
            Column::new().push(text("No objects loaded").size(12))
        } else {
            state.feed.iter().enumerate().fold(
                Column::new().spacing(4),
                |col, (index, summary)| {
                    col.push(
                        button(text(summary.list_label()).size(13))
                            .on_press(Message::ObjectChosen(index))
                            .padding(6)
                            .width(Length::Fill),
                    )
                },
            )
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let catalog_column = column![
            text("NEO Catalog").size(26),
            button("Reload feed").on_press(Message::ReloadFeed).padding(10),
            text(&state.status).size(14),
            scrollable(feed_list).height(Length::Fill),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(110.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(360.0));

        let detail_header = match state.selected.and_then(|index| state.feed.get(index)) {
            Some(summary) => format!("Selected: {}", summary.name),
            None => "Selected object".to_string(),
        };
        let detail_column = column![
            text(detail_header).size(26),
            object_panel(&state.object),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![catalog_column, detail_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

/// Detail panel: orbit cards then approach cards once a fetch succeeded,
/// a loading line while a cycle is in flight, nothing otherwise. Empty
/// sequences still render their (empty) blocks.
fn object_panel(object: &ObjectView) -> Element<'_, Message> {
    if object.has_data() {
        let orbit_cards = object
            .orbits()
            .iter()
            .fold(Column::new().spacing(10), |col, orbit| {
                col.push(labeled_card(orbit.fields()))
            });
        let approach_cards = object
            .approaches()
            .iter()
            .fold(Column::new().spacing(10), |col, approach| {
                col.push(labeled_card(approach.fields()))
            });

        let content = column![
            text("Orbital data").size(18),
            orbit_cards,
            text("Close approaches").size(18),
            approach_cards,
        ]
        .spacing(10);

        scrollable(content).height(Length::Fill).into()
    } else if object.loading() {
        text("Loading...").size(14).into()
    } else {
        Column::new().into()
    }
}

fn labeled_card(fields: Vec<(&'static str, String)>) -> Container<'static, Message> {
    let body = fields
        .into_iter()
        .fold(Column::new().spacing(2), |col, (label, value)| {
            col.push(text(format!("{label}: {value}")).size(12))
        });
    Container::new(body).padding(8)
}

#[derive(Debug, Deserialize)]
struct FeedReply {
    #[serde(default)]
    data: Vec<NeoSummary>,
}

async fn fetch_feed(endpoint: String) -> Result<Vec<NeoSummary>, String> {
    let response = reqwest::get(format!("{endpoint}/api/neo"))
        .await
        .map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(response.status().to_string());
    }
    let reply = response
        .json::<FeedReply>()
        .await
        .map_err(|e| e.to_string())?;
    Ok(reply.data)
}

async fn fetch_object(endpoint: String, identifier: String) -> Result<ObjectEnvelope, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{endpoint}/api/neoObject"))
        .json(&serde_json::json!({ "id": identifier }))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(response.status().to_string());
    }
    response
        .json::<ObjectEnvelope>()
        .await
        .map_err(|e| e.to_string())
}
