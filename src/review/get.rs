// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::html;

use crate::review::state::ServerState;
use crate::review::template::back_links;
use crate::review::template::card_text;
use crate::review::template::front_links;
use crate::review::template::page_template;

/// Show the front of the current card, fetching the next one from the
/// driver if no card is locked. Also serves every unknown path.
pub async fn main_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let card = match state.fetch().await {
        Some(card) => card,
        None => return quit_page(&state).await,
    };
    let html = page_template(card_text(&card.front), Some(front_links(&state.labels)));
    (StatusCode::OK, Html(html.into_string()))
}

/// Show the back of the current card. Without a card the back is empty.
pub async fn show_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let back = state.reveal().await.unwrap_or_default();
    let html = page_template(card_text(&back), Some(back_links(&state.labels)));
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn quit_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    quit_page(&state).await
}

async fn quit_page(state: &ServerState) -> (StatusCode, Html<String>) {
    state.end_session().await;
    let body = html! { (state.labels.goodbye) };
    let html = page_template(body, None);
    (StatusCode::OK, Html(html.into_string()))
}
