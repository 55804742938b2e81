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
use axum::response::Redirect;

use crate::review::driver::Outcome;
use crate::review::state::ServerState;

pub async fn pass_handler(State(state): State<ServerState>) -> Redirect {
    answer(state, Outcome::Pass).await
}

pub async fn fail_handler(State(state): State<ServerState>) -> Redirect {
    answer(state, Outcome::Fail).await
}

/// Pass and fail differ only in what the driver is told.
async fn answer(state: ServerState, outcome: Outcome) -> Redirect {
    state.answer(outcome).await;
    Redirect::to("/")
}
