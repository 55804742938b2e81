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

use maud::DOCTYPE;
use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::config::Labels;

pub fn page_template(body: Markup, mid: Option<Markup>) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                link rel="stylesheet" type="text/css" href="/_/style.css";
                title { "oboeru" }
            }
            body {
                div {
                    (body)
                    @if let Some(mid) = mid {
                        (mid)
                    }
                }
            }
        }
    }
}

/// Card text is written by the user and may carry markup (e.g. ruby), so
/// it is inserted as is.
pub fn card_text(text: &str) -> Markup {
    PreEscaped(text.to_string())
}

/// Links shown under the front of a card.
pub fn front_links(labels: &Labels) -> Markup {
    html! {
        div.link {
            a href="/quit" { (labels.quit) }
            " · "
            a href="/show" { (labels.show) }
        }
    }
}

/// Links shown under the back of a card.
pub fn back_links(labels: &Labels) -> Markup {
    html! {
        div.link {
            a href="/fail" { (labels.fail) }
            " · "
            a href="/quit" { (labels.quit) }
            " · "
            a href="/pass" { (labels.pass) }
        }
    }
}
