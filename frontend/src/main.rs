use yew::prelude::*;
use log::{info, Level};

mod config;
mod lead {
    pub mod form;
    pub mod messages;
    pub mod validation;
}
mod pages {
    pub mod landing;
}

use pages::landing::Landing;

#[function_component]
fn App() -> Html {
    html! {
        <Landing />
    }
}

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(Level::Info).expect("error initializing log");
    info!("Starting landing page");
    yew::Renderer::<App>::new().render();
}
