use yew::prelude::*;

use crate::lead::form::LeadForm;
use crate::lead::messages::Language;

#[function_component(Landing)]
pub fn landing() -> Html {
    // not persisted, a reload starts in German again
    let language = use_state(Language::default);

    let switch_to = |target: Language| {
        let language = language.clone();
        Callback::from(move |_: MouseEvent| language.set(target))
    };

    let (headline, intro) = match *language {
        Language::De => (
            "Ihr neuer Kollega arbeitet ab Tag eins mit.",
            "Jetzt Demo anfragen. Wir melden uns persoenlich bei Ihnen.",
        ),
        Language::En => (
            "Your new Kollega is productive from day one.",
            "Request a demo and we will get in touch personally.",
        ),
    };

    html! {
        <main class="landing">
            <nav class="lang-switch">
                <button class={classes!((*language == Language::De).then_some("active"))}
                    onclick={switch_to(Language::De)}>{"DE"}</button>
                <button class={classes!((*language == Language::En).then_some("active"))}
                    onclick={switch_to(Language::En)}>{"EN"}</button>
            </nav>
            <section class="hero">
                <h1>{ headline }</h1>
                <p>{ intro }</p>
            </section>
            <section id="demo" class="demo-request">
                <LeadForm language={*language} />
            </section>
        </main>
    }
}
