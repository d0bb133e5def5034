use yew::prelude::*;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use log::{info, error};

use crate::config;
use crate::lead::messages::{FormStatus, Language};
use crate::lead::validation::is_business_email;

pub const INTERESTS: &[&str] = &[
    "Sales Kollega",
    "Marketing Kollega",
    "HR Kollega",
    "Support Kollega",
];

#[derive(Serialize)]
struct LeadPayload {
    interesse: String,
    business_email: String,
    business_mobile: String,
    unternehmen: String,
    language: &'static str,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

async fn submit_lead(payload: &LeadPayload, language: Language) -> Result<(), String> {
    let request = Request::post(&format!("{}/api/lead", config::get_backend_url()))
        .json(payload)
        .map_err(|e| {
            error!("Failed to encode lead: {}", e);
            language.failure().to_string()
        })?;

    let response = request.send().await.map_err(|e| {
        error!("Lead request failed: {}", e);
        language.failure().to_string()
    })?;

    if response.ok() {
        return Ok(());
    }

    match response.json::<ErrorResponse>().await {
        Ok(body) => Err(body.message),
        Err(_) => Err(language.failure().to_string()),
    }
}

#[derive(Properties, PartialEq)]
pub struct LeadFormProps {
    pub language: Language,
}

#[function_component(LeadForm)]
pub fn lead_form(props: &LeadFormProps) -> Html {
    let language = props.language;
    let interesse = use_state(|| INTERESTS[0].to_string());
    let email = use_state(String::new);
    let mobile = use_state(String::new);
    let company = use_state(String::new);
    let status = use_state(|| FormStatus::Idle);

    let onsubmit = {
        let interesse = interesse.clone();
        let email = email.clone();
        let mobile = mobile.clone();
        let company = company.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *status == FormStatus::Sending {
                return;
            }

            let business_email = email.trim().to_string();
            if !is_business_email(&business_email) {
                status.set(FormStatus::Failed(language.business_email().to_string()));
                return;
            }

            let payload = LeadPayload {
                interesse: interesse.trim().to_string(),
                business_email,
                business_mobile: mobile.trim().to_string(),
                unternehmen: company.trim().to_string(),
                language: language.code(),
            };

            status.set(FormStatus::Sending);
            let email = email.clone();
            let mobile = mobile.clone();
            let company = company.clone();
            let status = status.clone();
            spawn_local(async move {
                match submit_lead(&payload, language).await {
                    Ok(()) => {
                        info!("Lead submitted");
                        email.set(String::new());
                        mobile.set(String::new());
                        company.set(String::new());
                        status.set(FormStatus::Sent);
                    }
                    Err(message) => status.set(FormStatus::Failed(message)),
                }
            });
        })
    };

    let on_interesse = {
        let interesse = interesse.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            interesse.set(select.value());
        })
    };
    let text_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let sending = *status == FormStatus::Sending;
    let (email_label, mobile_label, company_label) = match language {
        Language::De => ("Business-E-Mail", "Business-Mobilnummer", "Unternehmen (optional)"),
        Language::En => ("Business email", "Business mobile", "Company (optional)"),
    };

    html! {
        <form class="lead-form" {onsubmit}>
            <select name="interesse" onchange={on_interesse}>
                { for INTERESTS.iter().map(|option| html! {
                    <option value={*option} selected={*interesse == *option}>{ *option }</option>
                }) }
            </select>
            <input type="email" name="business_email" required=true placeholder={email_label}
                value={(*email).clone()} oninput={text_input(&email)} />
            <input type="tel" name="business_mobile" required=true placeholder={mobile_label}
                value={(*mobile).clone()} oninput={text_input(&mobile)} />
            <input type="text" name="unternehmen" placeholder={company_label}
                value={(*company).clone()} oninput={text_input(&company)} />
            <button type="submit" class="lead-submit" disabled={sending}>
                { if sending { language.sending() } else { language.submit_label() } }
            </button>
            <p class={status.css_class()}>{ status.text(language) }</p>
        </form>
    }
}
