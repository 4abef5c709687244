// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation state machine.
//!
//! [`transition`] is deterministic and free of I/O: it consumes the trimmed
//! inbound text, mutates the conversation in place, and returns the effects
//! (sends, queries, domain writes) for the engine to execute. Query-dependent
//! replies are their own effect variants so the machine never touches
//! storage.

use tokio::time::Instant;

use wappdesk_config::model::CompanyConfig;
use wappdesk_core::types::{LogKind, ServiceCallDraft, ServiceCallType};

use crate::templates;

/// Minimum number of characters for the address and description fields.
pub const MIN_FIELD_CHARS: usize = 3;

/// Where the conversation stands in the menu-driven flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Idle,
    MainMenu,
    SelectServiceType,
    EnterAddress,
    EnterDescription,
    /// Reserved; currently restarts the flow like Idle.
    ViewServiceStatus,
    /// Reserved; currently restarts the flow like Idle.
    UpdateExisting,
}

/// Ephemeral per-phone conversation state, owned by the conversation store
/// and only mutated through [`transition`] (plus the engine's failure
/// fallback). Never persisted.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub phone: String,
    pub step: Step,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub service_type: Option<ServiceCallType>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub last_activity: Instant,
}

impl Conversation {
    /// Fresh idle conversation for a phone, stamped now.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            step: Step::Idle,
            customer_id: None,
            customer_name: None,
            service_type: None,
            address: None,
            description: None,
            last_activity: Instant::now(),
        }
    }

    /// Refresh the activity stamp.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// How long since the last activity.
    pub fn idle_for(&self) -> std::time::Duration {
        self.last_activity.elapsed()
    }

    /// Clear the in-progress service-request fields.
    fn clear_request(&mut self) {
        self.service_type = None;
        self.address = None;
        self.description = None;
    }
}

/// A side effect requested by a transition, executed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send this fixed text to the conversation's phone.
    Send(String),
    /// Look up the customer's open calls and send the status summary
    /// (or the welcome variant when there are none).
    Greet,
    /// Look up and send the customer's open-call list (or the redirect
    /// message when there are none).
    ListOpenCalls,
    /// Create this service call; on success send the confirmation, on
    /// failure send the apology and fall back to the main menu.
    CreateServiceCall(ServiceCallDraft),
    /// Append a log event for this conversation's phone/customer.
    Log { kind: LogKind, details: String },
}

/// Advance the conversation one step on the given inbound text.
///
/// Always refreshes the activity stamp. Menu choices are matched by exact
/// string equality after trimming; no fuzzy matching. Reserved or unknown
/// steps restart the flow as if idle.
pub fn transition(conv: &mut Conversation, input: &str, company: &CompanyConfig) -> Vec<Effect> {
    let input = input.trim();
    conv.touch();

    match conv.step {
        Step::Idle | Step::ViewServiceStatus | Step::UpdateExisting => {
            conv.step = Step::MainMenu;
            vec![
                Effect::Greet,
                Effect::Log {
                    kind: LogKind::SessionStarted,
                    details: "שיחה החלה".to_string(),
                },
            ]
        }
        Step::MainMenu => main_menu_choice(conv, input, company),
        Step::SelectServiceType => select_service_type(conv, input),
        Step::EnterAddress => enter_address(conv, input),
        Step::EnterDescription => enter_description(conv, input),
    }
}

fn main_menu_choice(conv: &mut Conversation, choice: &str, company: &CompanyConfig) -> Vec<Effect> {
    match choice {
        "1" => {
            conv.step = Step::SelectServiceType;
            vec![Effect::Send(templates::service_type_menu())]
        }
        "2" => vec![Effect::ListOpenCalls],
        "3" => vec![Effect::Send(templates::urgent_message(company))],
        "4" => vec![Effect::Send(templates::quote_message(company))],
        "5" => {
            conv.step = Step::Idle;
            vec![
                Effect::Send(templates::handoff_message(company)),
                Effect::Log {
                    kind: LogKind::MessageReceived,
                    details: "לקוח ביקש שיחה עם נציג".to_string(),
                },
            ]
        }
        _ => vec![Effect::Send(templates::did_not_understand())],
    }
}

fn select_service_type(conv: &mut Conversation, choice: &str) -> Vec<Effect> {
    match ServiceCallType::from_menu_key(choice) {
        Some(service_type) => {
            conv.service_type = Some(service_type);
            conv.step = Step::EnterAddress;
            vec![Effect::Send(templates::ask_address())]
        }
        None => vec![Effect::Send(templates::did_not_understand())],
    }
}

fn enter_address(conv: &mut Conversation, address: &str) -> Vec<Effect> {
    if address.chars().count() < MIN_FIELD_CHARS {
        return vec![Effect::Send(templates::ask_valid_address())];
    }
    conv.address = Some(address.to_string());
    conv.step = Step::EnterDescription;
    vec![Effect::Send(templates::ask_description())]
}

fn enter_description(conv: &mut Conversation, description: &str) -> Vec<Effect> {
    if description.chars().count() < MIN_FIELD_CHARS {
        return vec![Effect::Send(templates::ask_longer_description())];
    }

    let draft = ServiceCallDraft {
        customer_id: conv.customer_id.clone().unwrap_or_default(),
        service_type: conv.service_type.unwrap_or(ServiceCallType::Other),
        address: conv.address.clone().unwrap_or_default(),
        description: description.to_string(),
        contact_name: conv.customer_name.clone().unwrap_or_default(),
        contact_mobile: conv.phone.clone(),
    };

    // Optimistic reset; the engine falls back to the main menu if the
    // persistence write fails.
    conv.clear_request();
    conv.step = Step::Idle;

    vec![Effect::CreateServiceCall(draft)]
}
