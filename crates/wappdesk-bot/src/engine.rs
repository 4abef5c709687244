// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The orchestrator tying ingestion to the state machine.
//!
//! One inbound message is processed end to end here: resolve the customer,
//! record the message, advance the state machine exactly once under the
//! per-phone lock, execute the resulting effects (sends, queries, domain
//! writes), and flip the message record to processed or failed.
//!
//! Send failures are logged and swallowed (best effort, no retry). A
//! persistence failure while creating the service call degrades to an
//! apology and a fall back to the main menu, never a crash.

use std::sync::Arc;

use tracing::{debug, error, warn};

use wappdesk_config::model::CompanyConfig;
use wappdesk_core::types::{
    Customer, LogKind, MessageStatus, ParsedInbound, WhatsAppLog, WhatsAppMessage,
};
use wappdesk_core::{DeskStore, EventLog, OutboundSender, WappdeskError};

use crate::machine::{self, Conversation, Effect, Step};
use crate::resolver::CustomerResolver;
use crate::store::ConversationStore;
use crate::templates;

/// Log previews keep at most this many characters of the message body.
const LOG_PREVIEW_CHARS: usize = 100;

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

/// Drives conversations: the single entry point for parsed inbound messages.
pub struct BotEngine {
    store: Arc<dyn DeskStore>,
    sender: Arc<dyn OutboundSender>,
    conversations: Arc<ConversationStore>,
    resolver: CustomerResolver,
    log: EventLog,
    company: CompanyConfig,
}

impl BotEngine {
    pub fn new(
        store: Arc<dyn DeskStore>,
        sender: Arc<dyn OutboundSender>,
        conversations: Arc<ConversationStore>,
        company: CompanyConfig,
    ) -> Self {
        let log = EventLog::new(store.clone());
        let resolver = CustomerResolver::new(store.clone(), log.clone());
        Self {
            store,
            sender,
            conversations,
            resolver,
            log,
            company,
        }
    }

    /// Process one inbound message to completion.
    ///
    /// Errors escape only when the message could not even be recorded;
    /// everything later degrades to a logged event plus a user-facing
    /// fallback.
    pub async fn handle_inbound(&self, inbound: ParsedInbound) -> Result<(), WappdeskError> {
        let phone = inbound.phone.clone();

        let existing = self.resolver.lookup(&phone).await?;

        let record =
            WhatsAppMessage::incoming(&phone, inbound.content.record_text(), existing.as_ref());
        self.store.record_message(&record).await?;

        let mut received = WhatsAppLog::event(
            LogKind::MessageReceived,
            &phone,
            format!("הודעה התקבלה: {}", preview(&record.text)),
        )
        .with_message(&record.id);
        if let Some(customer) = &existing {
            received = received.with_customer(&customer.id);
        }
        self.log.record(received).await;

        match &existing {
            Some(customer) => {
                self.log
                    .record(
                        WhatsAppLog::event(
                            LogKind::CustomerIdentified,
                            &phone,
                            format!("לקוח זוהה: {}", customer.name),
                        )
                        .with_customer(&customer.id)
                        .with_message(&record.id),
                    )
                    .await;
            }
            None => {
                self.log
                    .record(
                        WhatsAppLog::event(
                            LogKind::CustomerNotFound,
                            &phone,
                            format!("לקוח לא נמצא עבור מספר: {phone}"),
                        )
                        .with_message(&record.id),
                    )
                    .await;
            }
        }

        // Only genuine text enters the state machine; placeholders are
        // recorded above and go no further.
        let Some(text) = inbound.content.as_text() else {
            debug!(%phone, "non-text content recorded, not routed");
            return Ok(());
        };
        let text = text.to_string();

        let (customer, first_contact) = match existing {
            Some(customer) => (customer, false),
            None => match self.resolver.create(&phone, &inbound.sender_name).await {
                Ok(customer) => (customer, true),
                Err(e) => {
                    error!(%phone, error = %e, "customer auto-creation failed");
                    self.log
                        .record(WhatsAppLog::event(
                            LogKind::BotError,
                            &phone,
                            format!("שגיאה ביצירת לקוח: {e}"),
                        ))
                        .await;
                    self.send_best_effort(&phone, &templates::apology_message(&self.company))
                        .await;
                    let _ = self
                        .store
                        .update_message_status(&record.id, MessageStatus::Failed)
                        .await;
                    return Ok(());
                }
            },
        };

        // Per-phone critical section: one transition at a time.
        let mut conv = self.conversations.acquire(&phone).await;
        conv.customer_id = Some(customer.id.clone());
        conv.customer_name = Some(customer.name.clone());

        let effects = machine::transition(&mut conv, &text, &self.company);
        let outcome = self
            .execute_effects(&mut conv, &customer, first_contact, effects)
            .await;
        // Flip the record while still holding the per-phone lock, then
        // release it by dropping the guard.
        let result = match outcome {
            Ok(()) => {
                self.store
                    .update_message_status(&record.id, MessageStatus::Processed)
                    .await
            }
            Err(e) => {
                error!(%phone, error = %e, "transition effects failed");
                self.log
                    .record(
                        WhatsAppLog::event(
                            LogKind::BotError,
                            &phone,
                            format!("שגיאה בעיבוד הודעה: {e}"),
                        )
                        .with_customer(&customer.id),
                    )
                    .await;
                self.send_best_effort(&phone, &templates::apology_message(&self.company))
                    .await;
                let _ = self
                    .store
                    .update_message_status(&record.id, MessageStatus::Failed)
                    .await;
                Ok(())
            }
        };
        drop(conv);
        result
    }

    /// Execute the effects of one transition, in order.
    async fn execute_effects(
        &self,
        conv: &mut Conversation,
        customer: &Customer,
        first_contact: bool,
        effects: Vec<Effect>,
    ) -> Result<(), WappdeskError> {
        for effect in effects {
            match effect {
                Effect::Send(text) => {
                    self.send_best_effort(&conv.phone, &text).await;
                }
                Effect::Greet => {
                    let text = if first_contact {
                        templates::first_time_message(&self.company)
                    } else {
                        let open = self.store.open_service_calls(&customer.id, Some(1)).await?;
                        match open.first() {
                            Some(call) => {
                                templates::open_call_message(&customer.name, call, &self.company)
                            }
                            None => templates::welcome_message(&customer.name),
                        }
                    };
                    self.send_best_effort(&conv.phone, &text).await;
                }
                Effect::ListOpenCalls => {
                    let calls = self.store.open_service_calls(&customer.id, None).await?;
                    let text = if calls.is_empty() {
                        templates::no_open_calls_message()
                    } else {
                        templates::service_calls_list(&calls, &self.company)
                    };
                    self.send_best_effort(&conv.phone, &text).await;
                }
                Effect::CreateServiceCall(draft) => match self.store.create_service_call(&draft).await {
                    Ok(call) => {
                        self.send_best_effort(
                            &conv.phone,
                            &templates::confirmation_message(&call, &self.company),
                        )
                        .await;
                        self.log
                            .record(
                                WhatsAppLog::event(
                                    LogKind::ServiceCallCreated,
                                    &conv.phone,
                                    format!("קריאת שירות #{} נוצרה", call.call_number),
                                )
                                .with_customer(&customer.id)
                                .with_service_call(&call.id),
                            )
                            .await;
                    }
                    Err(e) => {
                        error!(phone = %conv.phone, error = %e, "service call creation failed");
                        self.log
                            .record(
                                WhatsAppLog::event(
                                    LogKind::BotError,
                                    &conv.phone,
                                    format!("שגיאה בפתיחת קריאת שירות: {e}"),
                                )
                                .with_customer(&customer.id),
                            )
                            .await;
                        self.send_best_effort(
                            &conv.phone,
                            &templates::apology_message(&self.company),
                        )
                        .await;
                        // Back to the menu rather than idle, so the customer
                        // can retry without the whole onboarding greeting.
                        conv.step = Step::MainMenu;
                    }
                },
                Effect::Log { kind, details } => {
                    self.log
                        .record(
                            WhatsAppLog::event(kind, &conv.phone, details)
                                .with_customer(&customer.id),
                        )
                        .await;
                }
            }
        }
        Ok(())
    }

    /// One send attempt; the gateway client logs failures, we only trace.
    async fn send_best_effort(&self, phone: &str, text: &str) {
        if let Err(e) = self.sender.send_text(phone, text).await {
            warn!(phone, error = %e, "outbound send failed");
        }
    }
}
