// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound message templates.
//!
//! All user-facing copy lives here, in Hebrew, with company branding
//! substituted from [`CompanyConfig`]. WhatsApp formatting: `*bold*`,
//! `_italic_`.

use wappdesk_config::model::CompanyConfig;
use wappdesk_core::types::{ServiceCall, ServiceCallType};

/// Main menu block shared by the greeting variants.
const MAIN_MENU: &str = "*1* - _פתיחת קריאת שירות_
*2* - _בירור בנוגע לשירות קיים_
*3* - _תקלה דחופה_
*4* - _הצעת מחיר_
*5* - _שיחה עם נציג_";

/// First-contact greeting with the privacy notice, shown when the customer
/// was auto-created in this turn.
pub fn first_time_message(company: &CompanyConfig) -> String {
    format!(
        "ברוכים הבאים ל-WhatsApp של *{}*.

לידיעתך, השימוש בשירות הינו בכפוף לתנאי השימוש ומדיניות הפרטיות:
{}

כיצד נוכל לעזור?
*בכל שאלה עם אפשרויות בחירה - יש להשיב מספר בלבד.*

{MAIN_MENU}",
        company.name, company.privacy_url
    )
}

/// Personalized greeting for a returning customer with no open calls.
pub fn welcome_message(customer_name: &str) -> String {
    format!(
        "שלום *{customer_name}*! 👋

כיצד נוכל לעזור?

{MAIN_MENU}"
    )
}

/// Greeting for a returning customer with an open service call.
pub fn open_call_message(customer_name: &str, call: &ServiceCall, company: &CompanyConfig) -> String {
    format!(
        "שלום *{customer_name}*! 👋

יש לך קריאת שירות פתוחה:
📋 קריאה *#{}*
📍 סטטוס: *{}*
🔧 סוג: {}
🕐 עדכון אחרון: {}

לפרטים נוספים: {}

כיצד נוכל לעזור?

{MAIN_MENU}",
        call.call_number,
        call.status.caption(),
        call.service_type.caption(),
        format_timestamp(&call.last_update_at),
        company.portal_url
    )
}

/// The service-type selection menu.
pub fn service_type_menu() -> String {
    let mut message = String::from("מה סוג השירות הנדרש?\n");
    for ty in ServiceCallType::ALL {
        message.push_str(&format!("\n*{}* - _{}_", ty.menu_key(), ty.caption()));
    }
    message
}

/// Confirmation after a service call was created, including its call number.
pub fn confirmation_message(call: &ServiceCall, company: &CompanyConfig) -> String {
    format!(
        "✅ קריאת שירות *#{}* נפתחה בהצלחה!

📋 סוג: {}
📍 כתובת: {}
📝 תיאור: {}

נציג יצור איתך קשר בהקדם.
לפרטים נוספים: {}",
        call.call_number,
        call.service_type.caption(),
        call.address,
        call.description,
        company.portal_url
    )
}

/// List of the customer's open service calls.
pub fn service_calls_list(calls: &[ServiceCall], company: &CompanyConfig) -> String {
    let mut message = String::from("קריאות השירות שלך:\n\n");
    for call in calls {
        message.push_str(&format!(
            "📋 *#{}* - {}\n   {} | {}\n\n",
            call.call_number,
            call.status.caption(),
            call.service_type.caption(),
            format_date(&call.last_update_at)
        ));
    }
    message.push_str(&format!("לפרטים נוספים: {}", company.portal_url));
    message
}

/// Redirect when the customer asked for open calls but has none.
pub fn no_open_calls_message() -> String {
    "אין קריאות שירות פתוחות.\n\nלפתיחת קריאה חדשה הקלד *1*".to_string()
}

/// Urgent-issue contact details.
pub fn urgent_message(company: &CompanyConfig) -> String {
    format!(
        "🚨 *תקלה דחופה*

לטיפול מיידי בתקלה דחופה:
📞 התקשר עכשיו: *{}*

או הקלד *1* לפתיחת קריאת שירות דחופה.",
        company.support_phone
    )
}

/// Quote-request contact details.
pub fn quote_message(company: &CompanyConfig) -> String {
    format!(
        "לקבלת הצעת מחיר, אנא צור קשר עם נציג:\n📞 *{}*\n\nאו השאר פרטים ונחזור אליך.",
        company.support_phone
    )
}

/// Human-handoff acknowledgement.
pub fn handoff_message(company: &CompanyConfig) -> String {
    format!(
        "נציג יצור איתך קשר בהקדם.\n📞 לשירות מיידי: *{}*",
        company.support_phone
    )
}

/// Re-prompt for unrecognized menu input.
pub fn did_not_understand() -> String {
    "לא הבנתי את בחירתך.\nאנא הקלד מספר בין 1-5.".to_string()
}

pub fn ask_address() -> String {
    "מהי כתובת האתר?".to_string()
}

pub fn ask_valid_address() -> String {
    "אנא הזן כתובת תקינה.".to_string()
}

pub fn ask_description() -> String {
    "תאר בקצרה את הבעיה/הבקשה:".to_string()
}

pub fn ask_longer_description() -> String {
    "אנא הזן תיאור מפורט יותר.".to_string()
}

/// Apology with fallback contact after a persistence failure.
pub fn apology_message(company: &CompanyConfig) -> String {
    format!(
        "אירעה שגיאה בפתיחת הקריאה.\nאנא נסה שוב או התקשר ל: *{}*",
        company.support_phone
    )
}

/// `dd.mm.yyyy HH:MM` rendering of a stored RFC 3339 timestamp; falls back to
/// the raw string when it does not parse.
fn format_timestamp(ts: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|_| ts.to_string())
}

/// `dd.mm.yyyy` rendering of a stored RFC 3339 timestamp.
fn format_date(ts: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|_| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wappdesk_core::types::ServiceCallStatus;

    fn company() -> CompanyConfig {
        CompanyConfig::default()
    }

    fn call() -> ServiceCall {
        ServiceCall {
            id: "sc-1".into(),
            call_number: 1001,
            customer_id: "c-1".into(),
            address: "רחוב הרצל 10".into(),
            site: String::new(),
            description: "מצלמה לא עובדת".into(),
            contact_name: "דנה".into(),
            contact_mobile: "0501234567".into(),
            service_type: ServiceCallType::Cameras,
            status: ServiceCallStatus::Open,
            last_update_at: "2026-03-01T14:30:00.000Z".into(),
            created_at: "2026-03-01T14:30:00.000Z".into(),
        }
    }

    #[test]
    fn menu_lists_all_five_options() {
        let menu = service_type_menu();
        for ty in ServiceCallType::ALL {
            assert!(menu.contains(ty.menu_key()));
            assert!(menu.contains(ty.caption()));
        }
    }

    #[test]
    fn first_time_message_includes_privacy_url() {
        let msg = first_time_message(&company());
        assert!(msg.contains(&company().privacy_url));
        assert!(msg.contains(&company().name));
    }

    #[test]
    fn confirmation_includes_call_number_and_fields() {
        let msg = confirmation_message(&call(), &company());
        assert!(msg.contains("#1001"));
        assert!(msg.contains("רחוב הרצל 10"));
        assert!(msg.contains("מצלמה לא עובדת"));
    }

    #[test]
    fn open_call_message_formats_update_time() {
        let msg = open_call_message("דנה", &call(), &company());
        assert!(msg.contains("#1001"));
        assert!(msg.contains("01.03.2026 14:30"));
        assert!(msg.contains("פתוח"));
    }

    #[test]
    fn unparsable_timestamp_falls_back_to_raw() {
        assert_eq!(format_timestamp("not-a-time"), "not-a-time");
    }

    #[test]
    fn urgent_and_apology_use_support_phone() {
        let company = company();
        assert!(urgent_message(&company).contains(&company.support_phone));
        assert!(apology_message(&company).contains(&company.support_phone));
    }
}
