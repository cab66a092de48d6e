//! Operator report for a finished questionnaire.

use crate::choice::Question;
use crate::classifier::PersonalityProfile;
use crate::prompts::{report_label, NOT_AVAILABLE};
use crate::record::CompletedQuestionnaire;

const SEPARATOR: &str = "<pre>---------------------------</pre>";

/// Escape text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Public profile link for a messenger username.
pub fn account_link(username: Option<&str>) -> Option<String> {
    username.map(|u| format!("https://t.me/{}", u))
}

/// Render the HTML report sent to the operator.
///
/// Field order: identity, profile answers, the eleven answers, then the
/// derived profile.
pub fn format_report(record: &CompletedQuestionnaire, profile: &PersonalityProfile) -> String {
    let identity = &record.identity;
    let mut lines: Vec<String> = Vec::with_capacity(32);

    lines.push("<b>📜 تقرير المستخدم</b>".to_string());
    lines.push(SEPARATOR.to_string());
    lines.push(format!(
        "<b>🆔 رقم التعريف في Telegram:</b> {}",
        identity.user_id
    ));

    let link = match account_link(identity.username.as_deref()) {
        Some(url) => {
            let url = escape_html(&url);
            format!("<a href=\"{}\">{}</a>", url, url)
        }
        None => NOT_AVAILABLE.to_string(),
    };
    lines.push(format!("<b>🔗 رابط الحساب:</b> {}", link));

    lines.push(format!(
        "<b>👤 الاسم:</b> {} {}",
        escape_html(&identity.first_name),
        escape_html(&identity.last_name)
    ));
    lines.push(format!("<b>🏷 اللقب:</b> {}", escape_html(&record.nickname)));
    lines.push(format!("<b>🏙 المدينة:</b> {}", escape_html(&record.city)));
    lines.push(format!("<b>🌍 الدولة:</b> {}", escape_html(&record.country)));

    for question in Question::ALL {
        lines.push(format!(
            "<b>{}:</b> {}",
            report_label(question),
            record.answer(question)
        ));
    }

    lines.push(SEPARATOR.to_string());
    lines.push("<b>🧠 تحليل الشخصية الأولي</b>".to_string());
    lines.push(format!("<b>▸ نوع MBTI:</b> {}", profile.type_code()));
    lines.push(format!("<b>▸ الانطواء/الانفتاح:</b> {}", profile.extraversion.label));
    lines.push(format!("<b>▸ الحس/الحدس:</b> {}", profile.sensing.label));
    lines.push(format!("<b>▸ التفكير/الشعور:</b> {}", profile.thinking.label));
    lines.push(format!("<b>▸ الحكم/الإدراك:</b> {}", profile.judging.label));
    lines.push(format!("<b>▸ مستوى الإبداع:</b> {}", profile.creativity.label()));
    lines.push(format!("<b>▸ مستوى الوفاء:</b> {}", profile.loyalty.label()));
    lines.push(format!("<b>▸ مستوى السيطرة:</b> {}", profile.control.label()));
    lines.push(format!(
        "<b>▸ التعامل مع المواقف الصعبة:</b> {}",
        profile.resilience.label()
    ));

    lines.join("\n")
}
