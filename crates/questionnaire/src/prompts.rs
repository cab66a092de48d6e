//! Fixed user-facing texts.
//!
//! These strings are part of the bot's observable behaviour and are kept
//! verbatim.

use crate::choice::Question;
use crate::state::SessionState;

/// Reply to `/start`.
pub const WELCOME: &str = "👋 أهلاً بك! هذا اختبار شخصية بسيط.\nأرسل /test لبدء الاختبار.";

/// Reply when a question state receives anything but a choice glyph.
pub const INVALID_CHOICE: &str = "❌ يرجى اختيار (أ)، (ب)، أو (ج) فقط.";

/// Reply after the last answer was stored successfully.
pub const THANK_YOU: &str = "✅ شكرًا لوقتك! سيتم التواصل معك بعد 3 أيام.";

/// Reply when the finished questionnaire could not be stored.
pub const PROCESSING_FAILED: &str = "❌ حدث خطأ أثناء معالجة بياناتك. يرجى المحاولة لاحقًا.";

/// Reply to text that arrives outside of a session.
pub const USAGE_HELP: &str = "❓ لم أفهم طلبك. استخدم /start أو /test.";

/// Placeholder for missing profile data.
pub const NOT_AVAILABLE: &str = "غير متوفر";

/// Command descriptions registered with the messenger.
pub const COMMANDS: [(&str, &str); 2] = [("start", "ترحيب"), ("test", "بدء الاختبار")];

const NICKNAME: &str = "🚀 أولاً، ما هو لقبك؟";
const CITY: &str = "🏙 من أي مدينة أنت؟";
const COUNTRY: &str = "🌍 من أي دولة؟";

/// The prompt to show while a session sits in `state`.
///
/// `Completed` has no prompt.
pub fn prompt_for(state: SessionState) -> Option<&'static str> {
    match state {
        SessionState::AwaitingNickname => Some(NICKNAME),
        SessionState::AwaitingCity => Some(CITY),
        SessionState::AwaitingCountry => Some(COUNTRY),
        SessionState::AwaitingAnswer(question) => Some(question_prompt(question)),
        SessionState::Completed => None,
    }
}

/// The full text of a multiple-choice question, options included.
pub fn question_prompt(question: Question) -> &'static str {
    match question {
        Question::ProblemSolving => {
            "🔹 كيف تتعامل مع المشاكل الكبيرة؟\n(أ) أحللها بهدوء\n(ب) أتوتر لكن أحاول حلها\n(ج) أشعر بالعجز"
        }
        Question::Creativity => {
            "🎨 كيف ترى الإبداع؟\n(أ) جزء أساسي من حياتي\n(ب) شيء أحترمه لكن لا أمارسه كثيرًا\n(ج) لا أهتم به"
        }
        Question::DecisionMaking => {
            "🧩 عند اتخاذ القرارات، ما هو دافعك الأساسي؟\n(أ) المنطق والعقلانية\n(ب) العاطفة والتجربة الشخصية\n(ج) ما يقرره الآخرون"
        }
        Question::SocialInteraction => {
            "👥 كيف تشعر في التجمعات الاجتماعية؟\n(أ) مرتاح ومستمتع\n(ب) متوتر قليلاً\n(ج) أفضل أن أكون بمفردي"
        }
        Question::EmotionalState => {
            "😊 كيف تصف مزاجك عادةً؟\n(أ) إيجابي ومتفائل\n(ب) متذبذب\n(ج) سلبي أو حزين"
        }
        Question::Planning => {
            "📅 هل تحب التخطيط لكل شيء؟\n(أ) نعم، أحب التنظيم\n(ب) أحيانًا\n(ج) لا، أفضل العفوية"
        }
        Question::Flexibility => {
            "🔄 كيف تتعامل مع التغييرات المفاجئة؟\n(أ) أتكيف بسرعة\n(ب) أحتاج وقتًا للتأقلم\n(ج) أكره التغيير"
        }
        Question::TeamLoyalty => {
            "🤝 عندما تعمل في فريق، كيف تتصرف؟\n(أ) أضع أهداف الفريق أولاً\n(ب) أحب أن أكون مرنًا\n(ج) أركز على مصلحتي الخاصة"
        }
        Question::ControlPreference => {
            "🎯 كيف تتعامل مع مهمة تتطلب العمل مع شخص آخر؟\n(أ) أفضل قيادة العملية\n(ب) أشارك وأتعاون\n(ج) أترك الآخر يقود"
        }
        Question::DailyJudgment => {
            "🗓 عند التخطيط ليومك، كيف تتصرف؟\n(أ) أضع جدولًا واضحًا\n(ب) أحدد بعض النقاط الرئيسية\n(ج) أترك الأمور تسير كما تشاء"
        }
        Question::ToughSituations => {
            "⚡ إذا واجهتك مشكلة غير متوقعة، ماذا تفعل؟\n(أ) أبقى هادئًا وأحلها\n(ب) أشعر بالقلق لكن أبحث عن حل\n(ج) أتجنب التعامل معها"
        }
    }
}

/// Label used for a question's answer in the operator report.
pub fn report_label(question: Question) -> &'static str {
    match question {
        Question::ProblemSolving => "🔹 التعامل مع المشاكل",
        Question::Creativity => "🎨 الإبداع",
        Question::DecisionMaking => "🧩 اتخاذ القرارات",
        Question::SocialInteraction => "👥 التفاعل الاجتماعي",
        Question::EmotionalState => "😊 الحالة العاطفية",
        Question::Planning => "📅 التخطيط",
        Question::Flexibility => "🔄 المرونة",
        Question::TeamLoyalty => "🤝 الولاء في الفريق",
        Question::ControlPreference => "🎯 تفضيل السيطرة",
        Question::DailyJudgment => "🗓 الحكم اليومي",
        Question::ToughSituations => "⚡ المواقف الصعبة",
    }
}
