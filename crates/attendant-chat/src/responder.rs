//! Canned-reply synthesis for demo mode.
//!
//! Maps a (language, intent) classification to a fixed bilingual template.
//! The tables are complete by construction, so this path performs no I/O and
//! cannot fail.

use attendant_core::Persona;

use crate::error::ChatError;
use crate::types::{Classification, Intent, Language};

const LANGUAGE_COUNT: usize = Language::ALL.len();
const INTENT_COUNT: usize = Intent::ALL.len();

// =============================================================================
// Generic customer-service templates
// =============================================================================

pub(crate) const GENERAL_ZH_ORDER: &str =
    "我很乐意帮助您处理订单问题！请提供您的订单号，我可以为您查询状态并提供详细信息。";
pub(crate) const GENERAL_ZH_RETURNS: &str =
    "关于退货和退款，您可以通过账户仪表板发起流程或联系我们的退货部门。大多数商品可以在购买后30天内退货。您有订单号吗？";
pub(crate) const GENERAL_ZH_TECHNICAL: &str =
    "很抱歉听到您遇到技术问题。让我帮您解决。请描述您遇到的具体问题，这样我就能提供最相关的解决方案。";
pub(crate) const GENERAL_ZH_HOURS: &str =
    "我们的客服时间是周一至周五上午9点至下午6点（东部时间），周六上午10点至下午4点。周日和主要节假日休息。有什么我可以帮助您的吗？";
pub(crate) const GENERAL_ZH_GREETING: &str =
    "您好！欢迎使用我们的客服。我可以帮助您处理订单、退货、技术支持或一般咨询问题。今天有什么我可以帮助您的吗？";
pub(crate) const GENERAL_ZH_FALLBACK: &str =
    "感谢您的留言！我在这里帮助处理客服咨询。请提供更多关于您需要帮助的详细信息。我可以帮助处理订单、退货、技术问题和一般问题。";

pub(crate) const GENERAL_EN_ORDER: &str = "I'd be happy to help with your order! Could you please provide your order number? I can then check the status and provide you with detailed information about your purchase.";
pub(crate) const GENERAL_EN_RETURNS: &str = "For returns and refunds, you can initiate the process through your account dashboard or contact our returns department. Most items can be returned within 30 days of purchase. Do you have your order number handy?";
pub(crate) const GENERAL_EN_TECHNICAL: &str = "I'm sorry to hear you're experiencing technical issues. Let me help you troubleshoot. Could you describe the specific problem you're encountering? This will help me provide the most relevant solution.";
pub(crate) const GENERAL_EN_HOURS: &str = "Our customer service hours are Monday through Friday, 9 AM to 6 PM EST, and Saturday 10 AM to 4 PM EST. We're closed on Sundays and major holidays. Is there anything specific I can help you with?";
pub(crate) const GENERAL_EN_GREETING: &str = "Hello! Welcome to our customer service. I'm here to help you with any questions about orders, returns, technical support, or general inquiries. How can I assist you today?";
pub(crate) const GENERAL_EN_FALLBACK: &str = "Thank you for your message! I'm here to help with customer service inquiries. Could you please provide more details about what you need assistance with? I can help with orders, returns, technical issues, and general questions.";

// =============================================================================
// 3D print-service templates
// =============================================================================

const PRINT_ZH_ORDER: &str =
    "很乐意帮您跟进打印订单！请提供订单号或报价编号，我可以为您查询打印进度和预计发货时间。";
const PRINT_ZH_RETURNS: &str =
    "如果打印件有损坏或与规格不符，我们可以安排重印或退款。请提供订单号和零件照片，我们的团队会尽快处理。";
const PRINT_ZH_TECHNICAL: &str =
    "很抱歉您的模型文件遇到问题。请告诉我文件格式（STL、STEP、OBJ）以及具体的报错信息，我来帮您检查并准备打印。";
const PRINT_ZH_HOURS: &str =
    "我们的客服时间是周一至周五上午9点至下午6点。标准工期为3至5个工作日，视材料和表面处理而定。有什么需要我帮您查询的吗？";
const PRINT_ZH_GREETING: &str =
    "您好！欢迎使用我们的3D打印服务。我可以帮助您处理报价、订单进度、文件检查和重印。今天有什么可以帮您？";
const PRINT_ZH_FALLBACK: &str =
    "感谢您的咨询！我可以协助处理报价、打印订单、模型文件问题、工期和重印。请提供更多详细信息，方便我为您服务。";

const PRINT_EN_ORDER: &str = "Happy to help with your print order! Could you share your order number or quote reference? I can check printing progress and the expected dispatch date for you.";
const PRINT_EN_RETURNS: &str = "If a print arrived damaged or off-spec we can arrange a reprint or a refund. Please send your order number and a photo of the part, and our team will take it from there.";
const PRINT_EN_TECHNICAL: &str = "Sorry to hear there's trouble with your model file. Could you tell me the file format (STL, STEP, OBJ) and the error you're seeing? I'll help you get it print-ready.";
const PRINT_EN_HOURS: &str = "Our service desk is staffed Monday through Friday, 9 AM to 6 PM. Standard lead time is 3-5 business days depending on material and finish. Anything specific I can check for you?";
const PRINT_EN_GREETING: &str = "Hello! Welcome to our 3D print service. I can help with quotes, order status, file checks, and reprints. How can I assist you today?";
const PRINT_EN_FALLBACK: &str = "Thanks for reaching out! I can help with quotes, print orders, model file issues, lead times, and reprints. Could you share a few more details about what you need?";

// =============================================================================
// ResponseTable
// =============================================================================

/// Complete mapping from every (language, intent) pair to a canned reply.
///
/// Completeness is enforced at construction: the built-in tables fill every
/// slot by shape, and [`ResponseTable::from_entries`] rejects missing or
/// empty entries. Lookup is therefore total.
#[derive(Clone, Debug)]
pub struct ResponseTable {
    replies: [[String; INTENT_COUNT]; LANGUAGE_COUNT],
}

impl ResponseTable {
    /// The built-in generic customer-service table.
    pub fn general() -> Self {
        Self {
            replies: [
                [
                    GENERAL_ZH_ORDER,
                    GENERAL_ZH_RETURNS,
                    GENERAL_ZH_TECHNICAL,
                    GENERAL_ZH_HOURS,
                    GENERAL_ZH_GREETING,
                    GENERAL_ZH_FALLBACK,
                ]
                .map(String::from),
                [
                    GENERAL_EN_ORDER,
                    GENERAL_EN_RETURNS,
                    GENERAL_EN_TECHNICAL,
                    GENERAL_EN_HOURS,
                    GENERAL_EN_GREETING,
                    GENERAL_EN_FALLBACK,
                ]
                .map(String::from),
            ],
        }
    }

    /// The built-in 3D print-service table.
    pub fn print_service() -> Self {
        Self {
            replies: [
                [
                    PRINT_ZH_ORDER,
                    PRINT_ZH_RETURNS,
                    PRINT_ZH_TECHNICAL,
                    PRINT_ZH_HOURS,
                    PRINT_ZH_GREETING,
                    PRINT_ZH_FALLBACK,
                ]
                .map(String::from),
                [
                    PRINT_EN_ORDER,
                    PRINT_EN_RETURNS,
                    PRINT_EN_TECHNICAL,
                    PRINT_EN_HOURS,
                    PRINT_EN_GREETING,
                    PRINT_EN_FALLBACK,
                ]
                .map(String::from),
            ],
        }
    }

    /// The built-in table for `persona`.
    pub fn for_persona(persona: Persona) -> Self {
        match persona {
            Persona::General => Self::general(),
            Persona::PrintService => Self::print_service(),
        }
    }

    /// Build a custom table, verifying completeness.
    ///
    /// Every (language, intent) pair, `Fallback` included, must be present
    /// and non-empty; a missing or blank entry is a configuration error.
    pub fn from_entries<I>(entries: I) -> Result<Self, ChatError>
    where
        I: IntoIterator<Item = (Language, Intent, String)>,
    {
        let mut slots: [[Option<String>; INTENT_COUNT]; LANGUAGE_COUNT] = Default::default();
        for (language, intent, reply) in entries {
            slots[language.index()][intent.index()] = Some(reply);
        }

        let mut replies: [[String; INTENT_COUNT]; LANGUAGE_COUNT] = Default::default();
        for language in Language::ALL {
            for intent in Intent::ALL {
                match slots[language.index()][intent.index()].take() {
                    Some(reply) if !reply.trim().is_empty() => {
                        replies[language.index()][intent.index()] = reply;
                    }
                    _ => return Err(ChatError::MissingReply { language, intent }),
                }
            }
        }

        Ok(Self { replies })
    }

    /// The canned reply for a (language, intent) pair.
    pub fn reply(&self, language: Language, intent: Intent) -> &str {
        &self.replies[language.index()][intent.index()]
    }
}

// =============================================================================
// LocalResponder
// =============================================================================

/// Synthesizes replies from the active response table.
pub struct LocalResponder {
    table: ResponseTable,
}

impl LocalResponder {
    /// Create a responder over an explicit table.
    pub fn new(table: ResponseTable) -> Self {
        Self { table }
    }

    /// Create a responder with the built-in table for `persona`.
    pub fn for_persona(persona: Persona) -> Self {
        Self::new(ResponseTable::for_persona(persona))
    }

    /// The canned reply for a classification. Total; never empty.
    pub fn respond(&self, classification: &Classification) -> &str {
        self.table
            .reply(classification.language, classification.intent)
    }
}

// =============================================================================
// Tests
// =============================================================================
