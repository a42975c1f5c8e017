//! Prompt templates for the completion endpoint
//! 补全端点的提示词模板
//!
//! Each request type selects a fixed instruction template; the user prompt
//! is interpolated as a literal substring, never escaped or rewritten.
//! 每种请求类型选择一个固定的指令模板；用户提示词按字面插入，不做转义或改写。

/// Request type tag selecting a prompt template / 选择提示词模板的请求类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    /// Conversational financial assistant / 对话式金融助手
    Chat,
    /// Credit insights from unstructured applicant text / 从申请人文本提取信用洞察
    Analysis,
    /// Plain-language rewrite of loan agreement text / 贷款协议的通俗化改写
    Simplify,
    /// Preliminary eligibility assessment / 初步资格评估
    Eligibility,
    /// EMI affordability advice / 月供负担能力建议
    EmiAdvice,
    /// Underwriter note fraud screening / 核保备注欺诈筛查
    FraudAnalysis,
}

impl PromptKind {
    /// All request types, in wire-tag order / 全部请求类型（按线上标签顺序）
    pub const ALL: [PromptKind; 6] = [
        PromptKind::Chat,
        PromptKind::Analysis,
        PromptKind::Simplify,
        PromptKind::Eligibility,
        PromptKind::EmiAdvice,
        PromptKind::FraudAnalysis,
    ];

    /// Parse a wire tag. Unknown tags are rejected; there is no default
    /// template. / 解析线上标签。未知标签被拒绝，没有默认模板。
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "chat" => Some(Self::Chat),
            "analysis" => Some(Self::Analysis),
            "simplify" => Some(Self::Simplify),
            "eligibility" => Some(Self::Eligibility),
            "emi_advice" => Some(Self::EmiAdvice),
            "fraud_analysis" => Some(Self::FraudAnalysis),
            _ => None,
        }
    }

    /// The wire tag for this request type / 此请求类型的线上标签
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Analysis => "analysis",
            Self::Simplify => "simplify",
            Self::Eligibility => "eligibility",
            Self::EmiAdvice => "emi_advice",
            Self::FraudAnalysis => "fraud_analysis",
        }
    }

    /// Render the full instruction for this request type, interpolating the
    /// user prompt verbatim / 渲染此请求类型的完整指令，按字面插入用户提示词
    pub fn render(&self, prompt: &str) -> String {
        match self {
            Self::Chat => format!(
                "You are a helpful financial assistant for a loan app in India. \
                 Keep answers simple and short. User's question: \"{}\"",
                prompt
            ),
            Self::Analysis => format!(
                "Analyze this unstructured text from a loan applicant in India. \
                 Provide a concise credit insights summary in bullet points. \
                 Text data: \"{}\"",
                prompt
            ),
            Self::Simplify => format!(
                "Simplify this complex loan agreement text into simple bullet \
                 points for someone with low financial literacy. Text to \
                 simplify: \"{}\"",
                prompt
            ),
            Self::Eligibility => format!(
                "You are an AI loan eligibility assessor. Based on this data, \
                 provide a preliminary, non-binding assessment for a user in \
                 India. Start with a likely outcome (Good, Moderate, \
                 Challenging), then briefly explain why. User's data: \"{}\"",
                prompt
            ),
            Self::EmiAdvice => format!(
                "You are an AI financial advisor. A user's loan details are: {}. \
                 Provide simple, actionable advice on: 1) Affordability, \
                 2) Impact of Tenure, 3) Simple Tips.",
                prompt
            ),
            Self::FraudAnalysis => format!(
                "You are a fraud detection analyst. Analyze these underwriter \
                 notes. Provide three sections: **Potential Red Flags**, \
                 **Summary of Risk**, and **Recommended Verification Steps**. \
                 Notes: \"{}\"",
                prompt
            ),
        }
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
