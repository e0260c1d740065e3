//! Completion prompt for a business idea in one category.

/// Section headers the completion is asked to produce, in order.
pub const SECTIONS: [&str; 8] = [
    "💡 Core Concept",
    "🎯 Target Market",
    "💰 Revenue Model",
    "🔥 Unique Value Proposition",
    "📈 Market Opportunity",
    "🛠️ Getting Started",
    "💵 Estimated Startup Investment",
    "⚡ Success Factors",
];

const SECTION_HINTS: [&str; 8] = [
    "Brief, compelling description of the business idea",
    "Define the target audience and market size",
    "Explain how the business will make money",
    "What makes this business special and competitive",
    "Market trends and opportunities",
    "3-4 practical steps to launch this business",
    "Rough estimate of initial investment needed",
    "Key factors for success in this business",
];

/// Build the instruction for `category_label`. Deterministic.
pub fn build(category_label: &str) -> String {
    let mut prompt = format!(
        "Generate a comprehensive and innovative business idea for the '{category_label}' category.\n\n\
         Please format your response with the following structure using markdown \
         (use * for bold, not #):\n\n\
         *🚀 Business Idea: [Creative Business Name]*\n\n"
    );

    for (header, hint) in SECTIONS.iter().zip(SECTION_HINTS) {
        prompt.push_str(&format!("*{header}*\n[{hint}]\n\n"));
    }

    prompt.push_str(&format!(
        "Ensure the idea is:\n\
         - Innovative and relevant to current market trends\n\
         - Practical and achievable\n\
         - Specific to the {category_label} sector\n\
         - Formatted with proper markdown for Telegram.\n"
    ));
    prompt
}
