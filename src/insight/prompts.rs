pub const DAILY_QUOTE: &str = "Generate an inspiring and thoughtful quote about self-reflection, \
mindfulness, or personal growth. The quote should be brief (max 2 sentences) and include the author. \
Format: \"Quote\" - Author";

const ANALYSIS_TEMPLATE: &str = "Act as an empathetic therapist or personal development coach. \
Analyze the following journal entry and provide thoughtful insights, validation, \
and gentle suggestions for growth (2-3 sentences max).

Journal Entry: {content}
Mood Level (1-5): {mood}
Influencing Factors: {factors}

Provide your response in this format:
🤔 [Your therapeutic insight and suggestion here]";

pub const NO_FACTORS: &str = "None specified";

pub fn entry_analysis(content: &str, mood: i64, factors: Option<&str>) -> String {
    let factors = factors
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(NO_FACTORS);

    ANALYSIS_TEMPLATE
        .replace("{mood}", &mood.to_string())
        .replace("{factors}", factors)
        .replace("{content}", content)
}
