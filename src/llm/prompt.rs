use regex::Regex;
use std::sync::OnceLock;

pub const SYSTEM_PROMPT: &str = "You are an expert clinical geneticist and rare disease diagnostician. \
Given phenotype descriptions, you suggest the most likely rare diseases.";

/// User turn asking for the top `k` diseases as a bare numbered list.
pub fn user_prompt(phenotypes: &str, k: usize) -> String {
    format!(
        "The patient has the following phenotype description:\n\n\
         \"\"\"{phenotypes}\"\"\"\n\n\
         List the top {k} most likely rare diseases (by disease name only).\n\
         Return them as a numbered list, one disease per line, without any extra commentary.\n"
    )
}

fn numbering() -> &'static Regex {
    static NUMBERING: OnceLock<Regex> = OnceLock::new();
    // Leading "1.", "2)", "3 -" and the like.
    NUMBERING.get_or_init(|| Regex::new(r"^\d+[.)\-\s]*").expect("numbering regex is valid"))
}

/// Parse a model reply into at most `k` disease names, in order.
///
/// Blank lines are dropped and leading list numbering is stripped; lines that
/// are empty after stripping are skipped.
pub fn parse_ranked_list(text: &str, k: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| numbering().replace(line, "").into_owned())
        .filter(|name| !name.is_empty())
        .take(k)
        .collect()
}
