//! Prompt assembly for research requests.
//!
//! The prompt is a fixed template: the question, the formatted search
//! results (or a placeholder), then instructions that keep the model
//! grounded in what was found.

use quickseek_core::model::SearchResult;

/// Stands in for search results when the search failed or found nothing.
pub const NO_RESULTS_PLACEHOLDER: &str = "No search results found.";

const RULE: &str = "============================================================";

/// Render search results as a numbered plain-text block.
///
/// Snippets are cut to `snippet_chars` characters. An empty slice renders as
/// [`NO_RESULTS_PLACEHOLDER`].
pub fn format_search_results(query: &str, results: &[SearchResult], snippet_chars: usize) -> String {
    if results.is_empty() {
        return NO_RESULTS_PLACEHOLDER.to_string();
    }

    let mut out = format!("Search results for: '{query}'\n{RULE}\n\n");
    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, result.title));
        if !result.snippet.is_empty() {
            out.push_str(&format!("   {}\n", result.snippet_preview(snippet_chars)));
        }
        out.push_str(&format!("   Source: {}\n\n", result.url));
    }
    out.trim_end().to_string()
}

/// Build the full research prompt.
pub fn research_prompt(question: &str, search_context: &str, language: &str) -> String {
    format!(
        "User question: {question}\n\
         \n\
         Information found on the web:\n\
         {search_context}\n\
         \n\
         Instructions:\n\
         - Use only the information above to answer the question\n\
         - Be clear and concise\n\
         - If the information is limited or insufficient, say so explicitly\n\
         - Answer in {language}\n\
         \n\
         Answer:"
    )
}
