//! The fixed summarization prompt.

/// Builds the one-line-summary prompt, interpolating the document text
/// verbatim after the literal delimiter.
#[must_use]
pub fn summary_prompt(document: &str) -> String {
    format!(
        "Generate a 1 line summary which captures relevant details of the following dense text:\n\
         ---\n\
         Text:\n\
         \n\
         {document}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_document_verbatim() {
        let prompt = summary_prompt("The sky is blue.");
        assert!(prompt.contains("The sky is blue."));
    }

    #[test]
    fn test_prompt_delimiter_precedes_document() {
        let prompt = summary_prompt("DOC");
        let delim = prompt.find("---").unwrap();
        let doc = prompt.find("DOC").unwrap();
        assert!(delim < doc);
        assert!(prompt.starts_with("Generate a 1 line summary"));
    }
}
