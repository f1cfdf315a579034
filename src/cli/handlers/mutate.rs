use anyhow::{Result, bail};

use super::CommandContext;
use super::query::execute;

pub fn handle_mutate(ctx: CommandContext, mutation: String, variables: Option<String>) -> Result<()> {
    let document = mutation_document(&mutation, variables.is_some())?;
    execute(&ctx, document, variables)
}

/// Full `mutation` documents pass through untouched; bare field selections
/// are wrapped in `mutation { }`.
fn mutation_document(input: &str, has_variables: bool) -> Result<String> {
    if input.trim_start().starts_with("mutation") {
        return Ok(input.to_string());
    }
    if has_variables && input.contains('$') {
        bail!("Variables need a full document, e.g. 'mutation($name: String!) {{ createBoard(name: $name) }}'");
    }
    Ok(format!("mutation {{ {} }}", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_fields_are_wrapped() {
        let doc = mutation_document(r#"createBoard(name: "free")"#, false).unwrap();
        assert_eq!(doc, r#"mutation { createBoard(name: "free") }"#);
    }

    #[test]
    fn test_full_document_passes_through() {
        let input = "mutation Add($name: String!) { createBoard(name: $name) }";
        assert_eq!(mutation_document(input, true).unwrap(), input);
    }

    #[test]
    fn test_bare_fields_with_variables_are_rejected() {
        let err = mutation_document("createBoard(name: $name)", true).unwrap_err();
        assert!(err.to_string().contains("full document"));
    }
}
