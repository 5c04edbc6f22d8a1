use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// `{{ env.VAR | default("value") }}` substitutes the default when the
/// variable is unset; a placeholder without a default for an unset variable
/// is an error so missing secrets fail at startup rather than at request
/// time.
pub fn expand(input: &str) -> Result<String, String> {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder pattern is valid")
    });

    let mut output = String::with_capacity(input.len());
    let mut last_end = 0;

    for captures in placeholder.captures_iter(input) {
        let whole = captures.get(0).expect("capture 0 always present");
        let var_name = &captures[1];
        let default_value = captures.get(2).map(|m| m.as_str());

        output.push_str(&input[last_end..whole.start()]);

        match std::env::var(var_name) {
            Ok(value) => output.push_str(&value),
            Err(_) => match default_value {
                Some(default) => output.push_str(default),
                None => return Err(format!("environment variable not found: `{var_name}`")),
            },
        }

        last_end = whole.end();
    }

    output.push_str(&input[last_end..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(expand("listen = \"0.0.0.0:4000\"").unwrap(), "listen = \"0.0.0.0:4000\"");
    }

    #[test]
    fn set_variable_is_substituted() {
        temp_env::with_var("JARVIS_TEST_KEY", Some("sk-123"), || {
            let out = expand("api_key = \"{{ env.JARVIS_TEST_KEY }}\"").unwrap();
            assert_eq!(out, "api_key = \"sk-123\"");
        });
    }

    #[test]
    fn unset_variable_without_default_errors() {
        temp_env::with_var_unset("JARVIS_TEST_MISSING", || {
            let err = expand("api_key = \"{{ env.JARVIS_TEST_MISSING }}\"").unwrap_err();
            assert!(err.contains("JARVIS_TEST_MISSING"));
        });
    }

    #[test]
    fn unset_variable_with_default_uses_default() {
        temp_env::with_var_unset("JARVIS_TEST_MISSING", || {
            let out = expand("api_key = \"{{ env.JARVIS_TEST_MISSING | default(\"\") }}\"").unwrap();
            assert_eq!(out, "api_key = \"\"");
        });
    }

    #[test]
    fn multiple_placeholders_on_one_line() {
        let vars = [("JARVIS_A", Some("a")), ("JARVIS_B", Some("b"))];
        temp_env::with_vars(vars, || {
            let out = expand("x = \"{{ env.JARVIS_A }}{{ env.JARVIS_B }}\"").unwrap();
            assert_eq!(out, "x = \"ab\"");
        });
    }
}
