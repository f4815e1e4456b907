//! Login form heuristic
//!
//! A form counts as a login form when it has both a password input and an
//! identifier-like input (username, email, login).

use scraper::ElementRef;

/// Substrings of an input's `name` that mark it as an account identifier
const IDENTIFIER_HINTS: [&str; 3] = ["user", "email", "login"];

/// Returns true if the `<form>` subtree looks like an authentication form
///
/// All descendant `<input>` elements are inspected, not just direct children.
/// A lone password field (e.g. a "change password" form) does not qualify.
pub fn is_login_form(form: ElementRef<'_>) -> bool {
    let mut has_password = false;
    let mut has_identifier = false;

    let inputs = form
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "input");

    for input in inputs {
        let input_type = input
            .value()
            .attr("type")
            .unwrap_or_default()
            .to_ascii_lowercase();
        let input_name = input
            .value()
            .attr("name")
            .unwrap_or_default()
            .to_lowercase();

        if input_type == "password" {
            has_password = true;
        }

        if input_type == "email" || IDENTIFIER_HINTS.iter().any(|hint| input_name.contains(hint)) {
            has_identifier = true;
        }

        if has_password && has_identifier {
            return true;
        }
    }

    false
}
